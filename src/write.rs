// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{Document, NodeId, NodeKind};

/// An XML node indention.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Indent {
    /// Disables indention and new lines.
    None,
    /// Indent with spaces. Preferred range is 0..4.
    Spaces(u8),
    /// Indent with tabs.
    Tabs,
}

/// Serialization options.
#[derive(Clone, Copy, Debug)]
pub struct WriteOptions {
    /// Node indention.
    ///
    /// Default: 2 spaces
    pub indent: Indent,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            indent: Indent::Spaces(2),
        }
    }
}

impl Document {
    /// Serializes the document into a string.
    ///
    /// Elements with element-only content are written one per line and
    /// indented. Mixed content is written as is, so text survives a
    /// serialize/reparse round trip unchanged.
    pub fn to_string(&self, opt: &WriteOptions) -> String {
        let mut buf = String::new();
        for child in self.children(self.root()) {
            write_node(self, child, 0, opt, &mut buf);
            push_newline(opt, &mut buf);
        }
        buf
    }
}

fn write_node(doc: &Document, id: NodeId, depth: usize, opt: &WriteOptions, buf: &mut String) {
    match doc.kind(id) {
        NodeKind::Root => {}
        NodeKind::Element {
            tag_name,
            attributes,
        } => {
            buf.push('<');
            buf.push_str(tag_name);
            for attr in attributes {
                buf.push(' ');
                buf.push_str(&attr.name);
                buf.push_str("=\"");
                push_escaped_attribute(&attr.value, buf);
                buf.push('"');
            }

            if !doc.has_children(id) {
                buf.push_str("/>");
                return;
            }
            buf.push('>');

            let mixed = doc
                .children(id)
                .any(|c| matches!(doc.kind(c), NodeKind::Text(_) | NodeKind::CData(_)));
            if mixed {
                // Text content is preserved byte for byte.
                for child in doc.children(id) {
                    write_node(doc, child, depth, &WRITE_INLINE, buf);
                }
            } else {
                for child in doc.children(id) {
                    push_newline(opt, buf);
                    push_indent(depth + 1, opt, buf);
                    write_node(doc, child, depth + 1, opt, buf);
                }
                push_newline(opt, buf);
                push_indent(depth, opt, buf);
            }

            buf.push_str("</");
            buf.push_str(tag_name);
            buf.push('>');
        }
        NodeKind::Text(text) => push_escaped_text(text, buf),
        NodeKind::CData(text) => {
            buf.push_str("<![CDATA[");
            buf.push_str(text);
            buf.push_str("]]>");
        }
        NodeKind::Comment(text) => {
            buf.push_str("<!--");
            buf.push_str(text);
            buf.push_str("-->");
        }
        NodeKind::PI { target, value } => {
            buf.push_str("<?");
            buf.push_str(target);
            if let Some(value) = value {
                buf.push(' ');
                buf.push_str(value);
            }
            buf.push_str("?>");
        }
    }
}

const WRITE_INLINE: WriteOptions = WriteOptions {
    indent: Indent::None,
};

fn push_newline(opt: &WriteOptions, buf: &mut String) {
    if opt.indent != Indent::None {
        buf.push('\n');
    }
}

fn push_indent(depth: usize, opt: &WriteOptions, buf: &mut String) {
    match opt.indent {
        Indent::None => {}
        Indent::Spaces(n) => {
            for _ in 0..depth * n as usize {
                buf.push(' ');
            }
        }
        Indent::Tabs => {
            for _ in 0..depth {
                buf.push('\t');
            }
        }
    }
}

fn push_escaped_text(text: &str, buf: &mut String) {
    for c in text.chars() {
        match c {
            '&' => buf.push_str("&amp;"),
            '<' => buf.push_str("&lt;"),
            '>' => buf.push_str("&gt;"),
            _ => buf.push(c),
        }
    }
}

fn push_escaped_attribute(value: &str, buf: &mut String) {
    for c in value.chars() {
        match c {
            '&' => buf.push_str("&amp;"),
            '<' => buf.push_str("&lt;"),
            '>' => buf.push_str("&gt;"),
            '"' => buf.push_str("&quot;"),
            _ => buf.push(c),
        }
    }
}

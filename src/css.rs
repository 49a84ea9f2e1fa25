// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A minimal CSS scanner.
//!
//! Stylesheet content and `style` attributes are treated as flat strings
//! and patched in place. There is no AST and malformed input is tolerated:
//! anything that does not scan is simply left alone.

use std::ops::Range;

/// A `name: value` declaration found in a flat declaration list.
#[derive(Clone, Copy, Debug)]
pub struct Declaration {
    /// Start of the whole match. Points at the leading `;` when present.
    pub start: usize,
    /// End of the whole match, past the trailing `;` when present.
    pub end: usize,
    value_start: usize,
    value_end: usize,
    leading_semicolon: bool,
}

impl Declaration {
    /// The value range, with surrounding whitespace trimmed.
    #[inline]
    pub fn value_range(&self) -> Range<usize> {
        self.value_start..self.value_end
    }
}

/// Finds the first `name: value` declaration in a declaration list.
///
/// A declaration only counts when it starts at the beginning of the text
/// or right after a `;`, so `background-color` never matches `color`.
pub fn find_declaration(text: &str, name: &str) -> Option<Declaration> {
    let bytes = text.as_bytes();
    let mut boundary = 0;
    let mut leading = false;
    loop {
        let mut i = boundary;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        if text[i..].starts_with(name) {
            let mut j = i + name.len();
            while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                j += 1;
            }
            if j < bytes.len() && bytes[j] == b':' {
                j += 1;
                while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                    j += 1;
                }

                let value_start = j;
                let semicolon = text[j..].find(';').map(|p| j + p);
                let mut value_end = semicolon.unwrap_or(bytes.len());
                while value_end > value_start && bytes[value_end - 1].is_ascii_whitespace() {
                    value_end -= 1;
                }

                if value_end > value_start {
                    return Some(Declaration {
                        start: if leading { boundary - 1 } else { boundary },
                        end: semicolon.map(|p| p + 1).unwrap_or(bytes.len()),
                        value_start,
                        value_end,
                        leading_semicolon: leading,
                    });
                }
            }
        }

        match text[boundary..].find(';') {
            Some(p) => {
                boundary += p + 1;
                leading = true;
            }
            None => return None,
        }
    }
}

/// Removes the first `name: value` declaration from a declaration list,
/// preserving the leading `;` separator and the rest of the text.
///
/// Returns `None` when there is nothing to remove.
pub fn strip_declaration(text: &str, name: &str) -> Option<String> {
    let d = find_declaration(text, name)?;
    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..d.start]);
    if d.leading_semicolon {
        out.push(';');
    }
    out.push_str(&text[d.end..]);
    Some(out)
}

/// Replaces a previously located range, typically a declaration value.
pub fn replace_range(text: &str, range: Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len() + replacement.len());
    out.push_str(&text[..range.start]);
    out.push_str(replacement);
    out.push_str(&text[range.end..]);
    out
}

/// Finds a top-level `.class_name {` rule header at or after `from`.
///
/// The selector only counts when preceded, up to whitespace, by the scan
/// start, a `;` or a `}`, so nested selectors are not matched.
///
/// Returns the offset just past the opening brace.
pub fn find_rule(text: &str, class_name: &str, from: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = from;
    while let Some(p) = text[i..].find('.') {
        let dot = i + p;
        i = dot + 1;

        let mut before = dot;
        while before > from && bytes[before - 1].is_ascii_whitespace() {
            before -= 1;
        }
        if before != from && bytes[before - 1] != b';' && bytes[before - 1] != b'}' {
            continue;
        }

        if !text[dot + 1..].starts_with(class_name) {
            continue;
        }

        let mut j = dot + 1 + class_name.len();
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        if j < bytes.len() && bytes[j] == b'{' {
            return Some(j + 1);
        }
    }

    None
}

/// Scans a rule body for a `color:` declaration at brace depth zero.
///
/// `start` points just past the rule's opening brace. Returns the value
/// range. Gives up on an unterminated rule.
pub fn find_color_in_rule(text: &str, start: usize) -> Option<Range<usize>> {
    let mut depth = 0usize;
    let mut pos = start;
    loop {
        let brace = text[pos..]
            .find(|c| c == '{' || c == '}')
            .map(|p| pos + p)?;

        if depth == 0 {
            if let Some(d) = find_declaration(&text[pos..brace], "color") {
                let value = d.value_range();
                return Some(pos + value.start..pos + value.end);
            }
        }

        if text.as_bytes()[brace] == b'{' {
            depth += 1;
        } else if depth == 0 {
            // The rule's own closing brace.
            return None;
        } else {
            depth -= 1;
        }

        pos = brace + 1;
    }
}

/// Returns the offset just past a rule's closing brace.
///
/// `start` points just past the rule's opening brace. Returns `None`
/// for an unterminated rule.
pub fn skip_rule(text: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut pos = start;
    loop {
        let brace = text[pos..]
            .find(|c| c == '{' || c == '}')
            .map(|p| pos + p)?;

        if text.as_bytes()[brace] == b'{' {
            depth += 1;
        } else if depth == 0 {
            return Some(brace + 1);
        } else {
            depth -= 1;
        }

        pos = brace + 1;
    }
}

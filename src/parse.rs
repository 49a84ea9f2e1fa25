// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{Attribute, Document, NodeData, NodeId, NodeKind};

const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

impl Document {
    /// Parses a [`Document`] from a string.
    ///
    /// Namespaced names are stored back in their prefixed form and
    /// namespace declarations become regular `xmlns` attributes, so the
    /// tree serializes the way it was written.
    ///
    /// Whitespace-only text nodes are dropped; the writer re-indents.
    pub fn parse_str(text: &str) -> Result<Document, roxmltree::Error> {
        let xml = roxmltree::Document::parse(text)?;

        let mut doc = Document { nodes: Vec::new() };
        doc.nodes.push(NodeData {
            parent: None,
            prev_sibling: None,
            next_sibling: None,
            children: None,
            line: None,
            kind: NodeKind::Root,
        });

        let root = doc.root();
        for child in xml.root().children() {
            append_xml_node(child, root, &xml, &mut doc);
        }

        Ok(doc)
    }
}

fn append_xml_node(
    node: roxmltree::Node,
    parent_id: NodeId,
    xml: &roxmltree::Document,
    doc: &mut Document,
) {
    let kind = match node.node_type() {
        roxmltree::NodeType::Element => NodeKind::Element {
            tag_name: element_name(node),
            attributes: collect_attributes(node),
        },
        roxmltree::NodeType::Text => {
            let text = node.text().unwrap_or("");
            if text.trim().is_empty() {
                // Formatting whitespace between elements.
                return;
            }
            NodeKind::Text(text.to_string())
        }
        roxmltree::NodeType::Comment => NodeKind::Comment(node.text().unwrap_or("").to_string()),
        roxmltree::NodeType::PI => {
            let pi = match node.pi() {
                Some(pi) => pi,
                None => return,
            };
            NodeKind::PI {
                target: pi.target.to_string(),
                value: pi.value.map(str::to_string),
            }
        }
        roxmltree::NodeType::Root => return,
    };

    let line = xml.text_pos_at(node.range().start).row;
    let id = doc.push_node(kind, Some(line));
    doc.append_child(parent_id, id);

    if node.is_element() {
        for child in node.children() {
            append_xml_node(child, id, xml, doc);
        }
    }
}

fn element_name(node: roxmltree::Node) -> String {
    qualified_name(node, node.tag_name().name(), node.tag_name().namespace())
}

fn collect_attributes(node: roxmltree::Node) -> Vec<Attribute> {
    let mut attributes = Vec::new();

    for attr in node.attributes() {
        attributes.push(Attribute {
            name: qualified_name(node, attr.name(), attr.namespace()),
            value: attr.value().to_string(),
        });
    }

    // Namespaces declared on this element reappear as `xmlns` attributes.
    let parent: Vec<_> = match node.parent_element() {
        Some(p) => p.namespaces().map(|ns| (ns.name(), ns.uri())).collect(),
        None => Vec::new(),
    };
    for ns in node.namespaces() {
        if ns.uri() == XML_NS {
            // The `xml` prefix never needs a declaration.
            continue;
        }
        if parent.contains(&(ns.name(), ns.uri())) {
            continue;
        }
        let name = match ns.name() {
            Some(prefix) => format!("xmlns:{}", prefix),
            None => "xmlns".to_string(),
        };
        attributes.push(Attribute {
            name,
            value: ns.uri().to_string(),
        });
    }

    attributes
}

fn qualified_name(node: roxmltree::Node, name: &str, namespace: Option<&str>) -> String {
    let uri = match namespace {
        Some(uri) => uri,
        None => return name.to_string(),
    };
    match node.lookup_prefix(uri) {
        Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, name),
        _ => name.to_string(),
    }
}

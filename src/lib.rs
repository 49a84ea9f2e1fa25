// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`svgclass` rewrites SVG documents to use CSS-class based colors.

The library is built around a mutable [`Document`] tree parsed via
[`roxmltree`](https://github.com/RazrFalcon/roxmltree) and three operations
on it:

- [`add_class`] inserts or updates a `.name { color: ... }` rule inside
  an embedded stylesheet.
- [`color_to_class`] finds elements painted with a literal color and
  replaces that color with a `class` reference plus a `currentColor`
  indirection.
- [`reapply`] strips literal `color` declarations again after an external
  editor reintroduced them.

Nodes are stored in an arena and addressed by [`NodeId`]. A node is never
removed from the arena, only detached from the tree, so ids stay valid for
the lifetime of the document.
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::num::NonZeroU32;

mod apply;
mod color;
mod convert;
mod css;
mod error;
mod parse;
mod style;
mod write;

pub use apply::apply_class;
pub use color::Color;
pub use convert::{color_to_class, reapply};
pub use error::Error;
pub use style::add_class;
pub use write::{Indent, WriteOptions};

/// A node identifier in a [`Document`] arena.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct NodeId(NonZeroU32);

impl NodeId {
    #[inline]
    fn new(id: u32) -> Self {
        debug_assert!(id < core::u32::MAX);

        // We are using `NonZeroU32` to reduce overhead of `Option<NodeId>`.
        NodeId(NonZeroU32::new(id + 1).unwrap())
    }

    #[inline]
    fn get_usize(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl From<usize> for NodeId {
    #[inline]
    fn from(id: usize) -> Self {
        debug_assert!(id <= core::u32::MAX as usize);
        NodeId::new(id as u32)
    }
}

/// An attribute.
#[derive(Clone, PartialEq)]
pub struct Attribute {
    /// Attribute's name, as written in the source.
    pub name: String,
    /// Attribute's value.
    pub value: String,
}

impl std::fmt::Debug for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(
            f,
            "Attribute {{ name: {:?}, value: {:?} }}",
            self.name, self.value
        )
    }
}

/// A node kind.
#[derive(Clone, PartialEq, Debug)]
pub enum NodeKind {
    /// The hidden root node. A document has exactly one.
    Root,
    /// An element node.
    Element {
        /// Element's tag name, as written in the source.
        tag_name: String,
        /// Element's attributes, in document order.
        attributes: Vec<Attribute>,
    },
    /// A text node.
    Text(String),
    /// A CDATA section. Parses back as [`NodeKind::Text`].
    CData(String),
    /// A comment.
    Comment(String),
    /// A processing instruction.
    PI {
        /// PI's target.
        target: String,
        /// PI's content.
        value: Option<String>,
    },
}

struct NodeData {
    parent: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
    children: Option<(NodeId, NodeId)>,
    // 1-based source line, when the node was parsed from text.
    line: Option<u32>,
    kind: NodeKind,
}

/// A mutable XML tree.
///
/// Guaranteed to have a single element child of the root node after parsing.
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Document {
    /// Returns the hidden root node.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    /// Returns the root element.
    #[inline]
    pub fn root_element(&self) -> NodeId {
        // `unwrap` is safe, because `parse_str` rejects documents
        // without a root element and the editing operations never detach it.
        self.first_element_child(self.root()).unwrap()
    }

    #[inline]
    fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.get_usize()]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.get_usize()]
    }

    /// Returns node's kind.
    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    /// Checks if the node is an element.
    #[inline]
    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Element { .. })
    }

    /// Returns element's tag name, unless the node is not an element.
    #[inline]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match self.node(id).kind {
            NodeKind::Element { ref tag_name, .. } => Some(tag_name),
            _ => None,
        }
    }

    /// Returns the 1-based source line the node was parsed from, if any.
    ///
    /// Nodes created programmatically have no line.
    #[inline]
    pub fn line(&self, id: NodeId) -> Option<u32> {
        self.node(id).line
    }

    /// Returns a parent node.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Returns the next sibling.
    #[inline]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next_sibling
    }

    /// Returns the first child.
    #[inline]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).children.map(|(first, _)| first)
    }

    /// Returns the last child.
    #[inline]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).children.map(|(_, last)| last)
    }

    /// Checks if the node has child nodes.
    #[inline]
    pub fn has_children(&self, id: NodeId) -> bool {
        self.node(id).children.is_some()
    }

    /// Returns an iterator over children nodes.
    #[inline]
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            doc: self,
            next: self.first_child(id),
        }
    }

    /// Returns the first child that is an element.
    #[inline]
    pub fn first_element_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).find(|&c| self.is_element(c))
    }

    /// Returns the next sibling that is an element.
    #[inline]
    pub fn next_sibling_element(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = self.next_sibling(id);
        while let Some(n) = cur {
            if self.is_element(n) {
                return Some(n);
            }
            cur = self.next_sibling(n);
        }
        None
    }

    /// Returns the element following `id` in a pre-order, document-order
    /// traversal: first child, else next sibling, else the next sibling of
    /// the nearest ancestor that has one.
    ///
    /// The stepping is computed lazily from the current tree shape, so the
    /// tree can be restructured mid-walk as long as the current element
    /// stays attached.
    pub fn next_element(&self, id: NodeId) -> Option<NodeId> {
        if let Some(c) = self.first_element_child(id) {
            return Some(c);
        }

        let mut cur = id;
        loop {
            if let Some(s) = self.next_sibling_element(cur) {
                return Some(s);
            }
            cur = self.parent(cur)?;
            if !self.is_element(cur) {
                // Walked up to the hidden root.
                return None;
            }
        }
    }

    /// Returns a restartable iterator over all elements in document order,
    /// starting at the root element.
    #[inline]
    pub fn elements(&self) -> Elements<'_> {
        Elements {
            doc: self,
            next: Some(self.root_element()),
        }
    }

    /// Returns an attribute value.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attributes(id)
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Checks if an attribute is present.
    #[inline]
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    /// Returns a list of all element's attributes.
    pub fn attributes(&self, id: NodeId) -> &[Attribute] {
        match self.node(id).kind {
            NodeKind::Element { ref attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Sets an attribute value.
    ///
    /// An existing attribute is updated in place, keeping its position.
    /// A new one is appended. Not an element - does nothing.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let NodeKind::Element {
            ref mut attributes, ..
        } = self.node_mut(id).kind
        {
            match attributes.iter_mut().find(|a| a.name == name) {
                Some(attr) => attr.value = value.to_string(),
                None => attributes.push(Attribute {
                    name: name.to_string(),
                    value: value.to_string(),
                }),
            }
        }
    }

    /// Removes an attribute. Does nothing when it's not present.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let NodeKind::Element {
            ref mut attributes, ..
        } = self.node_mut(id).kind
        {
            attributes.retain(|a| a.name != name);
        }
    }

    /// Returns the content of a text or CDATA node.
    pub fn node_text(&self, id: NodeId) -> Option<&str> {
        match self.node(id).kind {
            NodeKind::Text(ref text) | NodeKind::CData(ref text) => Some(text),
            _ => None,
        }
    }

    /// Replaces the content of a text or CDATA node.
    /// Does nothing for other node kinds.
    pub fn set_node_text(&mut self, id: NodeId, new_text: &str) {
        match self.node_mut(id).kind {
            NodeKind::Text(ref mut text) | NodeKind::CData(ref mut text) => {
                *text = new_text.to_string();
            }
            _ => {}
        }
    }

    fn push_node(&mut self, kind: NodeKind, line: Option<u32>) -> NodeId {
        let id = NodeId::from(self.nodes.len());
        self.nodes.push(NodeData {
            parent: None,
            prev_sibling: None,
            next_sibling: None,
            children: None,
            line,
            kind,
        });
        id
    }

    /// Creates a detached element node.
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.push_node(
            NodeKind::Element {
                tag_name: tag_name.to_string(),
                attributes: Vec::new(),
            },
            None,
        )
    }

    /// Creates a detached CDATA node.
    pub fn create_cdata(&mut self, text: &str) -> NodeId {
        self.push_node(NodeKind::CData(text.to_string()), None)
    }

    /// Appends a detached node as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.node(child).parent.is_none());

        let last = self.last_child(parent);
        self.node_mut(child).parent = Some(parent);
        self.node_mut(child).prev_sibling = last;
        if let Some(last) = last {
            self.node_mut(last).next_sibling = Some(child);
        }

        self.node_mut(parent).children = Some(match self.node(parent).children {
            Some((first, _)) => (first, child),
            None => (child, child),
        });
    }

    /// Inserts a detached node as the first child of `parent`.
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        match self.first_child(parent) {
            Some(first) => self.insert_before(child, first),
            None => self.append_child(parent, child),
        }
    }

    /// Inserts a detached node as the previous sibling of `reference`.
    ///
    /// # Panics
    ///
    /// Panics when `reference` has no parent.
    pub fn insert_before(&mut self, new: NodeId, reference: NodeId) {
        debug_assert!(self.node(new).parent.is_none());

        let parent = self
            .node(reference)
            .parent
            .expect("the reference node must be attached");
        let prev = self.node(reference).prev_sibling;

        self.node_mut(new).parent = Some(parent);
        self.node_mut(new).prev_sibling = prev;
        self.node_mut(new).next_sibling = Some(reference);
        self.node_mut(reference).prev_sibling = Some(new);

        match prev {
            Some(prev) => self.node_mut(prev).next_sibling = Some(new),
            None => {
                if let Some((_, last)) = self.node(parent).children {
                    self.node_mut(parent).children = Some((new, last));
                }
            }
        }
    }

    /// Unlinks the node from its parent and siblings.
    ///
    /// The node stays in the arena and keeps its children.
    pub fn detach(&mut self, id: NodeId) {
        let parent = match self.node(id).parent {
            Some(p) => p,
            None => return,
        };
        let prev = self.node(id).prev_sibling;
        let next = self.node(id).next_sibling;

        if let Some(prev) = prev {
            self.node_mut(prev).next_sibling = next;
        }
        if let Some(next) = next {
            self.node_mut(next).prev_sibling = prev;
        }

        let (first, last) = self.node(parent).children.unwrap();
        let first = if first == id { next } else { Some(first) };
        let last = if last == id { prev } else { Some(last) };
        self.node_mut(parent).children = match (first, last) {
            (Some(first), Some(last)) => Some((first, last)),
            _ => None,
        };

        let n = self.node_mut(id);
        n.parent = None;
        n.prev_sibling = None;
        n.next_sibling = None;
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        fn print_children(
            doc: &Document,
            parent: NodeId,
            depth: usize,
            f: &mut std::fmt::Formatter,
        ) -> Result<(), std::fmt::Error> {
            for child in doc.children(parent) {
                for _ in 0..depth {
                    write!(f, "    ")?;
                }
                match doc.kind(child) {
                    NodeKind::Element {
                        tag_name,
                        attributes,
                    } => {
                        writeln!(f, "Element {{ {:?}, {:?} }}", tag_name, attributes)?;
                        print_children(doc, child, depth + 1, f)?;
                    }
                    kind => writeln!(f, "{:?}", kind)?,
                }
            }
            Ok(())
        }

        writeln!(f, "Document [")?;
        print_children(self, self.root(), 1, f)?;
        write!(f, "]")
    }
}

/// An iterator over children nodes.
#[derive(Clone)]
pub struct Children<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.take()?;
        self.next = self.doc.next_sibling(id);
        Some(id)
    }
}

/// An iterator over all elements in document order.
#[derive(Clone)]
pub struct Elements<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl<'a> Iterator for Elements<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.take()?;
        self.next = self.doc.next_element(id);
        Some(id)
    }
}

/// A single editing operation.
///
/// Commands are applied in the order given, once per input file.
#[derive(Clone, Debug)]
pub enum Command {
    /// Inserts or updates a CSS class inside an embedded stylesheet.
    AddClass {
        /// `id` of the `style` element to edit. Empty matches a `style`
        /// without an `id`.
        style_id: String,
        /// The class name, without the leading dot.
        class_name: String,
        /// The color the class should set.
        color: Color,
    },
    /// Replaces every use of a literal color with a class reference.
    ColorToClass {
        /// The color to look for.
        color: Color,
        /// The class to apply instead.
        class_name: String,
    },
    /// Strips literal `color` declarations from every element.
    Reapply,
}

impl Command {
    /// Applies the command to a document.
    pub fn apply(&self, doc: &mut Document) -> Result<(), Error> {
        match *self {
            Command::AddClass {
                ref style_id,
                ref class_name,
                color,
            } => {
                add_class(doc, style_id, class_name, color);
                Ok(())
            }
            Command::ColorToClass {
                color,
                ref class_name,
            } => color_to_class(doc, color, class_name),
            Command::Reapply => {
                reapply(doc);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_root() -> Document {
        Document::parse_str("<svg xmlns='http://www.w3.org/2000/svg'><a/><b/><c/></svg>").unwrap()
    }

    fn tags(doc: &Document) -> Vec<String> {
        doc.elements()
            .map(|id| doc.tag_name(id).unwrap().to_string())
            .collect()
    }

    #[test]
    fn insert_before_first() {
        let mut doc = doc_with_root();
        let a = doc.elements().find(|&id| doc.tag_name(id) == Some("a")).unwrap();
        let new = doc.create_element("new");
        doc.insert_before(new, a);
        assert_eq!(tags(&doc), ["svg", "new", "a", "b", "c"]);
    }

    #[test]
    fn wrap_middle_child() {
        let mut doc = doc_with_root();
        let b = doc.elements().find(|&id| doc.tag_name(id) == Some("b")).unwrap();
        let g = doc.create_element("g");
        doc.insert_before(g, b);
        doc.detach(b);
        doc.append_child(g, b);
        assert_eq!(tags(&doc), ["svg", "a", "g", "b", "c"]);
        assert_eq!(doc.parent(b), Some(g));
    }

    #[test]
    fn detach_last_child() {
        let mut doc = doc_with_root();
        let c = doc.elements().find(|&id| doc.tag_name(id) == Some("c")).unwrap();
        let b = doc.elements().find(|&id| doc.tag_name(id) == Some("b")).unwrap();
        doc.detach(c);
        assert_eq!(tags(&doc), ["svg", "a", "b"]);
        assert_eq!(doc.last_child(doc.root_element()), Some(b));
    }

    #[test]
    fn attributes_keep_positions() {
        let mut doc =
            Document::parse_str("<svg xmlns='http://www.w3.org/2000/svg' class='x' fill='red'/>")
                .unwrap();
        let svg = doc.root_element();
        doc.set_attribute(svg, "class", "y");
        assert_eq!(doc.attributes(svg)[0].name, "class");
        assert_eq!(doc.attribute(svg, "class"), Some("y"));
        doc.remove_attribute(svg, "fill");
        assert!(!doc.has_attribute(svg, "fill"));
    }
}

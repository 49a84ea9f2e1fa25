// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::css;
use crate::{Color, Document, NodeId};

/// Inserts or updates the `.class_name { color: ... }` rule inside
/// an embedded stylesheet.
///
/// The `style` element is looked up by its `id` attribute; an empty
/// `style_id` matches a `style` without one. When no such element exists,
/// a new `<style type="text/css">` is prepended into `<defs>`, creating
/// the `defs` element as the first child of the root when necessary.
///
/// When a top-level `.class_name` rule with a `color` declaration already
/// exists, only the declaration's value is patched, so repeated calls do
/// not grow the stylesheet.
pub fn add_class(doc: &mut Document, style_id: &str, class_name: &str, color: Color) {
    let style = doc.elements().find(|&id| {
        doc.tag_name(id) == Some("style") && doc.attribute(id, "id").unwrap_or("") == style_id
    });
    let style = match style {
        Some(id) => id,
        None => create_style_element(doc, style_id),
    };

    let hex = color.to_string();

    let text_children: Vec<NodeId> = doc
        .children(style)
        .filter(|&child| doc.node_text(child).is_some())
        .collect();

    for &child in &text_children {
        // The node text has to be cloned, patching happens in place.
        let text = match doc.node_text(child) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => continue,
        };

        let mut from = 0;
        while let Some(body) = css::find_rule(&text, class_name, from) {
            if let Some(value) = css::find_color_in_rule(&text, body) {
                let patched = css::replace_range(&text, value, &hex);
                doc.set_node_text(child, &patched);
                return;
            }
            log::warn!(
                "A '.{}' rule without a 'color' declaration was skipped.",
                class_name
            );
            // The rescan restarts past the whole rule, selectors nested
            // in its body are not top-level.
            from = match css::skip_rule(&text, body) {
                Some(end) => end,
                None => break,
            };
        }
    }

    // No patchable rule, append a new one.
    let rule = format!("\n.{}{{ color:{}; }}\n", class_name, hex);
    match text_children.first() {
        Some(&first) => {
            let mut text = doc.node_text(first).unwrap_or("").to_string();
            text.push_str(&rule);
            doc.set_node_text(first, &text);
        }
        None => {
            let cdata = doc.create_cdata(&rule);
            doc.prepend_child(style, cdata);
        }
    }
}

fn create_style_element(doc: &mut Document, style_id: &str) -> NodeId {
    let defs = doc.elements().find(|&id| doc.tag_name(id) == Some("defs"));
    let defs = match defs {
        Some(id) => id,
        None => {
            let defs = doc.create_element("defs");
            let root = doc.root_element();
            doc.prepend_child(root, defs);
            defs
        }
    };

    let style = doc.create_element("style");
    doc.set_attribute(style, "type", "text/css");
    if !style_id.is_empty() {
        doc.set_attribute(style, "id", style_id);
    }
    doc.prepend_child(defs, style);
    style
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::css;
use crate::{Document, Error, NodeId};

/// Applies a CSS class to an element that is about to lose its literal
/// color.
///
/// Any literal `color` attribute or inline-style declaration is removed
/// first. Gradient `stop` elements cannot carry a class themselves, so the
/// class is promoted to the group enclosing the gradient, synthesizing the
/// group when necessary. An element that already carries a foreign class
/// keeps it on a new wrapper group instead.
pub fn apply_class(doc: &mut Document, node: NodeId, class_name: &str) -> Result<(), Error> {
    doc.remove_attribute(node, "color");
    if let Some(style) = doc.attribute(node, "style") {
        if let Some(stripped) = css::strip_declaration(style, "color") {
            doc.set_attribute(node, "style", &stripped);
        }
    }

    let target = if doc.tag_name(node) == Some("stop") {
        match promote_to_gradient_group(doc, node, class_name)? {
            Some(group) => group,
            // The group already carries the class.
            None => return Ok(()),
        }
    } else {
        let class = doc.attribute(node, "class").unwrap_or("").to_string();
        if has_class_token(&class, class_name) {
            return Ok(());
        }
        if !class.is_empty() {
            wrap_in_group(doc, node, &class);
        }
        node
    };

    doc.set_attribute(target, "class", class_name);
    Ok(())
}

/// Finds the group that owns the color of a gradient `stop` and checks
/// that the class can be applied to it.
///
/// Returns `None` when the group already carries `class_name`.
fn promote_to_gradient_group(
    doc: &mut Document,
    stop: NodeId,
    class_name: &str,
) -> Result<Option<NodeId>, Error> {
    let mut gradient = None;
    let mut ancestor = doc.parent(stop);
    while let Some(id) = ancestor {
        match doc.tag_name(id) {
            Some("linearGradient") | Some("radialGradient") => {
                gradient = Some(id);
                break;
            }
            Some(_) => ancestor = doc.parent(id),
            None => break,
        }
    }
    let gradient = match gradient {
        Some(id) => id,
        None => {
            return Err(Error::MissingGradientAncestor {
                line: doc.line(stop),
            });
        }
    };

    // The gradient's parent must exist: at the very least it's the root.
    let parent = doc.parent(gradient).unwrap();
    if doc.tag_name(parent) == Some("g") {
        let class = doc.attribute(parent, "class").unwrap_or("");
        if !class.is_empty() {
            if has_class_token(class, class_name) {
                return Ok(None);
            }
            return Err(Error::ConflictingGradientClass {
                line: doc.line(stop),
                in_use: class.to_string(),
                requested: class_name.to_string(),
            });
        }
        Ok(Some(parent))
    } else {
        let group = doc.create_element("g");
        doc.insert_before(group, gradient);
        doc.detach(gradient);
        doc.append_child(group, gradient);
        Ok(Some(group))
    }
}

/// Wraps an element carrying a foreign class into a new group.
///
/// The group takes over the element's class list along with any
/// `currentColor` fill/stroke the element shares with its siblings-to-be.
fn wrap_in_group(doc: &mut Document, node: NodeId, class: &str) {
    let group = doc.create_element("g");
    doc.set_attribute(group, "class", class);
    doc.insert_before(group, node);
    doc.detach(node);
    doc.append_child(group, node);

    for name in &["fill", "stroke"] {
        if doc.attribute(node, name) == Some("currentColor") {
            doc.remove_attribute(node, name);
            doc.set_attribute(group, name, "currentColor");
        }

        let style = doc.attribute(node, "style").unwrap_or("").to_string();
        if let Some(d) = css::find_declaration(&style, name) {
            if &style[d.value_range()] == "currentColor" {
                if let Some(stripped) = css::strip_declaration(&style, name) {
                    doc.set_attribute(node, "style", &stripped);
                }
                let mut group_style = doc.attribute(group, "style").unwrap_or("").to_string();
                group_style.push_str(name);
                group_style.push_str(":currentColor;");
                doc.set_attribute(group, "style", &group_style);
            }
        }
    }
}

fn has_class_token(class: &str, token: &str) -> bool {
    class.split_whitespace().any(|t| t == token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Document, Indent, WriteOptions};

    fn run(svg: &str, class_name: &str) -> String {
        let mut doc = Document::parse_str(svg).unwrap();
        let node = doc
            .elements()
            .find(|&id| doc.tag_name(id) == Some("rect"))
            .unwrap();
        apply_class(&mut doc, node, class_name).unwrap();
        doc.to_string(&WriteOptions {
            indent: Indent::None,
        })
    }

    #[test]
    fn plain_element_gets_the_class() {
        assert_eq!(
            run("<svg><rect/></svg>", "c1"),
            "<svg><rect class=\"c1\"/></svg>"
        );
    }

    #[test]
    fn literal_color_is_removed() {
        assert_eq!(
            run("<svg><rect color='red' style='color:red;fill:blue'/></svg>", "c1"),
            "<svg><rect style=\"fill:blue\" class=\"c1\"/></svg>"
        );
    }

    #[test]
    fn existing_class_is_kept_on_a_wrapper() {
        assert_eq!(
            run("<svg><rect class='old'/></svg>", "c1"),
            "<svg><g class=\"old\"><rect class=\"c1\"/></g></svg>"
        );
    }

    #[test]
    fn applying_twice_is_a_no_op() {
        assert_eq!(
            run("<svg><rect class='c1'/></svg>", "c1"),
            "<svg><rect class=\"c1\"/></svg>"
        );
    }

    #[test]
    fn current_color_moves_to_the_wrapper() {
        assert_eq!(
            run(
                "<svg><rect class='old' fill='currentColor' style='stroke:currentColor'/></svg>",
                "c1"
            ),
            "<svg><g class=\"old\" fill=\"currentColor\" style=\"stroke:currentColor;\">\
             <rect class=\"c1\" style=\"\"/></g></svg>"
        );
    }

    #[test]
    fn stop_without_a_gradient_fails() {
        let mut doc = Document::parse_str("<svg><stop stop-color='red'/></svg>").unwrap();
        let stop = doc
            .elements()
            .find(|&id| doc.tag_name(id) == Some("stop"))
            .unwrap();
        assert!(matches!(
            apply_class(&mut doc, stop, "c1"),
            Err(Error::MissingGradientAncestor { .. })
        ));
    }
}

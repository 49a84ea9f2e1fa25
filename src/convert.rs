// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::css;
use crate::{apply_class, Color, Document, Error};

/// The attributes that can carry a paint color.
const COLOR_ATTRIBUTES: &[&str] = &["fill", "stroke", "stop-color"];

/// Replaces every exact use of `color` with a reference to `class_name`.
///
/// Walks all elements in document order and inspects `fill`, `stroke` and
/// `stop-color`, both as attributes and as inline-style declarations. Each
/// match is handed to [`apply_class`] and then rewritten to the literal
/// token `currentColor`. The first application failure aborts the whole
/// traversal.
pub fn color_to_class(doc: &mut Document, color: Color, class_name: &str) -> Result<(), Error> {
    let mut cur = Some(doc.root_element());
    while let Some(node) = cur {
        for name in COLOR_ATTRIBUTES {
            let value = doc.attribute(node, name).map(str::to_string);
            if let Some(value) = value {
                if Color::parse(&value) == Some(color) {
                    apply_class(doc, node, class_name)?;
                    doc.set_attribute(node, name, "currentColor");
                }
            }

            let style = doc.attribute(node, "style").map(str::to_string);
            if let Some(style) = style {
                if let Some(d) = css::find_declaration(&style, name) {
                    if Color::parse(&style[d.value_range()]) == Some(color) {
                        apply_class(doc, node, class_name)?;
                        // The applicator may have rewritten the style
                        // string, so the declaration is located again.
                        let style = doc.attribute(node, "style").unwrap_or("").to_string();
                        if let Some(d) = css::find_declaration(&style, name) {
                            let patched =
                                css::replace_range(&style, d.value_range(), "currentColor");
                            doc.set_attribute(node, "style", &patched);
                        }
                    }
                }
            }
        }

        cur = doc.next_element(node);
    }

    Ok(())
}

/// Strips literal `color` attributes and inline-style declarations from
/// every element.
///
/// External editors tend to reintroduce literal colors; this pass restores
/// elements to the inherited, class-based color. Uses the same traversal
/// order as [`color_to_class`].
pub fn reapply(doc: &mut Document) {
    let mut cur = Some(doc.root_element());
    while let Some(node) = cur {
        doc.remove_attribute(node, "color");

        let style = doc.attribute(node, "style").map(str::to_string);
        if let Some(style) = style {
            if let Some(stripped) = css::strip_declaration(&style, "color") {
                doc.set_attribute(node, "style", &stripped);
            }
        }

        cur = doc.next_element(node);
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svgclass::{Color, Command, Document, Error, Indent, WriteOptions};

fn red() -> Color {
    Color::new(255, 0, 0)
}

fn apply(svg: &str, commands: &[Command]) -> String {
    let mut doc = Document::parse_str(svg).unwrap();
    for command in commands {
        command.apply(&mut doc).unwrap();
    }
    doc.to_string(&WriteOptions {
        indent: Indent::None,
    })
}

fn color_to_class(color: Color, class_name: &str) -> Command {
    Command::ColorToClass {
        color,
        class_name: class_name.to_string(),
    }
}

fn add_class(style_id: &str, class_name: &str, color: Color) -> Command {
    Command::AddClass {
        style_id: style_id.to_string(),
        class_name: class_name.to_string(),
        color,
    }
}

#[test]
fn attribute_substitution() {
    assert_eq!(
        apply(
            "<svg xmlns=\"http://www.w3.org/2000/svg\"><rect fill=\"red\"/></svg>",
            &[color_to_class(red(), "c1")]
        ),
        "<svg xmlns=\"http://www.w3.org/2000/svg\">\
         <rect fill=\"currentColor\" class=\"c1\"/></svg>"
    );
}

#[test]
fn equivalent_color_notations_match() {
    assert_eq!(
        apply(
            "<svg><rect fill=\"#FF0000\"/><rect fill=\"rgb(100%, 0, 0)\"/></svg>",
            &[color_to_class(red(), "c1")]
        ),
        "<svg><rect fill=\"currentColor\" class=\"c1\"/>\
         <rect fill=\"currentColor\" class=\"c1\"/></svg>"
    );
}

#[test]
fn second_pass_is_a_no_op() {
    let svg = "<svg><rect fill=\"red\"/><circle stroke=\"red\"/></svg>";
    let commands = [color_to_class(red(), "c1")];
    let once = apply(svg, &commands);
    assert_eq!(apply(&once, &commands), once);
}

#[test]
fn style_declaration_substitution() {
    assert_eq!(
        apply(
            "<svg><circle style=\"fill:red;stroke:blue\"/></svg>",
            &[color_to_class(red(), "c1")]
        ),
        "<svg><circle style=\"fill:currentColor;stroke:blue\" class=\"c1\"/></svg>"
    );
}

#[test]
fn existing_class_moves_to_a_wrapper() {
    assert_eq!(
        apply(
            "<svg><rect class=\"shadow\" fill=\"red\"/></svg>",
            &[color_to_class(red(), "c1")]
        ),
        "<svg><g class=\"shadow\"><rect class=\"c1\" fill=\"currentColor\"/></g></svg>"
    );
}

#[test]
fn gradient_stop_gets_a_synthesized_group() {
    assert_eq!(
        apply(
            "<svg><linearGradient id=\"lg\">\
             <stop offset=\"0\" stop-color=\"red\"/></linearGradient></svg>",
            &[color_to_class(red(), "c1")]
        ),
        "<svg><g class=\"c1\"><linearGradient id=\"lg\">\
         <stop offset=\"0\" stop-color=\"currentColor\"/></linearGradient></g></svg>"
    );
}

#[test]
fn gradient_in_a_plain_group_reuses_it() {
    assert_eq!(
        apply(
            "<svg><g><radialGradient><stop stop-color=\"red\"/></radialGradient></g></svg>",
            &[color_to_class(red(), "c1")]
        ),
        "<svg><g class=\"c1\"><radialGradient>\
         <stop stop-color=\"currentColor\"/></radialGradient></g></svg>"
    );
}

#[test]
fn conflicting_gradient_class_fails() {
    let mut doc = Document::parse_str(
        "<svg><g class=\"other\"><linearGradient>\
         <stop stop-color=\"red\"/></linearGradient></g></svg>",
    )
    .unwrap();
    let err = svgclass::color_to_class(&mut doc, red(), "c1").unwrap_err();
    assert!(matches!(err, Error::ConflictingGradientClass { .. }));
    assert_eq!(err.exit_code(), 9);

    // The failed conversion must leave the document alone.
    let stop = doc
        .elements()
        .find(|&id| doc.tag_name(id) == Some("stop"))
        .unwrap();
    assert_eq!(doc.attribute(stop, "stop-color"), Some("red"));
    let group = doc.elements().find(|&id| doc.tag_name(id) == Some("g")).unwrap();
    assert_eq!(doc.attribute(group, "class"), Some("other"));
}

#[test]
fn stop_outside_a_gradient_fails() {
    let mut doc =
        Document::parse_str("<svg>\n<stop stop-color=\"red\"/>\n</svg>").unwrap();
    let err = svgclass::color_to_class(&mut doc, red(), "c1").unwrap_err();
    match err {
        Error::MissingGradientAncestor { line } => assert_eq!(line, Some(2)),
        _ => panic!("unexpected error: {:?}", err),
    }
}

#[test]
fn add_class_creates_defs_style_and_cdata() {
    assert_eq!(
        apply("<svg/>", &[add_class("", "c1", red())]),
        "<svg><defs><style type=\"text/css\">\
         <![CDATA[\n.c1{ color:#ff0000; }\n]]></style></defs></svg>"
    );
}

#[test]
fn add_class_updates_an_existing_rule() {
    assert_eq!(
        apply(
            "<svg><defs><style>.c1{ color:#000000; }</style></defs></svg>",
            &[add_class("", "c1", red())]
        ),
        "<svg><defs><style>.c1{ color:#ff0000; }</style></defs></svg>"
    );
}

#[test]
fn add_class_is_idempotent() {
    let once = apply("<svg/>", &[add_class("", "c1", red())]);
    let twice = apply("<svg/>", &[add_class("", "c1", red()), add_class("", "c1", red())]);
    assert_eq!(once, twice);
}

#[test]
fn add_class_appends_to_existing_text() {
    assert_eq!(
        apply(
            "<svg><style>.other{ fill:red; }</style></svg>",
            &[add_class("", "c1", red())]
        ),
        "<svg><style>.other{ fill:red; }\n.c1{ color:#ff0000; }\n</style></svg>"
    );
}

#[test]
fn add_class_ignores_nested_rules() {
    // The nested selector is not a top-level rule, so a fresh rule
    // is appended instead of patching it.
    assert_eq!(
        apply(
            "<svg><style>.c1{ .c1{ color:#000; } }</style></svg>",
            &[add_class("", "c1", red())]
        ),
        "<svg><style>.c1{ .c1{ color:#000; } }\n.c1{ color:#ff0000; }\n</style></svg>"
    );
}

#[test]
fn add_class_selects_the_stylesheet_by_id() {
    assert_eq!(
        apply(
            "<svg><style id=\"a\">.c1{ color:#000; }</style>\
             <style id=\"b\">.c1{ color:#000; }</style></svg>",
            &[add_class("b", "c1", red())]
        ),
        "<svg><style id=\"a\">.c1{ color:#000; }</style>\
         <style id=\"b\">.c1{ color:#ff0000; }</style></svg>"
    );
}

#[test]
fn reapply_strips_literal_colors() {
    assert_eq!(
        apply(
            "<svg color=\"red\"><rect color=\"blue\" \
             style=\"color:red;fill:currentColor\"/></svg>",
            &[Command::Reapply]
        ),
        "<svg><rect style=\"fill:currentColor\"/></svg>"
    );
}

#[test]
fn full_pipeline() {
    assert_eq!(
        apply(
            "<svg xmlns=\"http://www.w3.org/2000/svg\">\
             <rect fill=\"red\"/><circle stroke=\"red\"/></svg>",
            &[add_class("", "c1", red()), color_to_class(red(), "c1")]
        ),
        "<svg xmlns=\"http://www.w3.org/2000/svg\">\
         <defs><style type=\"text/css\"><![CDATA[\n.c1{ color:#ff0000; }\n]]></style></defs>\
         <rect fill=\"currentColor\" class=\"c1\"/>\
         <circle stroke=\"currentColor\" class=\"c1\"/></svg>"
    );
}

#[test]
fn namespace_declarations_survive() {
    let svg = "<svg xmlns=\"http://www.w3.org/2000/svg\" \
               xmlns:xlink=\"http://www.w3.org/1999/xlink\">\
               <use xlink:href=\"#a\"/></svg>";
    let doc = Document::parse_str(svg).unwrap();
    let text = doc.to_string(&WriteOptions {
        indent: Indent::None,
    });
    assert!(text.contains("xmlns:xlink=\"http://www.w3.org/1999/xlink\""));
    assert!(text.contains("<use xlink:href=\"#a\"/>"));
}

#[test]
fn serialization_is_stable() {
    let svg = "<svg xmlns=\"http://www.w3.org/2000/svg\">\n\
               \x20 <defs>\n\
               \x20   <style>.c1{ color:#ff0000; }</style>\n\
               \x20 </defs>\n\
               \x20 <!-- shapes -->\n\
               \x20 <rect fill=\"currentColor\" class=\"c1\"/>\n\
               </svg>\n";
    let doc = Document::parse_str(svg).unwrap();

    for indent in &[Indent::None, Indent::Spaces(2), Indent::Tabs] {
        let opt = WriteOptions { indent: *indent };
        let first = doc.to_string(&opt);
        let reparsed = Document::parse_str(&first).unwrap();
        assert_eq!(reparsed.to_string(&opt), first);
    }
}

#[test]
fn indented_output() {
    let mut doc = Document::parse_str("<svg><g><rect fill=\"red\"/></g></svg>").unwrap();
    color_to_class(red(), "c1").apply(&mut doc).unwrap();
    assert_eq!(
        doc.to_string(&WriteOptions::default()),
        "<svg>\n  <g>\n    <rect fill=\"currentColor\" class=\"c1\"/>\n  </g>\n</svg>\n"
    );
}

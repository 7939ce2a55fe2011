use rowan::{GreenNode, SyntaxKind, TextRange, TextSize};

use super::*;
use crate::host::{ErrorElement, HostTree};
use crate::sample;

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(TextSize::from(start), TextSize::from(end))
}

#[test]
fn from_clean_tree() {
    let tree = sample::parse("var a = 1;").unwrap();

    let diagnostics = Diagnostics::from_tree(&tree);

    assert!(diagnostics.is_empty());
    assert!(!diagnostics.has_errors());
}

#[test]
fn failed_rule_reported_once() {
    let tree = sample::parse("var a;").unwrap();

    let diagnostics = Diagnostics::from_tree(&tree);

    assert_eq!(
        diagnostics.iter().cloned().collect::<Vec<_>>(),
        vec![Diagnostic {
            range: range(0, 6),
            message: "mismatched input ';' expecting '='".to_owned(),
        }]
    );
}

#[test]
fn merged_messages_split() {
    let tree = HostTree {
        green: GreenNode::new(SyntaxKind(1), Vec::new()),
        errors: vec![ErrorElement {
            range: range(0, 0),
            message: "first\nsecond".to_owned(),
        }],
    };

    let diagnostics = Diagnostics::from_tree(&tree);

    let messages: Vec<&str> = diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(messages, ["first", "second"]);
}

#[test]
fn printer_plain_without_source() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.push(range(0, 1), "first");
    diagnostics.push(range(4, 4), "second");

    insta::assert_snapshot!(diagnostics.printer().render(), @r"
    error at 0..1: first
    error at 4..4: second
    ");
}

#[test]
fn printer_bad_char() {
    let src = "# var a = 1;";
    let tree = sample::parse(src).unwrap();

    let result = Diagnostics::from_tree(&tree).render(src);

    insta::assert_snapshot!(result, @r"
    error: extraneous input '#' expecting {<EOF>, 'func', 'var', 'return', '{', ID}
      |
    1 | # var a = 1;
      | ^
    ");
}

#[test]
fn printer_zero_width_span() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.push(TextRange::empty(0.into()), "<missing 'x'>");

    let result = diagnostics.printer().source("hello").render();

    insta::assert_snapshot!(result, @r"
    error: <missing 'x'>
      |
    1 | hello
      | ^
    ");
}

#[test]
fn printer_with_path() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.push(range(0, 5), "test error");

    let result = diagnostics
        .printer()
        .source("hello world")
        .path("test.sample")
        .render();

    insta::assert_snapshot!(result, @r"
    error: test error
     --> test.sample:1:1
      |
    1 | hello world
      | ^^^^^
    ");
}

#[test]
fn printer_colored() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.push(range(0, 5), "test");

    let result = diagnostics.render_colored("hello", true);

    assert!(result.contains("test"));
    assert!(result.contains('\x1b'));
}

#[test]
fn printer_empty_diagnostics() {
    let diagnostics = Diagnostics::new();

    assert!(diagnostics.render("source").is_empty());
}

#[test]
fn printer_second_line() {
    let src = "var a = 1\nvar b = 2;";
    let tree = sample::parse(src).unwrap();

    let result = Diagnostics::from_tree(&tree).render(src);

    assert!(result.starts_with("error: <missing ';'>"), "{result}");
    assert!(result.contains("2 | var b = 2;"), "{result}");
}

#[test]
fn printer_groups_errors_on_one_line() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.push(range(6, 7), "first");
    diagnostics.push(range(7, 7), "second");
    diagnostics.push(range(9, 10), "third");

    let result = diagnostics.render("var a 1;\nb;");

    assert_eq!(result.matches("error:").count(), 2, "{result}");
    assert!(result.starts_with("error: first"), "{result}");
    assert!(result.contains("second"), "{result}");
    assert!(!result.contains("error: second"), "{result}");
    assert!(result.contains("error: third"), "{result}");
}

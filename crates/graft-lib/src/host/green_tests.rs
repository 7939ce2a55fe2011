use std::fmt::Write;

use graft_core::ElementTypes;
use rowan::{NodeOrToken, SyntaxKind, TextRange, TextSize};

use super::{ErrorElement, GreenTreeBuilder, HostTree, SyntaxNode, TokenCursor, TreeBuilder};
use crate::testing::{PAIR, XYZ, host_tokens};

fn builder(src: &str) -> GreenTreeBuilder<'_> {
    GreenTreeBuilder::new(src, host_tokens(src), XYZ.element_types(), XYZ.trivia())
}

fn file() -> SyntaxKind {
    SyntaxKind(ElementTypes::FILE)
}

fn pair() -> SyntaxKind {
    SyntaxKind(XYZ.element_types().rule(PAIR))
}

fn dump(tree: &HostTree) -> String {
    let mut out = String::new();
    dump_node(&tree.syntax(), 0, &mut out);
    out
}

fn dump_node(node: &SyntaxNode, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    writeln!(out, "{indent}{}", XYZ.element_name(node.kind())).unwrap();
    for child in node.children_with_tokens() {
        match child {
            NodeOrToken::Node(n) => dump_node(&n, depth + 1, out),
            NodeOrToken::Token(t) => writeln!(
                out,
                "{indent}  {} {:?}",
                XYZ.element_name(t.kind()),
                t.text()
            )
            .unwrap(),
        }
    }
}

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(TextSize::from(start), TextSize::from(end))
}

#[test]
fn cursor_skips_trivia() {
    let mut b = builder(" x ");

    assert_eq!(b.current_text(), "x");
    assert_eq!(b.current_offset(), TextSize::from(1));
    assert_eq!(b.significant_len(), 1);

    b.advance();
    assert!(b.at_end());
    assert_eq!(b.current_kind(), None);
    assert_eq!(b.current_text(), "");
    assert_eq!(b.current_offset(), TextSize::from(3));

    b.advance();
    assert_eq!(b.position(), 1);
}

#[test]
fn trivia_stays_outside_nodes() {
    let src = " x y ";
    let mut b = builder(src);
    let root = b.mark();
    let m = b.mark();
    b.advance();
    b.advance();
    b.done(m, pair());
    b.done(root, file());
    let tree = b.finish();

    insta::assert_snapshot!(dump(&tree), @r#"
    FILE
      WS " "
      pair
        X "x"
        WS " "
        Y "y"
      WS " "
    "#);
    assert_eq!(tree.syntax().text().to_string(), src);
    assert!(!tree.has_errors());
}

#[test]
fn zero_width_error() {
    let mut b = builder("x");
    let root = b.mark();
    let m = b.mark();
    b.advance();
    let e = b.mark();
    b.error(e, "missing 'y'");
    b.done(m, pair());
    b.done(root, file());
    let tree = b.finish();

    insta::assert_snapshot!(dump(&tree), @r#"
    FILE
      pair
        X "x"
        ERROR
    "#);
    assert_eq!(
        tree.errors,
        vec![ErrorElement {
            range: range(1, 1),
            message: "missing 'y'".to_owned(),
        }]
    );
}

#[test]
fn error_elements_in_preorder() {
    let mut b = builder("xzy");
    let root = b.mark();
    let outer = b.mark();
    let inner = b.mark();
    b.advance();
    b.error(inner, "inner");
    b.advance();
    b.error(outer, "outer");
    let last = b.mark();
    b.advance();
    b.error(last, "last");
    b.done(root, file());
    let tree = b.finish();

    let errors: Vec<_> = tree
        .errors
        .iter()
        .map(|e| (e.message.as_str(), e.range))
        .collect();
    assert_eq!(
        errors,
        vec![
            ("outer", range(0, 2)),
            ("inner", range(0, 1)),
            ("last", range(2, 3)),
        ]
    );
}

#[test]
fn rollback_discards_and_rewinds() {
    let mut b = builder("xy");
    let root = b.mark();
    let m = b.mark();
    b.advance();
    b.advance();
    b.rollback_to(m);
    assert_eq!(b.position(), 0);

    let m = b.mark();
    b.advance();
    b.done(m, pair());
    b.advance();
    b.done(root, file());
    let tree = b.finish();

    insta::assert_snapshot!(dump(&tree), @r#"
    FILE
      pair
        X "x"
      Y "y"
    "#);
}

#[test]
fn bad_chars_are_error_tokens() {
    let mut b = builder("x#");
    let root = b.mark();
    b.advance();
    assert_eq!(b.current_kind(), Some(SyntaxKind(ElementTypes::ERROR)));
    b.advance();
    b.done(root, file());
    let tree = b.finish();

    insta::assert_snapshot!(dump(&tree), @r##"
    FILE
      X "x"
      ERROR "#"
    "##);
    // Error tokens are not error elements.
    assert!(tree.errors.is_empty());
}

#[test]
#[should_panic(expected = "closed out of order")]
fn closing_outer_marker_first_panics() {
    let mut b = builder("x");
    let outer = b.mark();
    let _inner = b.mark();
    b.done(outer, file());
}

#[test]
#[should_panic(expected = "finish with 1 open markers")]
fn finish_with_open_marker_panics() {
    let mut b = builder("x");
    let _root = b.mark();
    b.finish();
}

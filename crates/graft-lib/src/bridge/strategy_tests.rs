use graft_core::{TokenSet, TokenType};
use rowan::{TextRange, TextSize};

use super::AnchoringErrorStrategy;
use crate::runtime::{DefaultErrorStrategy, ErrorStrategy, ParseNode, Parser, Token, TokenSource};
use crate::testing::{EOF, PAIR, X, XYZ, Y, Z, parser};
use crate::Error;

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

/// Leaves under the root rule, after running `body` inside `pair`.
fn leaves(
    mut p: Parser<'_>,
    body: impl FnOnce(&mut Parser<'_>) -> Result<(), Error>,
) -> Vec<ParseNode> {
    p.rule(PAIR, |p| {
        body(p)?;
        Ok(())
    })
    .unwrap();
    let tree = p.finish();
    let root = tree.root().unwrap();
    tree.children(root)
        .iter()
        .map(|&id| tree.node(id).clone())
        .collect()
}

#[test]
fn missing_symbol_takes_span_of_next_token() {
    let mut p = parser("xz");

    p.rule(PAIR, |p| {
        p.consume()?;
        let token = AnchoringErrorStrategy.missing_symbol(p, Y)?;
        assert_eq!(token.span, Some(range(1, 2)));
        assert_eq!(token.span, p.lt(1)?.span);
        assert_eq!(token.text, "<missing 'y'>");
        assert!(token.is_conjured());
        Ok(())
    })
    .unwrap();
}

#[test]
fn missing_symbol_at_eof_sits_at_source_end() {
    let mut p = parser("x");

    p.rule(PAIR, |p| {
        p.consume()?;
        let token = AnchoringErrorStrategy.missing_symbol(p, Y)?;
        assert_eq!(token.span, Some(TextRange::empty(TextSize::from(1))));
        assert!(token.is_conjured());
        Ok(())
    })
    .unwrap();
}

#[test]
fn missing_symbol_on_empty_input() {
    let mut p = parser("");

    let anchored = AnchoringErrorStrategy.missing_symbol(&mut p, X).unwrap();
    let plain = DefaultErrorStrategy.missing_symbol(&mut p, X).unwrap();

    assert_eq!(anchored.span, Some(TextRange::empty(TextSize::from(0))));
    assert_eq!(plain.span, None);
}

/// Yields only an `EOF` without a position.
struct Unpositioned;

impl TokenSource for Unpositioned {
    fn next_token(&mut self) -> Result<Token, Error> {
        Ok(Token::conjured(TokenType::EOF, "<EOF>"))
    }
}

#[test]
fn missing_symbol_falls_back_to_source_start() {
    let mut p = Parser::new(Box::new(Unpositioned), XYZ.clone());

    let token = AnchoringErrorStrategy.missing_symbol(&mut p, Z).unwrap();

    assert_eq!(token.span, Some(TextRange::empty(TextSize::from(0))));
}

#[test]
fn consume_until_at_eof_leaves_error_node() {
    let nodes = leaves(parser(""), |p| {
        AnchoringErrorStrategy.consume_until(p, TokenSet::single(X))
    });

    assert_eq!(nodes.len(), 1);
    let ParseNode::Error(token) = &nodes[0] else {
        panic!("expected error leaf, got {:?}", nodes[0]);
    };
    assert_eq!(token.ty, EOF);
    assert_eq!(token.span, Some(TextRange::empty(TextSize::from(0))));

    let plain = leaves(parser(""), |p| {
        DefaultErrorStrategy.consume_until(p, TokenSet::single(X))
    });
    assert!(plain.is_empty());
}

#[test]
fn consume_until_mid_input_adds_no_eof_leaf() {
    let nodes = leaves(parser("z"), |p| {
        AnchoringErrorStrategy.consume_until(p, TokenSet::single(X))
    });

    assert_eq!(nodes.len(), 1);
    assert!(matches!(&nodes[0], ParseNode::Terminal(token) if token.ty == Z));
}

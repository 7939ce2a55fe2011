use graft_core::TokenType;
use rowan::{TextRange, TextSize};

use super::TokenBridge;
use crate::host::{GreenTreeBuilder, TokenCursor};
use crate::runtime::{CancellationToken, DEFAULT_CHANNEL, TokenSource};
use crate::testing::{EOF, X, XYZ, Y, host_tokens};
use crate::Error;

fn builder(src: &str) -> GreenTreeBuilder<'_> {
    GreenTreeBuilder::new(src, host_tokens(src), XYZ.element_types(), XYZ.trivia())
}

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(TextSize::from(start), TextSize::from(end))
}

#[test]
fn maps_host_tokens() {
    let mut host = builder(" x#y");
    let mut bridge = TokenBridge::new(&mut host, *XYZ.element_types(), CancellationToken::new());

    let x = bridge.next_token().unwrap();
    assert_eq!(x.ty, X);
    assert_eq!(x.text, "x");
    assert_eq!(x.span, Some(range(1, 2)));
    assert_eq!((x.start(), x.stop()), (Some(TextSize::from(1)), Some(TextSize::from(1))));
    assert_eq!(x.channel, DEFAULT_CHANNEL);
    assert_eq!((x.line, x.column), (0, 0));

    let bad = bridge.next_token().unwrap();
    assert_eq!(bad.ty, TokenType::INVALID);
    assert_eq!(bad.text, "#");

    assert_eq!(bridge.next_token().unwrap().ty, Y);
}

#[test]
fn eof_at_end_of_host() {
    let mut host = builder("x ");
    let mut bridge = TokenBridge::new(&mut host, *XYZ.element_types(), CancellationToken::new());

    bridge.next_token().unwrap();
    let eof = bridge.next_token().unwrap();
    let again = bridge.next_token().unwrap();

    assert_eq!(eof.ty, EOF);
    assert_eq!(eof.span, Some(range(2, 2)));
    assert_eq!(eof.stop(), None);
    assert_eq!(again.ty, EOF);
    drop(bridge);
    assert_eq!(host.position(), 1);
}

#[test]
fn advances_host_once_per_token() {
    let mut host = builder("x y x");
    let mut bridge = TokenBridge::new(&mut host, *XYZ.element_types(), CancellationToken::new());

    bridge.next_token().unwrap();
    bridge.next_token().unwrap();
    drop(bridge);

    assert_eq!(host.position(), 2);
    assert_eq!(host.current_text(), "x");
}

#[test]
fn cancelled_bridge_does_not_advance() {
    let cancel = CancellationToken::new();
    let mut host = builder("xy");
    let mut bridge = TokenBridge::new(&mut host, *XYZ.element_types(), cancel.clone());

    bridge.next_token().unwrap();
    cancel.cancel();

    assert_eq!(bridge.next_token().unwrap_err(), Error::Cancelled);
    drop(bridge);
    assert_eq!(host.position(), 1);
}

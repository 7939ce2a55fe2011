use super::TokenStream;
use crate::testing::{CharSource, EOF, X, Y};

fn stream(src: &str) -> TokenStream<'static> {
    TokenStream::new(Box::new(CharSource::new(src)))
}

#[test]
fn lookahead_skips_hidden_channel() {
    let mut s = stream("x y");

    assert_eq!(s.la(1).unwrap(), X);
    assert_eq!(s.la(2).unwrap(), Y);
    assert_eq!(s.lt(2).unwrap().index, Some(2));
    assert_eq!(s.la(3).unwrap(), EOF);
}

#[test]
fn lookahead_past_eof_stays_on_eof() {
    let mut s = stream("x");

    assert_eq!(s.la(2).unwrap(), EOF);
    assert_eq!(s.la(9).unwrap(), EOF);
    assert_eq!(s.buffered().len(), 2);
}

#[test]
fn fetches_lazily() {
    let mut s = stream("xyxy");

    s.lt(1).unwrap();
    assert_eq!(s.buffered().len(), 1);

    s.la(3).unwrap();
    assert_eq!(s.buffered().len(), 3);
}

#[test]
fn consume_and_look_back() {
    let mut s = stream("x y");

    s.consume().unwrap();
    assert_eq!(s.la(1).unwrap(), Y);
    assert_eq!(s.index(), 2);
    assert_eq!(s.lt_back(1).unwrap().text, "x");
    assert!(s.lt_back(2).is_none());
}

#[test]
fn consume_at_eof_is_noop() {
    let mut s = stream("x");

    s.consume().unwrap();
    s.consume().unwrap();
    s.consume().unwrap();

    assert_eq!(s.la(1).unwrap(), EOF);
    assert_eq!(s.index(), 1);
}

#[test]
fn seek_rewinds() {
    let mut s = stream("xy");

    s.consume().unwrap();
    s.consume().unwrap();
    s.seek(0).unwrap();

    assert_eq!(s.la(1).unwrap(), X);
}

#[test]
fn text_between_includes_hidden_tokens() {
    let mut s = stream("x y");

    s.la(2).unwrap();

    assert_eq!(s.text_between(0, 2), "x y");
    assert_eq!(s.text_between(2, 0), "");
}

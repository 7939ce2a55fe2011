use crate::{TokenSet, TokenType};

const A: TokenType = TokenType::new(3);
const B: TokenType = TokenType::new(70);
const C: TokenType = TokenType::new(200);

#[test]
fn contains_spans_all_words() {
    let set = TokenSet::new(&[A, B, C]);

    assert!(set.contains(A));
    assert!(set.contains(B));
    assert!(set.contains(C));
    assert!(!set.contains(TokenType::new(4)));
    assert_eq!(set.len(), 3);
}

#[test]
fn out_of_range_is_never_contained() {
    let set = TokenSet::new(&[A]);

    assert!(!set.contains(TokenType::new(1000)));
}

#[test]
fn eof_sorts_first() {
    let set = TokenSet::new(&[C, TokenType::EOF, A]);

    let members: Vec<_> = set.iter().collect();
    assert_eq!(members, vec![TokenType::EOF, A, C]);
    assert_eq!(set.first(), Some(TokenType::EOF));
}

#[test]
fn end_of_rule_is_not_a_member() {
    let set = TokenSet::EMPTY.with_end_of_rule();

    assert!(set.is_empty());
    assert!(set.contains_end_of_rule());
    assert!(!set.without_end_of_rule().contains_end_of_rule());
}

#[test]
fn union_merges_flags() {
    let left = TokenSet::single(A).with_end_of_rule();
    let right = TokenSet::single(TokenType::EOF);

    let both = left.union(right);
    assert!(both.contains(A));
    assert!(both.contains(TokenType::EOF));
    assert!(both.contains_end_of_rule());
}

#[test]
fn debug_lists_members() {
    let set = TokenSet::new(&[A, TokenType::EOF]).with_end_of_rule();

    assert_eq!(
        format!("{set:?}"),
        "{TokenType(EOF), TokenType(3), <EOR>}"
    );
}

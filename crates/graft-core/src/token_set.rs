//! Bitset of token types, used for expected sets and follow frames.

use crate::TokenType;

const WORDS: usize = 4;

/// Token types below this bound fit in a `TokenSet`.
pub const TOKEN_SET_CAPACITY: u16 = (WORDS * 64) as u16;

/// Set of token types plus two out-of-band members: `EOF` and the
/// end-of-rule marker used by follow frames ("whatever follows the caller").
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TokenSet {
    bits: [u64; WORDS],
    eof: bool,
    end_of_rule: bool,
}

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet {
        bits: [0; WORDS],
        eof: false,
        end_of_rule: false,
    };

    /// Follow frame of an invocation that ends its caller.
    pub const END_OF_RULE: TokenSet = TokenSet::EMPTY.with_end_of_rule();

    /// Panics at compile time if any type exceeds capacity.
    #[inline]
    pub const fn new(types: &[TokenType]) -> Self {
        let mut set = Self::EMPTY;
        let mut i = 0;
        while i < types.len() {
            set = set.with(types[i]);
            i += 1;
        }
        set
    }

    #[inline]
    pub const fn single(ty: TokenType) -> Self {
        Self::EMPTY.with(ty)
    }

    #[inline]
    pub const fn with(mut self, ty: TokenType) -> Self {
        if ty.is_eof() {
            self.eof = true;
            return self;
        }
        let raw = ty.raw();
        assert!(raw < TOKEN_SET_CAPACITY, "TokenType value exceeds TokenSet capacity");
        self.bits[(raw / 64) as usize] |= 1 << (raw % 64);
        self
    }

    #[inline]
    pub const fn with_end_of_rule(mut self) -> Self {
        self.end_of_rule = true;
        self
    }

    #[inline]
    pub const fn without_end_of_rule(mut self) -> Self {
        self.end_of_rule = false;
        self
    }

    #[inline]
    pub const fn contains(&self, ty: TokenType) -> bool {
        if ty.is_eof() {
            return self.eof;
        }
        let raw = ty.raw();
        if raw >= TOKEN_SET_CAPACITY {
            return false;
        }
        self.bits[(raw / 64) as usize] & (1 << (raw % 64)) != 0
    }

    #[inline]
    pub const fn contains_end_of_rule(&self) -> bool {
        self.end_of_rule
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        let mut bits = [0; WORDS];
        let mut i = 0;
        while i < WORDS {
            bits[i] = self.bits[i] | other.bits[i];
            i += 1;
        }
        TokenSet {
            bits,
            eof: self.eof || other.eof,
            end_of_rule: self.end_of_rule || other.end_of_rule,
        }
    }

    pub fn insert(&mut self, ty: TokenType) {
        *self = self.with(ty);
    }

    /// True when no token type is a member. The end-of-rule flag is not a token.
    pub fn is_empty(&self) -> bool {
        !self.eof && self.bits.iter().all(|w| *w == 0)
    }

    /// Members in ascending order, `EOF` first.
    pub fn iter(&self) -> impl Iterator<Item = TokenType> + '_ {
        let eof = self.eof.then_some(TokenType::EOF);
        let rest = (1..TOKEN_SET_CAPACITY)
            .map(TokenType::new)
            .filter(|ty| self.contains(*ty));
        eof.into_iter().chain(rest)
    }

    /// Smallest member (`EOF` sorts first), used to pick the type of a conjured token.
    pub fn first(&self) -> Option<TokenType> {
        self.iter().next()
    }

    pub fn len(&self) -> usize {
        let words: u32 = self.bits.iter().map(|w| w.count_ones()).sum();
        words as usize + usize::from(self.eof)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for ty in self.iter() {
            list.entry(&ty);
        }
        if self.end_of_rule {
            list.entry(&format_args!("<EOR>"));
        }
        list.finish()
    }
}

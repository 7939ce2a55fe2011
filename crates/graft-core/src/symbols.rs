//! Grammar symbols.

use std::fmt;

/// Token type of a grammar's vocabulary.
///
/// Index 0 is reserved for the invalid/unknown sentinel. `EOF` lives at the
/// top of the range and never appears in a vocabulary.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenType(u16);

impl TokenType {
    pub const INVALID: TokenType = TokenType(0);
    pub const EOF: TokenType = TokenType(u16::MAX);

    #[inline]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn is_eof(self) -> bool {
        self.0 == u16::MAX
    }

    #[inline]
    pub const fn is_invalid(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::EOF => f.write_str("TokenType(EOF)"),
            Self::INVALID => f.write_str("TokenType(INVALID)"),
            Self(raw) => write!(f, "TokenType({raw})"),
        }
    }
}

/// Index of a rule in a grammar's ordered rule-name list.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct RuleIndex(u16);

impl RuleIndex {
    #[inline]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

//! Buffered token stream with arbitrary lookahead and rewind.

use graft_core::TokenType;

use super::token::{DEFAULT_CHANNEL, Token, TokenSource};
use crate::Error;

/// Lazily buffers tokens from a `TokenSource`.
///
/// Every fetched token gets its buffer position as stream index. Lookahead
/// only sees the default channel; off-channel tokens stay in the buffer for
/// `text_between`. Fetching stops after the first `EOF`, so `EOF` is always
/// the last buffered token and lookahead past it keeps returning it.
pub struct TokenStream<'a> {
    source: Box<dyn TokenSource + 'a>,
    tokens: Vec<Token>,
    /// Buffer index of the current (`LT(1)`) token.
    p: usize,
    initialized: bool,
    fetched_eof: bool,
}

impl<'a> TokenStream<'a> {
    pub fn new(source: Box<dyn TokenSource + 'a>) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            p: 0,
            initialized: false,
            fetched_eof: false,
        }
    }

    /// Index of the current token.
    pub fn index(&self) -> usize {
        self.p
    }

    /// Type of the `k`-th lookahead token (1-based).
    pub fn la(&mut self, k: usize) -> Result<TokenType, Error> {
        Ok(self.lt(k)?.ty)
    }

    /// The `k`-th lookahead token (1-based).
    pub fn lt(&mut self, k: usize) -> Result<&Token, Error> {
        debug_assert!(k >= 1, "lookahead is 1-based");
        self.lazy_init()?;
        let mut i = self.p;
        for _ in 1..k {
            if self.tokens[i].ty.is_eof() {
                break;
            }
            i = self.next_on_channel(i + 1)?;
        }
        Ok(&self.tokens[i])
    }

    /// The `k`-th token behind the current one (1-based), default channel only.
    pub fn lt_back(&self, k: usize) -> Option<&Token> {
        self.tokens[..self.p.min(self.tokens.len())]
            .iter()
            .rev()
            .filter(|t| t.channel == DEFAULT_CHANNEL)
            .nth(k.checked_sub(1)?)
    }

    /// Moves past the current token. A no-op at `EOF`.
    pub fn consume(&mut self) -> Result<(), Error> {
        self.lazy_init()?;
        if self.tokens[self.p].ty.is_eof() {
            return Ok(());
        }
        self.p = self.next_on_channel(self.p + 1)?;
        Ok(())
    }

    /// Rewinds (or fast-forwards) to a previously observed index.
    pub fn seek(&mut self, index: usize) -> Result<(), Error> {
        self.lazy_init()?;
        self.p = self.next_on_channel(index)?;
        Ok(())
    }

    /// Concatenated text of buffered tokens `start..=stop`, all channels, `EOF` excluded.
    pub fn text_between(&self, start: usize, stop: usize) -> String {
        let end = (stop + 1).min(self.tokens.len());
        if start >= end {
            return String::new();
        }
        self.tokens[start..end]
            .iter()
            .filter(|t| !t.ty.is_eof())
            .map(|t| t.text.as_str())
            .collect()
    }

    /// Buffered token at a stream index.
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn buffered(&self) -> &[Token] {
        &self.tokens
    }

    fn lazy_init(&mut self) -> Result<(), Error> {
        if !self.initialized {
            self.initialized = true;
            self.p = self.next_on_channel(0)?;
        }
        Ok(())
    }

    /// Makes sure `tokens[i]` exists. False once the stream ended before `i`.
    fn fill(&mut self, i: usize) -> Result<bool, Error> {
        while self.tokens.len() <= i {
            if self.fetched_eof {
                return Ok(false);
            }
            let mut token = self.source.next_token()?;
            token.index = Some(self.tokens.len());
            self.fetched_eof = token.ty.is_eof();
            self.tokens.push(token);
        }
        Ok(true)
    }

    /// First default-channel index at or after `i`; the `EOF` index if none.
    fn next_on_channel(&mut self, mut i: usize) -> Result<usize, Error> {
        loop {
            if !self.fill(i)? {
                return Ok(self.tokens.len() - 1);
            }
            let token = &self.tokens[i];
            if token.channel == DEFAULT_CHANNEL || token.ty.is_eof() {
                return Ok(i);
            }
            i += 1;
        }
    }
}

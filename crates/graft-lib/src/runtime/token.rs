use graft_core::TokenType;
use rowan::{TextRange, TextSize};

use crate::Error;

pub const DEFAULT_CHANNEL: u32 = 0;
pub const HIDDEN_CHANNEL: u32 = 1;

/// A token as the recognizer sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub ty: TokenType,
    pub text: String,
    /// Source range, exclusive end. `None` for conjured tokens without a position.
    pub span: Option<TextRange>,
    /// Position in the token stream. `None` marks a conjured token.
    pub index: Option<usize>,
    pub channel: u32,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn new(ty: TokenType, text: impl Into<String>, span: TextRange) -> Self {
        Self {
            ty,
            text: text.into(),
            span: Some(span),
            index: None,
            channel: DEFAULT_CHANNEL,
            line: 0,
            column: 0,
        }
    }

    /// End-of-input token: empty span at `offset`.
    pub fn eof(offset: TextSize) -> Self {
        Self::new(TokenType::EOF, "<EOF>", TextRange::empty(offset))
    }

    /// Placeholder for a token the input lacks.
    pub fn conjured(ty: TokenType, text: impl Into<String>) -> Self {
        Self {
            ty,
            text: text.into(),
            span: None,
            index: None,
            channel: DEFAULT_CHANNEL,
            line: 0,
            column: 0,
        }
    }

    pub fn with_channel(mut self, channel: u32) -> Self {
        self.channel = channel;
        self
    }

    pub fn is_conjured(&self) -> bool {
        self.index.is_none()
    }

    pub fn start(&self) -> Option<TextSize> {
        self.span.map(|s| s.start())
    }

    /// Inclusive stop offset (`end - 1`); `None` for empty or unpositioned tokens.
    pub fn stop(&self) -> Option<TextSize> {
        let span = self.span?;
        (!span.is_empty()).then(|| span.end() - TextSize::from(1))
    }

    /// Quoted, whitespace-escaped text for error messages: `'foo'`, `'<EOF>'`.
    pub fn error_display(&self) -> String {
        quote(&self.text)
    }
}

pub(crate) fn quote(text: &str) -> String {
    let escaped = text
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t");
    format!("'{escaped}'")
}

/// Pull-based token producer. Returns `EOF` forever once exhausted.
pub trait TokenSource {
    fn next_token(&mut self) -> Result<Token, Error>;
}

impl<S: TokenSource + ?Sized> TokenSource for Box<S> {
    fn next_token(&mut self) -> Result<Token, Error> {
        (**self).next_token()
    }
}

//! Host token cursor as a recognizer token source.

use graft_core::{ElementTypes, TokenType};
use rowan::{TextRange, TextSize};

use crate::Error;
use crate::host::TokenCursor;
use crate::runtime::{CancellationToken, Token, TokenSource};

/// Pulls tokens off a host cursor, advancing it once per token.
///
/// The cursor only exposes significant tokens, so every token lands on the
/// default channel. Host kinds that are not token elements (bad characters)
/// come through as `INVALID`.
pub struct TokenBridge<'b, C: TokenCursor + ?Sized> {
    cursor: &'b mut C,
    elements: ElementTypes,
    cancel: CancellationToken,
}

impl<'b, C: TokenCursor + ?Sized> TokenBridge<'b, C> {
    pub fn new(cursor: &'b mut C, elements: ElementTypes, cancel: CancellationToken) -> Self {
        Self {
            cursor,
            elements,
            cancel,
        }
    }
}

impl<C: TokenCursor + ?Sized> TokenSource for TokenBridge<'_, C> {
    fn next_token(&mut self) -> Result<Token, Error> {
        self.cancel.check()?;
        let offset = self.cursor.current_offset();
        let Some(kind) = self.cursor.current_kind() else {
            return Ok(Token::eof(offset));
        };
        let ty = self
            .elements
            .token_type_of(kind.0)
            .unwrap_or(TokenType::INVALID);
        let text = self.cursor.current_text();
        let span = TextRange::at(offset, TextSize::of(text));
        let token = Token::new(ty, text, span);
        self.cursor.advance();
        Ok(token)
    }
}

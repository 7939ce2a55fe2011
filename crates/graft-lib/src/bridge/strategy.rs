use graft_core::{TokenSet, TokenType};
use rowan::{TextRange, TextSize};

use crate::Error;
use crate::runtime::{ErrorStrategy, Parser, Token, defaults};

/// Default recovery, tuned so every error has a place in the host tree.
///
/// - Resynchronizing at `EOF` leaves an `EOF` error leaf behind, so errors
///   reported at end of input still get a marker.
/// - Conjured tokens take the span of the token they were inserted before,
///   instead of having no position at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnchoringErrorStrategy;

impl ErrorStrategy for AnchoringErrorStrategy {
    fn consume_until(&self, p: &mut Parser<'_>, set: TokenSet) -> Result<(), Error> {
        if p.la(1)? == TokenType::EOF {
            let eof = p.lt(1)?.clone();
            p.add_error_node(eof);
        }
        defaults::consume_until(p, set)
    }

    fn missing_symbol(&self, p: &mut Parser<'_>, expected: TokenType) -> Result<Token, Error> {
        let mut token = defaults::missing_symbol(p, expected)?;
        token.span = Some(
            p.lt(1)?
                .span
                .unwrap_or_else(|| TextRange::empty(TextSize::from(0))),
        );
        Ok(token)
    }
}

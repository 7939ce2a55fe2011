use std::sync::Arc;

use graft_core::{Language, RuleIndex};

use super::exception::PResult;
use super::parser::Parser;

/// A grammar: metadata plus one entry point per rule.
pub trait Recognizer {
    fn language(&self) -> Arc<Language>;

    /// Runs the production `entry` against `parser`.
    fn parse(&self, entry: RuleIndex, parser: &mut Parser<'_>) -> PResult<()>;
}

impl<R: Recognizer + ?Sized> Recognizer for &R {
    fn language(&self) -> Arc<Language> {
        (**self).language()
    }

    fn parse(&self, entry: RuleIndex, parser: &mut Parser<'_>) -> PResult<()> {
        (**self).parse(entry, parser)
    }
}

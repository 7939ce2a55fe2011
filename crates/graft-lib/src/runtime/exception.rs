use graft_core::{RuleIndex, TokenSet};

use super::token::Token;
use crate::Error;

/// Identity of a recognition exception, unique within one parse.
///
/// Error correlation keys on this id, never on exception contents: two
/// exceptions with equal fields are still different failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExceptionId(pub u32);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExceptionKind {
    /// Current token does not match what the grammar requires here.
    InputMismatch,
    /// No alternative of a decision matches; `start` is where the decision began.
    NoViableAlt { start: Token },
    /// A semantic predicate evaluated to false.
    FailedPredicate { predicate: String },
}

/// A failure to recognize input at some point of a rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecognitionException {
    pub id: ExceptionId,
    pub kind: ExceptionKind,
    pub offending: Token,
    pub expected: TokenSet,
    pub rule: RuleIndex,
}

impl RecognitionException {
    /// Token the error is anchored at: the decision start for no-viable-alternative
    /// errors, the offending token otherwise.
    pub fn anchor(&self) -> &Token {
        match &self.kind {
            ExceptionKind::NoViableAlt { start } => start,
            _ => &self.offending,
        }
    }
}

/// Why a grammar function stopped early.
///
/// Recognition failures unwind to the nearest enclosing rule, which recovers.
/// Fatal errors unwind all the way out of the parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Interrupt {
    Recognition(Box<RecognitionException>),
    Fatal(Error),
}

impl From<Error> for Interrupt {
    fn from(err: Error) -> Self {
        Interrupt::Fatal(err)
    }
}

impl From<RecognitionException> for Interrupt {
    fn from(e: RecognitionException) -> Self {
        Interrupt::Recognition(Box::new(e))
    }
}

/// Result of a grammar function.
pub type PResult<T> = Result<T, Interrupt>;

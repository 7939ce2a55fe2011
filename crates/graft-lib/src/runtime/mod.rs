//! Recognizer runtime: tokens, buffered stream, parse tree, parser state machine.
//!
//! Grammars are hand-written recursive-descent `Recognizer`s driving a `Parser`.
//! Each rule body runs inside [`Parser::rule`], which records, reports and
//! recovers from recognition errors the way a classic LL(k) runtime does:
//! - `expect` tries single-token deletion, then single-token insertion
//!   (conjuring the missing token), then gives up with an input mismatch
//! - a failed rule resynchronizes on the union of its callers' follow frames
//! - loops call `sync` before each iteration to skip junk early
//! - `speculate` runs a syntactic predicate with tree building and reporting off
//!
//! Error reporting is suppressed between an error and the next successful match,
//! so one mistake yields one message.

mod cancel;
mod exception;
mod listener;
mod parser;
mod recognizer;
mod strategy;
mod stream;
mod token;
mod tree;

#[cfg(test)]
mod stream_tests;

pub use cancel::CancellationToken;
pub use exception::{ExceptionId, ExceptionKind, Interrupt, PResult, RecognitionException};
pub use listener::ErrorListener;
pub use parser::{Parser, RecoveryState};
pub use recognizer::Recognizer;
pub use strategy::{DefaultErrorStrategy, ErrorStrategy, defaults};
pub use stream::TokenStream;
pub use token::{DEFAULT_CHANNEL, HIDDEN_CHANNEL, Token, TokenSource};
pub use tree::{NodeId, ParseNode, ParseTree, RuleNode};

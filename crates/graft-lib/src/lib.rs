//! Graft: projects recognizer parse trees onto marker-based syntax trees.
//!
//! A grammar-driven recognizer pulls tokens from the host through a bridge,
//! builds its own parse tree (recovering from syntax errors as it goes), and
//! the finished tree is replayed onto the host's tree builder. Error leaves
//! and failed rules become error elements; everything else keeps its structure.
//!
//! # Example
//!
//! ```
//! use graft_lib::sample;
//!
//! let tree = sample::parse("var a = 1;").expect("not cancelled");
//! assert!(tree.errors.is_empty());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod bridge;
pub mod diagnostics;
pub mod host;
pub mod query;
pub mod runtime;
pub mod sample;
pub mod trace;

mod invariants;
#[cfg(test)]
mod testing;
#[cfg(test)]
mod trace_tests;

pub use bridge::{ParseDriver, ProjectionStats};
pub use diagnostics::{Diagnostics, DiagnosticsPrinter};
pub use graft_core::{Colors, Language, RuleIndex, TokenSet, TokenType};
pub use host::{GreenTreeBuilder, HostToken, HostTree, TokenCursor, TreeBuilder};
pub use query::{TreePrinter, TreeQuery};
pub use runtime::CancellationToken;

/// Errors that abort a parse. Syntax errors never surface here: they end up
/// as error elements in the projected tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("parse cancelled")]
    Cancelled,

    /// Recursion fuel exhausted (input nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    #[error("unknown language `{0}`")]
    UnknownLanguage(String),

    #[error("unknown rule `{0}`")]
    UnknownRule(String),
}

impl From<graft_core::RegistryError> for Error {
    fn from(err: graft_core::RegistryError) -> Self {
        match err {
            graft_core::RegistryError::UnknownLanguage(name) => Error::UnknownLanguage(name),
        }
    }
}

/// Result type for graft operations.
pub type Result<T> = std::result::Result<T, Error>;

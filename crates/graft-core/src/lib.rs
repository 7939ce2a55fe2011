#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Grammar metadata shared by every graft language.
//!
//! Three layers:
//! - **Symbols**: `TokenType` / `RuleIndex`, small stable integers scoped per language
//! - **Metadata**: `Vocabulary` (token display names) and `Language` (vocabulary + rule names)
//! - **Registry**: process-wide, register-once cache of `Language`s keyed by name
//!
//! `ElementTypes` maps grammar symbols onto the raw `u16` kinds a host tree stores,
//! so a finished tree can be queried back in grammar terms.

mod colors;
mod invariants;
mod language;
mod registry;
mod symbols;
mod token_set;
mod vocabulary;

#[cfg(test)]
mod token_set_tests;

pub use colors::Colors;
pub use language::{ElementType, ElementTypes, Language};
pub use registry::{lookup, register, register_with, registered};
pub use symbols::{RuleIndex, TokenType};
pub use token_set::TokenSet;
pub use vocabulary::Vocabulary;

/// Errors raised by registry lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("language `{0}` is not registered")]
    UnknownLanguage(String),
}

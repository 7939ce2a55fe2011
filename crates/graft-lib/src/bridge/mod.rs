//! Projection of recognizer parses onto host tree builders.
//!
//! Pipeline, as run by [`ParseDriver::project`]:
//! - `TokenBridge` feeds the host's significant tokens to the recognizer
//! - `AnchoringErrorStrategy` recovers so every error keeps a position
//! - `SyntaxErrorCollector` captures the reported errors per exception
//! - the host is rewound and `project_tree` replays the finished parse tree
//!   onto it, turning failed rules and reported error leaves into error markers

mod collector;
mod driver;
mod projector;
mod strategy;
mod token_source;

#[cfg(test)]
mod strategy_tests;
#[cfg(test)]
mod token_source_tests;

pub use collector::{CorrelatedErrors, SyntaxError, SyntaxErrorCollector};
pub use driver::ParseDriver;
pub use projector::{ProjectionStats, project_tree};
pub use strategy::AnchoringErrorStrategy;
pub use token_source::TokenBridge;

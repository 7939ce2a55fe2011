//! Host tree-building interface and a `rowan`-backed implementation.
//!
//! The host owns tokenization and the final tree. It exposes a cursor over its
//! significant tokens and a marker API: `mark` opens a region at the cursor,
//! `done`/`error` close the innermost open region, `rollback_to` discards
//! everything after a marker and rewinds the cursor.

mod green;

#[cfg(test)]
mod green_tests;

use rowan::{SyntaxKind, TextSize};

pub use green::{
    ErrorElement, GraftLang, GreenMarker, GreenTreeBuilder, HostToken, HostTree, SyntaxElement,
    SyntaxNode, SyntaxToken,
};

/// Read position over the host's significant (non-trivia) tokens.
pub trait TokenCursor {
    /// Kind of the current token; `None` at the end.
    fn current_kind(&self) -> Option<SyntaxKind>;

    /// Text of the current token; empty at the end.
    fn current_text(&self) -> &str;

    /// Start offset of the current token; source length at the end.
    fn current_offset(&self) -> TextSize;

    /// Moves to the next token. A no-op at the end.
    fn advance(&mut self);

    fn at_end(&self) -> bool;
}

/// Marker-based tree construction.
///
/// Markers are strictly nested: only the innermost open marker may be closed.
/// Violations are contract bugs and panic.
pub trait TreeBuilder: TokenCursor {
    type Marker;
    type Tree;

    /// Opens a region starting at the current token.
    fn mark(&mut self) -> Self::Marker;

    /// Closes `marker` as a node of `kind`.
    fn done(&mut self, marker: Self::Marker, kind: SyntaxKind);

    /// Closes `marker` as an error element carrying `message`.
    fn error(&mut self, marker: Self::Marker, message: &str);

    /// Drops `marker` and everything recorded after it; the cursor returns to
    /// where it was when `marker` was opened.
    fn rollback_to(&mut self, marker: Self::Marker);

    fn finish(self) -> Self::Tree
    where
        Self: Sized;
}

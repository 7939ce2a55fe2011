//! Syntax errors of a finished host tree, as renderable diagnostics.

mod printer;

#[cfg(test)]
mod tests;

use rowan::TextRange;

pub use printer::DiagnosticsPrinter;

use crate::host::HostTree;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub range: TextRange,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "error at {}..{}: {}",
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// One diagnostic per message of each error element, in tree order.
    ///
    /// Merged messages are split back apart. A failed rule and the token it
    /// failed at carry the same message; the nested repeat is dropped.
    pub fn from_tree(tree: &HostTree) -> Self {
        let mut diagnostics = Self::new();
        for element in &tree.errors {
            for message in element.message.lines() {
                let repeated = diagnostics.messages.iter().any(|d| {
                    d.message == message && d.range.contains_range(element.range)
                });
                if !repeated {
                    diagnostics.push(element.range, message);
                }
            }
        }
        diagnostics
    }

    pub fn push(&mut self, range: TextRange, message: impl Into<String>) {
        self.messages.push(Diagnostic {
            range,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.messages.iter()
    }

    pub fn render(&self, source: &str) -> String {
        self.printer().source(source).render()
    }

    pub fn render_colored(&self, source: &str, colored: bool) -> String {
        self.printer().source(source).colored(colored).render()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }
}

//! Recognition errors captured during one parse, indexed for projection.

use indexmap::IndexMap;
use rowan::TextSize;

use crate::runtime::{ErrorListener, ExceptionId, ExceptionKind, RecognitionException, Token};

/// A syntax error as reported by the recognizer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxError {
    /// Token the error is anchored at.
    pub offending: Token,
    pub line: u32,
    pub column: u32,
    pub message: String,
    /// `None` for extraneous and missing token reports.
    pub exception: Option<ExceptionId>,
}

impl SyntaxError {
    /// Start offset of the offending token; 0 when it has no position.
    pub fn offset(&self) -> TextSize {
        self.offending.start().unwrap_or_default()
    }
}

/// Error listener for a single parse.
///
/// Each exception is recorded once, first report wins. Reports for a
/// no-viable-alternative exception are re-anchored at the token where the
/// decision started: the recognizer may have looked far ahead before giving
/// up, but the parse tree places the error at the decision.
#[derive(Debug, Default)]
pub struct SyntaxErrorCollector {
    errors: Vec<SyntaxError>,
    by_exception: IndexMap<ExceptionId, usize>,
}

impl SyntaxErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Freezes the collected errors into lookup tables.
    pub fn index(self) -> CorrelatedErrors {
        let mut by_offset: IndexMap<TextSize, Vec<usize>> = IndexMap::new();
        for (i, error) in self.errors.iter().enumerate() {
            by_offset.entry(error.offset()).or_default().push(i);
        }
        CorrelatedErrors {
            errors: self.errors,
            by_exception: self.by_exception,
            by_offset,
        }
    }
}

impl ErrorListener for SyntaxErrorCollector {
    fn syntax_error(
        &mut self,
        offending: &Token,
        line: u32,
        column: u32,
        msg: &str,
        e: Option<&RecognitionException>,
    ) {
        if let Some(e) = e
            && self.by_exception.contains_key(&e.id)
        {
            return;
        }
        let (offending, line, column) = match e.map(|e| &e.kind) {
            Some(ExceptionKind::NoViableAlt { start }) => (start.clone(), start.line, start.column),
            _ => (offending.clone(), line, column),
        };
        if let Some(e) = e {
            self.by_exception.insert(e.id, self.errors.len());
        }
        self.errors.push(SyntaxError {
            offending,
            line,
            column,
            message: msg.to_owned(),
            exception: e.map(|e| e.id),
        });
    }
}

/// Errors of a finished parse, addressable by exception and by offset.
#[derive(Debug, Default)]
pub struct CorrelatedErrors {
    /// Observation order.
    errors: Vec<SyntaxError>,
    by_exception: IndexMap<ExceptionId, usize>,
    by_offset: IndexMap<TextSize, Vec<usize>>,
}

impl CorrelatedErrors {
    pub fn for_exception(&self, id: ExceptionId) -> Option<&SyntaxError> {
        self.by_exception.get(&id).map(|i| &self.errors[*i])
    }

    /// First error observed at `offset`.
    pub fn first_at(&self, offset: TextSize) -> Option<&SyntaxError> {
        self.all_at(offset).next()
    }

    /// Every error at `offset`, in observation order.
    pub fn all_at(&self, offset: TextSize) -> impl Iterator<Item = &SyntaxError> {
        self.by_offset
            .get(&offset)
            .into_iter()
            .flatten()
            .map(|i| &self.errors[*i])
    }

    /// Messages of every error at `offset`, one per line.
    pub fn messages_at(&self, offset: TextSize) -> Option<String> {
        let messages: Vec<_> = self.all_at(offset).map(|e| e.message.as_str()).collect();
        (!messages.is_empty()).then(|| messages.join("\n"))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SyntaxError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

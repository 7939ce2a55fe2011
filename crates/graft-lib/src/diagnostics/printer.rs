//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use rowan::TextRange;

use super::{Diagnostic, Diagnostics};

/// Without a source, each diagnostic prints as one plain line.
///
/// With a source, diagnostics starting on the same line render as one report:
/// the first one titles it, the ones recovery reported after it are labeled
/// context annotations.
pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            source: None,
            path: None,
            colored: false,
        }
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let Some(source) = self.source else {
            return self.format_plain(w);
        };

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, group) in line_groups(self.diagnostics, source).into_iter().enumerate() {
            let Some((head, cascade)) = group.split_first() else {
                continue;
            };

            let mut snippet = Snippet::source(source)
                .line_start(1)
                .annotation(AnnotationKind::Primary.span(adjust_range(head.range, source.len())));

            for diag in cascade {
                snippet = snippet.annotation(
                    AnnotationKind::Context
                        .span(adjust_range(diag.range, source.len()))
                        .label(&diag.message),
                );
            }

            if let Some(p) = self.path {
                snippet = snippet.path(p);
            }

            let report: Vec<Group> =
                vec![Level::ERROR.primary_title(&head.message).element(snippet)];

            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", renderer.render(&report))?;
        }

        Ok(())
    }

    fn format_plain(&self, w: &mut impl Write) -> std::fmt::Result {
        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", diag)?;
        }
        Ok(())
    }
}

/// Runs of diagnostics whose ranges start on the same line.
fn line_groups<'d>(diagnostics: &'d Diagnostics, source: &str) -> Vec<Vec<&'d Diagnostic>> {
    let mut groups: Vec<(usize, Vec<&Diagnostic>)> = Vec::new();
    for diag in diagnostics.iter() {
        let line = line_of(source, diag.range.start().into());
        match groups.last_mut() {
            Some((last, group)) if *last == line => group.push(diag),
            _ => groups.push((line, vec![diag])),
        }
    }
    groups.into_iter().map(|(_, group)| group).collect()
}

fn line_of(source: &str, offset: usize) -> usize {
    let end = offset.min(source.len());
    source.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count()
}

/// Zero-width ranges widen to the next character so the caret has something to point at.
fn adjust_range(range: TextRange, limit: usize) -> std::ops::Range<usize> {
    let start: usize = range.start().into();
    let end: usize = range.end().into();

    if start == end {
        return start..(start + 1).min(limit);
    }

    start..end
}

impl Diagnostics {
    pub fn printer<'s>(&self) -> DiagnosticsPrinter<'_, 's> {
        DiagnosticsPrinter::new(self)
    }
}

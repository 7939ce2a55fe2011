//! Tracing infrastructure for debugging projection.
//!
//! # Design: Zero-Cost Abstraction
//!
//! With `NoopTracer` every trait method is an `#[inline(always)]` empty
//! function, so the tracer calls and their arguments compile away and the
//! projector carries no tracing state.
//!
//! # Design: Tracer-Owned State
//!
//! Display-only state (the rule stack used for indentation) lives in the
//! tracer, not in the projector. `trace_rule_enter` pushes, `trace_rule_done`
//! and `trace_rule_error` pop.

use std::sync::Arc;

use graft_core::{Colors, Language, RuleIndex};

use crate::runtime::Token;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Default: rule entries and error markers.
    #[default]
    Default,
    /// Verbose (-v): also rule exits, advances and skipped recovery tokens.
    Verbose,
    /// Very verbose (-vv): everything, with token text and offsets.
    VeryVerbose,
}

/// Projection instrumentation.
///
/// Methods receive raw data the projector already has; name resolution and
/// formatting happen in the implementation.
pub trait Tracer {
    /// Called once before the recognizer runs.
    fn trace_parse_start(&mut self, entry: RuleIndex);

    /// Called once the recognizer finished, with the number of syntax errors.
    fn trace_parse_end(&mut self, errors: usize);

    /// Called after a rule marker is opened.
    fn trace_rule_enter(&mut self, rule: RuleIndex);

    /// Called after a rule marker is closed as a node.
    fn trace_rule_done(&mut self, rule: RuleIndex);

    /// Called after a rule marker is closed as an error.
    fn trace_rule_error(&mut self, rule: RuleIndex, message: &str);

    /// Called after the host advanced over a matched token.
    fn trace_advance(&mut self, token: &Token);

    /// Called for every error leaf. `message` is `None` when the leaf was
    /// recovery noise and only advanced the host.
    fn trace_error_leaf(&mut self, token: &Token, message: Option<&str>);

    /// Called after trailing host tokens were drained into the root.
    fn trace_drain(&mut self, count: usize);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_parse_start(&mut self, _entry: RuleIndex) {}

    #[inline(always)]
    fn trace_parse_end(&mut self, _errors: usize) {}

    #[inline(always)]
    fn trace_rule_enter(&mut self, _rule: RuleIndex) {}

    #[inline(always)]
    fn trace_rule_done(&mut self, _rule: RuleIndex) {}

    #[inline(always)]
    fn trace_rule_error(&mut self, _rule: RuleIndex, _message: &str) {}

    #[inline(always)]
    fn trace_advance(&mut self, _token: &Token) {}

    #[inline(always)]
    fn trace_error_leaf(&mut self, _token: &Token, _message: Option<&str>) {}

    #[inline(always)]
    fn trace_drain(&mut self, _count: usize) {}
}

/// Tracer that collects one line per projection event.
pub struct PrintTracer {
    language: Arc<Language>,
    verbosity: Verbosity,
    /// Collected trace lines.
    lines: Vec<String>,
    /// Open rules, innermost last.
    rules: Vec<RuleIndex>,
    colors: Colors,
}

impl PrintTracer {
    pub fn new(language: Arc<Language>, verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            language,
            verbosity,
            lines: Vec::new(),
            rules: Vec::new(),
            colors,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Print all trace lines.
    pub fn print(&self) {
        for line in &self.lines {
            println!("{}", line);
        }
    }

    fn rule_name(&self, rule: RuleIndex) -> &str {
        self.language.rule_name(rule).unwrap_or("?")
    }

    fn token_name(&self, token: &Token) -> String {
        self.language.vocabulary().element_name(token.ty)
    }

    fn indent(&self) -> String {
        "  ".repeat(self.rules.len())
    }

    fn push(&mut self, content: String) {
        let line = format!("{}{}", self.indent(), content);
        self.lines.push(line);
    }

    fn format_token(&self, token: &Token) -> String {
        let c = &self.colors;
        let name = self.token_name(token);
        if self.verbosity != Verbosity::VeryVerbose {
            return name;
        }
        let at = match token.start() {
            Some(offset) => format!(" {}@{}{}", c.dim, u32::from(offset), c.reset),
            None => String::new(),
        };
        format!("{name} {}{:?}{}{at}", c.green, token.text, c.reset)
    }

    fn exit(&mut self, rule: RuleIndex) {
        if self.rules.last() == Some(&rule) {
            self.rules.pop();
        }
    }
}

impl Tracer for PrintTracer {
    fn trace_parse_start(&mut self, entry: RuleIndex) {
        let c = self.colors;
        let line = format!("{}parse{} {}", c.dim, c.reset, self.rule_name(entry));
        self.lines.push(line);
    }

    fn trace_parse_end(&mut self, errors: usize) {
        let c = self.colors;
        let noun = if errors == 1 { "error" } else { "errors" };
        self.lines
            .push(format!("{}recognized with {errors} syntax {noun}{}", c.dim, c.reset));
    }

    fn trace_rule_enter(&mut self, rule: RuleIndex) {
        let c = self.colors;
        self.push(format!("{}{}{}", c.blue, self.rule_name(rule), c.reset));
        self.rules.push(rule);
    }

    fn trace_rule_done(&mut self, rule: RuleIndex) {
        self.exit(rule);
        if self.verbosity == Verbosity::Default {
            return;
        }
        let c = self.colors;
        self.push(format!("{}done{} {}", c.dim, c.reset, self.rule_name(rule)));
    }

    fn trace_rule_error(&mut self, rule: RuleIndex, message: &str) {
        self.exit(rule);
        let c = self.colors;
        let name = self.rule_name(rule).to_owned();
        for (i, line) in message.lines().enumerate() {
            let head = if i == 0 { name.as_str() } else { "" };
            self.push(format!("{}error{} {head}: {line}", c.red, c.reset));
        }
    }

    fn trace_advance(&mut self, token: &Token) {
        if self.verbosity == Verbosity::Default {
            return;
        }
        let c = self.colors;
        let token = self.format_token(token);
        self.push(format!("{}advance{} {token}", c.dim, c.reset));
    }

    fn trace_error_leaf(&mut self, token: &Token, message: Option<&str>) {
        let c = self.colors;
        let shown = self.format_token(token);
        match message {
            Some(message) => {
                for line in message.lines() {
                    self.push(format!("{}error{} {shown}: {line}", c.red, c.reset));
                }
            }
            None if self.verbosity != Verbosity::Default => {
                self.push(format!("{}skip{} {shown}", c.dim, c.reset));
            }
            None => {}
        }
    }

    fn trace_drain(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        let c = self.colors;
        self.push(format!("{}drain{} {count}", c.dim, c.reset));
    }
}

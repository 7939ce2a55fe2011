//! Replays a finished parse tree onto a host tree builder.
//!
//! Rules map to markers one to one: a rule opens a marker on entry and
//! resolves it on exit, as a node of the rule's element type or, if the rule
//! recorded an exception, as an error carrying that exception's message.
//!
//! Leaves drive the host cursor. A terminal advances it by one token. An error
//! leaf is either
//! 1. a real token with errors reported at its offset: wrapped in an error
//!    marker holding every message at that offset (each offset is used once),
//! 2. a conjured placeholder: a zero-width error marker, no advance, or
//! 3. a real token skipped while resynchronizing: a plain advance.

use std::collections::HashSet;

use graft_core::ElementTypes;
use rowan::{SyntaxKind, TextSize};

use super::collector::CorrelatedErrors;
use crate::Error;
use crate::host::TreeBuilder;
use crate::invariants::{ensure_marker, ensure_markers_balanced};
use crate::runtime::{CancellationToken, NodeId, ParseNode, ParseTree, RuleNode, Token};
use crate::trace::Tracer;

/// Counters of one projection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProjectionStats {
    pub rules_entered: usize,
    /// Rule markers closed as nodes.
    pub rules_done: usize,
    /// Rule markers closed as errors.
    pub rules_errored: usize,
    /// Error markers opened for error leaves, conjured ones included.
    pub error_markers: usize,
    pub conjured: usize,
    /// Host tokens advanced over by leaves.
    pub advances: usize,
    /// Host tokens left over after the tree and drained into the root.
    pub drained: usize,
}

enum Visit<'t> {
    Enter(NodeId),
    Exit(&'t RuleNode),
}

/// Projects `tree` onto `builder`, between whatever markers the caller holds.
pub fn project_tree<B, T>(
    tree: &ParseTree,
    errors: &CorrelatedErrors,
    elements: &ElementTypes,
    builder: &mut B,
    cancel: &CancellationToken,
    tracer: &mut T,
) -> Result<ProjectionStats, Error>
where
    B: TreeBuilder + ?Sized,
    T: Tracer + ?Sized,
{
    let mut projector = Projector {
        errors,
        elements,
        builder,
        cancel,
        tracer,
        markers: Vec::new(),
        spent: HashSet::new(),
        stats: ProjectionStats::default(),
    };
    if let Some(root) = tree.root() {
        projector.run(tree, root)?;
    }
    Ok(projector.stats)
}

struct Projector<'a, B: TreeBuilder + ?Sized, T: Tracer + ?Sized> {
    errors: &'a CorrelatedErrors,
    elements: &'a ElementTypes,
    builder: &'a mut B,
    cancel: &'a CancellationToken,
    tracer: &'a mut T,
    markers: Vec<B::Marker>,
    /// Offsets whose errors already have a marker.
    spent: HashSet<TextSize>,
    stats: ProjectionStats,
}

impl<B: TreeBuilder + ?Sized, T: Tracer + ?Sized> Projector<'_, B, T> {
    fn run(&mut self, tree: &ParseTree, root: NodeId) -> Result<(), Error> {
        let mut stack = vec![Visit::Enter(root)];
        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Enter(id) => match tree.node(id) {
                    ParseNode::Rule(rule) => {
                        self.enter_rule(rule)?;
                        stack.push(Visit::Exit(rule));
                        stack.extend(rule.children.iter().rev().map(|c| Visit::Enter(*c)));
                    }
                    ParseNode::Terminal(token) => self.terminal(token),
                    ParseNode::Error(token) => self.error_leaf(token),
                },
                Visit::Exit(rule) => self.exit_rule(rule)?,
            }
        }
        ensure_markers_balanced(self.markers.len());
        Ok(())
    }

    fn enter_rule(&mut self, rule: &RuleNode) -> Result<(), Error> {
        self.cancel.check()?;
        self.markers.push(self.builder.mark());
        self.stats.rules_entered += 1;
        self.tracer.trace_rule_enter(rule.rule);
        Ok(())
    }

    fn exit_rule(&mut self, rule: &RuleNode) -> Result<(), Error> {
        self.cancel.check()?;
        let marker = ensure_marker(self.markers.pop());
        match &rule.exception {
            Some(e) => {
                let message = self
                    .errors
                    .for_exception(e.id)
                    .map_or("syntax error", |err| err.message.as_str());
                self.builder.error(marker, message);
                self.stats.rules_errored += 1;
                self.tracer.trace_rule_error(rule.rule, message);
            }
            None => {
                let kind = SyntaxKind(self.elements.rule(rule.rule));
                self.builder.done(marker, kind);
                self.stats.rules_done += 1;
                self.tracer.trace_rule_done(rule.rule);
            }
        }
        Ok(())
    }

    fn terminal(&mut self, token: &Token) {
        self.advance(token);
        self.tracer.trace_advance(token);
    }

    fn error_leaf(&mut self, token: &Token) {
        if token.is_conjured() {
            let marker = self.builder.mark();
            self.builder.error(marker, &token.text);
            self.stats.error_markers += 1;
            self.stats.conjured += 1;
            self.tracer.trace_error_leaf(token, Some(&token.text));
            return;
        }

        let offset = token.start().unwrap_or_default();
        let message = if self.spent.contains(&offset) {
            None
        } else {
            self.errors.messages_at(offset)
        };
        match message {
            Some(message) => {
                let marker = self.builder.mark();
                self.advance(token);
                self.builder.error(marker, &message);
                self.spent.insert(offset);
                self.stats.error_markers += 1;
                self.tracer.trace_error_leaf(token, Some(&message));
            }
            None => {
                self.advance(token);
                self.tracer.trace_error_leaf(token, None);
            }
        }
    }

    /// `EOF` leaves stand for the host's end and never move it.
    fn advance(&mut self, token: &Token) {
        if token.ty.is_eof() {
            return;
        }
        self.builder.advance();
        self.stats.advances += 1;
    }
}

//! Arena-allocated parse tree produced by the recognizer.

use std::fmt::Write;

use graft_core::{Language, RuleIndex};

use super::exception::RecognitionException;
use super::token::Token;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleNode {
    pub rule: RuleIndex,
    pub children: Vec<NodeId>,
    /// Stream index of the first token seen by the rule.
    pub start: Option<usize>,
    /// Stream index of the last consumed token; `None` if nothing was consumed.
    pub stop: Option<usize>,
    /// Exception that ended the rule early, if any.
    pub exception: Option<RecognitionException>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseNode {
    Rule(RuleNode),
    Terminal(Token),
    /// Token consumed during recovery, or a conjured placeholder.
    Error(Token),
}

/// Immutable once the parse finishes.
#[derive(Clone, Debug, Default)]
pub struct ParseTree {
    nodes: Vec<ParseNode>,
    root: Option<NodeId>,
}

impl ParseTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &ParseNode {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.node(id) {
            ParseNode::Rule(r) => &r.children,
            _ => &[],
        }
    }

    /// Adds a rule node under `parent`, or as the root when there is none.
    pub(crate) fn add_rule(
        &mut self,
        parent: Option<NodeId>,
        rule: RuleIndex,
        start: Option<usize>,
    ) -> NodeId {
        self.push(
            parent,
            ParseNode::Rule(RuleNode {
                rule,
                children: Vec::new(),
                start,
                stop: None,
                exception: None,
            }),
        )
    }

    pub(crate) fn add_leaf(&mut self, parent: Option<NodeId>, leaf: ParseNode) -> NodeId {
        self.push(parent, leaf)
    }

    pub(crate) fn rule_mut(&mut self, id: NodeId) -> Option<&mut RuleNode> {
        match &mut self.nodes[id.index()] {
            ParseNode::Rule(r) => Some(r),
            _ => None,
        }
    }

    fn push(&mut self, parent: Option<NodeId>, node: ParseNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        match parent.and_then(|p| self.rule_mut(p)) {
            Some(rule) => rule.children.push(id),
            None => {
                if self.root.is_none() {
                    self.root = Some(id);
                }
            }
        }
        id
    }

    /// LISP-style rendering: `(script (statement return ;) <EOF>)`.
    /// Rules without children print as their bare name.
    pub fn to_sexpr(&self, language: &Language) -> String {
        let mut out = String::new();
        if let Some(root) = self.root {
            self.format_sexpr(root, language, &mut out)
                .expect("String write never fails");
        }
        out
    }

    fn format_sexpr(&self, id: NodeId, language: &Language, w: &mut impl Write) -> std::fmt::Result {
        match self.node(id) {
            ParseNode::Terminal(t) | ParseNode::Error(t) => w.write_str(&escape_whitespace(&t.text)),
            ParseNode::Rule(r) => {
                let name = language.rule_name(r.rule).unwrap_or("?");
                if r.children.is_empty() {
                    return w.write_str(name);
                }
                write!(w, "({name}")?;
                for child in &r.children {
                    w.write_char(' ')?;
                    self.format_sexpr(*child, language, w)?;
                }
                w.write_char(')')
            }
        }
    }
}

fn escape_whitespace(text: &str) -> String {
    text.replace('\t', "\\t")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

use std::fmt::Write;

use rowan::{NodeOrToken, TextRange};
use serde::Serialize;

use super::TreeQuery;
use crate::host::SyntaxNode;

/// Builder for host tree dumps, one element per line, two-space indent.
///
/// Error nodes carry their message inline: `ERROR "missing ';' at 'var'"`.
pub struct TreePrinter<'q, 't> {
    query: &'q TreeQuery<'t>,
    spans: bool,
    trivia: bool,
}

/// Serializable form of a host tree, for `--json` output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NodeDump {
    pub kind: String,
    pub start: u32,
    pub end: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDump>,
}

impl<'q, 't> TreePrinter<'q, 't> {
    pub fn new(query: &'q TreeQuery<'t>) -> Self {
        Self {
            query,
            spans: false,
            trivia: false,
        }
    }

    pub fn with_spans(mut self, value: bool) -> Self {
        self.spans = value;
        self
    }

    pub fn with_trivia(mut self, value: bool) -> Self {
        self.trivia = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let mut errors = 0;
        self.format_node(&self.query.root(), 0, &mut errors, w)
    }

    pub fn to_dump(&self) -> NodeDump {
        let mut errors = 0;
        self.dump_node(&self.query.root(), &mut errors)
    }

    /// `errors` counts error nodes seen so far; messages are stored in the same pre-order.
    fn format_node(
        &self,
        node: &SyntaxNode,
        indent: usize,
        errors: &mut usize,
        w: &mut impl Write,
    ) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        let name = self.query.kind_name(&NodeOrToken::Node(node.clone()));
        let span = self.span_str(node.text_range());
        match self.error_message(node, errors) {
            Some(message) => writeln!(w, "{}{}{} {:?}", prefix, name, span, message)?,
            None => writeln!(w, "{}{}{}", prefix, name, span)?,
        }

        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Node(n) => self.format_node(&n, indent + 1, errors, w)?,
                NodeOrToken::Token(t) => {
                    if self.trivia || !self.query.is_trivia(&t) {
                        let name = self.query.kind_name(&NodeOrToken::Token(t.clone()));
                        writeln!(
                            w,
                            "{}  {}{} {:?}",
                            prefix,
                            name,
                            self.span_str(t.text_range()),
                            t.text()
                        )?;
                    }
                }
            }
        }
        Ok(())
    }

    fn dump_node(&self, node: &SyntaxNode, errors: &mut usize) -> NodeDump {
        let range = node.text_range();
        let message = self.error_message(node, errors).map(str::to_owned);
        let mut children = Vec::new();
        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Node(n) => children.push(self.dump_node(&n, errors)),
                NodeOrToken::Token(t) => {
                    if self.trivia || !self.query.is_trivia(&t) {
                        let range = t.text_range();
                        children.push(NodeDump {
                            kind: self.query.kind_name(&NodeOrToken::Token(t.clone())),
                            start: range.start().into(),
                            end: range.end().into(),
                            text: Some(t.text().to_owned()),
                            message: None,
                            children: Vec::new(),
                        });
                    }
                }
            }
        }
        NodeDump {
            kind: self.query.kind_name(&NodeOrToken::Node(node.clone())),
            start: range.start().into(),
            end: range.end().into(),
            text: None,
            message,
            children,
        }
    }

    fn error_message(&self, node: &SyntaxNode, errors: &mut usize) -> Option<&'t str> {
        if !self.query.is_error(node) {
            return None;
        }
        let message = self.query.tree().errors.get(*errors)?;
        *errors += 1;
        Some(&message.message)
    }

    fn span_str(&self, range: TextRange) -> String {
        if !self.spans {
            return String::new();
        }
        format!(
            " [{}..{}]",
            u32::from(range.start()),
            u32::from(range.end())
        )
    }
}

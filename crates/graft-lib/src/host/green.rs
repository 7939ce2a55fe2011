//! Marker-based builder over a pre-lexed token list, producing a `rowan` tree.

use graft_core::{ElementTypes, TokenSet};
use rowan::{GreenNode, GreenNodeBuilder, NodeOrToken, SyntaxKind, TextRange, TextSize};

use super::{TokenCursor, TreeBuilder};
use crate::invariants::{ensure_finished, ensure_innermost, ensure_open};

/// Raw kinds are graft element types; see [`ElementTypes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GraftLang {}

impl rowan::Language for GraftLang {
    type Kind = u16;

    fn kind_from_raw(raw: SyntaxKind) -> u16 {
        raw.0
    }

    fn kind_to_raw(kind: u16) -> SyntaxKind {
        SyntaxKind(kind)
    }
}

pub type SyntaxNode = rowan::SyntaxNode<GraftLang>;
pub type SyntaxToken = rowan::SyntaxToken<GraftLang>;
pub type SyntaxElement = NodeOrToken<SyntaxNode, SyntaxToken>;

/// A token produced by the host lexer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HostToken {
    pub kind: SyntaxKind,
    pub range: TextRange,
}

/// Error element of a finished tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorElement {
    pub range: TextRange,
    pub message: String,
}

#[derive(Clone, Debug)]
pub struct HostTree {
    pub green: GreenNode,
    /// Error elements in pre-order.
    pub errors: Vec<ErrorElement>,
}

impl HostTree {
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Open region handle. Consumed by `done`, `error` or `rollback_to`.
#[derive(Debug, PartialEq, Eq)]
pub struct GreenMarker(usize);

#[derive(Debug)]
enum Closed {
    Node(SyntaxKind),
    Error(String),
}

#[derive(Debug)]
enum Event {
    /// `pos` is the significant-token position at `mark` time.
    Open { pos: usize, closed: Option<Closed> },
    /// Raw index into `tokens`.
    Token(usize),
    Close,
}

/// Trivia is invisible to the cursor. On `finish`, trivia preceding a node
/// stays outside it; the root region absorbs whatever is left, so the tree
/// always covers the whole source.
pub struct GreenTreeBuilder<'s> {
    source: &'s str,
    tokens: Vec<HostToken>,
    /// Raw indices of non-trivia tokens.
    significant: Vec<usize>,
    pos: usize,
    events: Vec<Event>,
    /// Event indices of open markers, innermost last.
    open: Vec<usize>,
}

impl<'s> GreenTreeBuilder<'s> {
    pub fn new(
        source: &'s str,
        tokens: Vec<HostToken>,
        elements: &ElementTypes,
        trivia: TokenSet,
    ) -> Self {
        let significant = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| {
                !elements
                    .token_type_of(t.kind.0)
                    .is_some_and(|ty| trivia.contains(ty))
            })
            .map(|(i, _)| i)
            .collect();
        Self {
            source,
            tokens,
            significant,
            pos: 0,
            events: Vec::new(),
            open: Vec::new(),
        }
    }

    /// Number of significant tokens advanced over so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn significant_len(&self) -> usize {
        self.significant.len()
    }

    fn current(&self) -> Option<&HostToken> {
        self.significant.get(self.pos).map(|i| &self.tokens[*i])
    }

    fn close(&mut self, marker: GreenMarker, closed: Closed) {
        ensure_innermost(self.open.last().copied(), marker.0);
        self.open.pop();
        if let Event::Open { closed: slot, .. } = &mut self.events[marker.0] {
            *slot = Some(closed);
        }
        self.events.push(Event::Close);
    }

    fn raw_index(&self, pos: usize) -> usize {
        self.significant
            .get(pos)
            .copied()
            .unwrap_or(self.tokens.len())
    }

    fn build(self) -> HostTree {
        let mut builder = GreenNodeBuilder::new();
        let mut messages = Vec::new();
        let mut emitted = 0;
        let mut depth = 0usize;

        for event in &self.events {
            match event {
                Event::Open { pos, closed } => {
                    if depth > 0 {
                        emitted = self.emit_until(&mut builder, emitted, self.raw_index(*pos));
                    }
                    let kind = match closed {
                        Some(Closed::Node(kind)) => *kind,
                        Some(Closed::Error(message)) => {
                            messages.push(message.clone());
                            SyntaxKind(ElementTypes::ERROR)
                        }
                        None => unreachable!("finish checked that every marker is closed"),
                    };
                    builder.start_node(kind);
                    depth += 1;
                }
                Event::Token(i) => {
                    emitted = self.emit_until(&mut builder, emitted, *i + 1);
                }
                Event::Close => {
                    depth -= 1;
                    if depth == 0 {
                        emitted = self.emit_until(&mut builder, emitted, self.tokens.len());
                    }
                    builder.finish_node();
                }
            }
        }

        let green = builder.finish();
        let root = SyntaxNode::new_root(green.clone());
        let errors = root
            .descendants()
            .filter(|n| n.kind() == ElementTypes::ERROR)
            .zip(messages)
            .map(|(node, message)| ErrorElement {
                range: node.text_range(),
                message,
            })
            .collect();
        HostTree { green, errors }
    }

    /// Emits raw tokens `from..to`; returns the new emitted bound.
    fn emit_until(&self, builder: &mut GreenNodeBuilder<'static>, from: usize, to: usize) -> usize {
        for token in &self.tokens[from.min(to)..to] {
            builder.token(token.kind, &self.source[token.range]);
        }
        from.max(to)
    }
}

impl TokenCursor for GreenTreeBuilder<'_> {
    fn current_kind(&self) -> Option<SyntaxKind> {
        self.current().map(|t| t.kind)
    }

    fn current_text(&self) -> &str {
        self.current().map_or("", |t| &self.source[t.range])
    }

    fn current_offset(&self) -> TextSize {
        self.current()
            .map_or(TextSize::of(self.source), |t| t.range.start())
    }

    fn advance(&mut self) {
        if let Some(raw) = self.significant.get(self.pos).copied() {
            self.events.push(Event::Token(raw));
            self.pos += 1;
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.significant.len()
    }
}

impl TreeBuilder for GreenTreeBuilder<'_> {
    type Marker = GreenMarker;
    type Tree = HostTree;

    fn mark(&mut self) -> GreenMarker {
        let id = self.events.len();
        self.events.push(Event::Open {
            pos: self.pos,
            closed: None,
        });
        self.open.push(id);
        GreenMarker(id)
    }

    fn done(&mut self, marker: GreenMarker, kind: SyntaxKind) {
        self.close(marker, Closed::Node(kind));
    }

    fn error(&mut self, marker: GreenMarker, message: &str) {
        self.close(marker, Closed::Error(message.to_owned()));
    }

    fn rollback_to(&mut self, marker: GreenMarker) {
        let at = ensure_open(&self.open, marker.0);
        self.open.truncate(at);
        let Event::Open { pos, .. } = self.events[marker.0] else {
            unreachable!("markers always point at open events")
        };
        self.events.truncate(marker.0);
        self.pos = pos;
    }

    /// Builds the tree. Exactly one root region must have been recorded.
    fn finish(self) -> HostTree {
        ensure_finished(self.open.len());
        self.build()
    }
}

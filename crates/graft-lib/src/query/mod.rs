//! Read-only navigation over a projected host tree.
//!
//! Element kinds are resolved through the language: tokens back to their
//! token type, nodes back to the rule they were projected from. Trivia tokens
//! are skipped by every query except raw `rowan` access through [`TreeQuery::root`].

mod printer;


use std::sync::Arc;

use graft_core::{ElementTypes, Language, RuleIndex, TokenType};
use rowan::{NodeOrToken, TextRange, TextSize};

pub use printer::{NodeDump, TreePrinter};

use crate::host::{HostTree, SyntaxElement, SyntaxNode, SyntaxToken};

pub struct TreeQuery<'t> {
    tree: &'t HostTree,
    language: Arc<Language>,
    root: SyntaxNode,
}

impl<'t> TreeQuery<'t> {
    pub fn new(tree: &'t HostTree, language: Arc<Language>) -> Self {
        Self {
            root: tree.syntax(),
            tree,
            language,
        }
    }

    pub fn tree(&self) -> &'t HostTree {
        self.tree
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn root(&self) -> SyntaxNode {
        self.root.clone()
    }

    pub fn printer(&self) -> TreePrinter<'_, 't> {
        TreePrinter::new(self)
    }

    pub fn is_trivia(&self, token: &SyntaxToken) -> bool {
        self.language
            .element_types()
            .token_type_of(token.kind())
            .is_some_and(|ty| self.language.trivia().contains(ty))
    }

    pub fn is_error(&self, node: &SyntaxNode) -> bool {
        node.kind() == ElementTypes::ERROR
    }

    /// Direct children of `node`, trivia excluded.
    pub fn children(&self, node: &SyntaxNode) -> Vec<SyntaxElement> {
        node.children_with_tokens()
            .filter(|child| self.is_significant(child))
            .collect()
    }

    /// `None` for nodes and for host tokens the language does not know
    /// (such as lexer garbage).
    pub fn token_type_of(&self, element: &SyntaxElement) -> Option<TokenType> {
        match element {
            NodeOrToken::Token(token) => self.language.element_types().token_type_of(token.kind()),
            NodeOrToken::Node(_) => None,
        }
    }

    /// `None` for tokens, error nodes and the file root.
    pub fn rule_index_of(&self, element: &SyntaxElement) -> Option<RuleIndex> {
        match element {
            NodeOrToken::Node(node) => self.language.element_types().rule_index_of(node.kind()),
            NodeOrToken::Token(_) => None,
        }
    }

    /// Nodes projected from `rule`, in pre-order. Empty for unknown rules.
    pub fn find_all_rule_nodes(&self, rule: RuleIndex) -> Vec<SyntaxNode> {
        let Some(raw) = self.language.element_types().checked_rule(rule) else {
            return Vec::new();
        };
        self.root
            .descendants()
            .filter(|node| node.kind() == raw)
            .collect()
    }

    /// Tokens of type `ty`, in source order. Empty for `EOF` and unknown types.
    pub fn find_all_token_nodes(&self, ty: TokenType) -> Vec<SyntaxToken> {
        let Some(raw) = self.language.element_types().checked_token(ty) else {
            return Vec::new();
        };
        self.root
            .descendants_with_tokens()
            .filter_map(NodeOrToken::into_token)
            .filter(|token| token.kind() == raw)
            .collect()
    }

    /// `node` and everything below it in pre-order, trivia excluded.
    pub fn descendants<'q>(
        &'q self,
        node: &SyntaxNode,
    ) -> impl Iterator<Item = SyntaxElement> + 'q {
        node.descendants_with_tokens()
            .filter(move |element| self.is_significant(element))
    }

    /// Enclosing nodes of `element`, innermost first, the root last.
    pub fn ancestors(&self, element: &SyntaxElement) -> impl Iterator<Item = SyntaxNode> + use<> {
        let parent = match element {
            NodeOrToken::Node(node) => node.parent(),
            NodeOrToken::Token(token) => token.parent(),
        };
        std::iter::successors(parent, SyntaxNode::parent)
    }

    /// Deepest node whose range covers `start..stop`.
    ///
    /// `None` if the region is inverted or reaches past the tree.
    pub fn root_of_subtree_enclosing(&self, start: TextSize, stop: TextSize) -> Option<SyntaxNode> {
        if start > stop {
            return None;
        }
        let region = TextRange::new(start, stop);
        let mut node = self.root();
        if !node.text_range().contains_range(region) {
            return None;
        }
        while let Some(child) = node
            .children()
            .find(|child| child.text_range().contains_range(region))
        {
            node = child;
        }
        Some(node)
    }

    /// First node in pre-order satisfying `pred`.
    pub fn find_node(&self, pred: impl Fn(&SyntaxNode) -> bool) -> Option<SyntaxNode> {
        self.root.descendants().find(|node| pred(node))
    }

    /// Dump name of an element kind: rule name, symbolic token name, `ERROR` or `FILE`.
    pub fn kind_name(&self, element: &SyntaxElement) -> String {
        self.language.element_name(element.kind())
    }

    fn is_significant(&self, element: &SyntaxElement) -> bool {
        match element {
            NodeOrToken::Token(token) => !self.is_trivia(token),
            NodeOrToken::Node(_) => true,
        }
    }
}

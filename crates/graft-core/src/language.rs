//! Per-language grammar metadata and the element-type mapping.

use indexmap::IndexMap;

use crate::{RuleIndex, TokenSet, TokenType, Vocabulary};

/// What a raw host kind stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// Error element produced by an error marker.
    Error,
    /// Root element wrapping a whole parse.
    File,
    Token(TokenType),
    Rule(RuleIndex),
}

/// Dense mapping between grammar symbols and raw host kinds.
///
/// Layout: `0` error, `1` file, then one slot per vocabulary token type
/// (invalid sentinel included), then one slot per rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementTypes {
    token_count: u16,
    rule_count: u16,
}

impl ElementTypes {
    pub const ERROR: u16 = 0;
    pub const FILE: u16 = 1;
    const TOKENS_START: u16 = 2;

    pub fn new(token_count: usize, rule_count: usize) -> Self {
        let total = Self::TOKENS_START as usize + token_count + rule_count;
        assert!(total < u16::MAX as usize, "ElementTypes: too many symbols ({total})");
        Self {
            token_count: token_count as u16,
            rule_count: rule_count as u16,
        }
    }

    /// Raw kind of a token type. `EOF` has no element.
    pub fn token(&self, ty: TokenType) -> u16 {
        self.ensure_token(ty);
        Self::TOKENS_START + ty.raw()
    }

    pub fn rule(&self, rule: RuleIndex) -> u16 {
        self.ensure_rule(rule);
        Self::TOKENS_START + self.token_count + rule.raw()
    }

    /// Like [`token`](Self::token), but `None` for `EOF` and types outside the vocabulary.
    pub fn checked_token(&self, ty: TokenType) -> Option<u16> {
        (!ty.is_eof() && ty.raw() < self.token_count).then(|| Self::TOKENS_START + ty.raw())
    }

    pub fn checked_rule(&self, rule: RuleIndex) -> Option<u16> {
        (rule.raw() < self.rule_count)
            .then(|| Self::TOKENS_START + self.token_count + rule.raw())
    }

    pub fn element(&self, raw: u16) -> Option<ElementType> {
        let rules_start = Self::TOKENS_START + self.token_count;
        match raw {
            Self::ERROR => Some(ElementType::Error),
            Self::FILE => Some(ElementType::File),
            r if r < rules_start => Some(ElementType::Token(TokenType::new(r - Self::TOKENS_START))),
            r if r < rules_start + self.rule_count => {
                Some(ElementType::Rule(RuleIndex::new(r - rules_start)))
            }
            _ => None,
        }
    }

    pub fn token_type_of(&self, raw: u16) -> Option<TokenType> {
        match self.element(raw)? {
            ElementType::Token(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn rule_index_of(&self, raw: u16) -> Option<RuleIndex> {
        match self.element(raw)? {
            ElementType::Rule(rule) => Some(rule),
            _ => None,
        }
    }

    pub fn token_count(&self) -> usize {
        self.token_count as usize
    }

    pub fn rule_count(&self) -> usize {
        self.rule_count as usize
    }

    /// Total number of raw kinds.
    pub fn len(&self) -> usize {
        Self::TOKENS_START as usize + self.token_count() + self.rule_count()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Grammar metadata for one language: vocabulary, ordered rule names, and
/// the element types derived from both.
#[derive(Clone, Debug)]
pub struct Language {
    name: String,
    vocabulary: Vocabulary,
    rules: IndexMap<String, RuleIndex>,
    start_rule: RuleIndex,
    trivia: TokenSet,
    elements: ElementTypes,
}

impl Language {
    pub fn new<'r>(
        name: impl Into<String>,
        vocabulary: Vocabulary,
        rule_names: impl IntoIterator<Item = &'r str>,
    ) -> Self {
        let rules: IndexMap<String, RuleIndex> = rule_names
            .into_iter()
            .enumerate()
            .map(|(i, name)| (name.to_owned(), RuleIndex::new(i as u16)))
            .collect();
        let elements = ElementTypes::new(vocabulary.len(), rules.len());
        Self {
            name: name.into(),
            vocabulary,
            rules,
            start_rule: RuleIndex::new(0),
            trivia: TokenSet::EMPTY,
            elements,
        }
    }

    pub fn with_start_rule(mut self, rule: RuleIndex) -> Self {
        self.elements.ensure_rule(rule);
        self.start_rule = rule;
        self
    }

    /// Token types the host keeps out of the parser's view (whitespace, comments).
    pub fn with_trivia(mut self, trivia: TokenSet) -> Self {
        self.trivia = trivia;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn element_types(&self) -> &ElementTypes {
        &self.elements
    }

    pub fn trivia(&self) -> TokenSet {
        self.trivia
    }

    pub fn start_rule(&self) -> RuleIndex {
        self.start_rule
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn rule_name(&self, rule: RuleIndex) -> Option<&str> {
        self.rules
            .get_index(rule.as_usize())
            .map(|(name, _)| name.as_str())
    }

    pub fn rule_index(&self, name: &str) -> Option<RuleIndex> {
        self.rules.get(name).copied()
    }

    pub fn token_type(&self, name: &str) -> Option<TokenType> {
        self.vocabulary.token_type(name)
    }

    /// Name of a raw host kind as shown in tree dumps.
    ///
    /// Tokens prefer the symbolic name, rules use the rule name.
    pub fn element_name(&self, raw: u16) -> String {
        match self.elements.element(raw) {
            Some(ElementType::Error) => "ERROR".to_owned(),
            Some(ElementType::File) => "FILE".to_owned(),
            Some(ElementType::Token(ty)) => self
                .vocabulary
                .symbolic_name(ty)
                .or_else(|| self.vocabulary.literal_name(ty))
                .map(str::to_owned)
                .unwrap_or_else(|| format!("T{}", ty.raw())),
            Some(ElementType::Rule(rule)) => self.rule_name(rule).unwrap_or("?").to_owned(),
            None => format!("?{raw}"),
        }
    }
}

//! Token display names.

use crate::{TokenSet, TokenType};

/// Ordered token vocabulary. Index 0 is `<INVALID>`.
///
/// Each entry may carry a literal name (`'func'`, quotes included) and a
/// symbolic name (`FUNC`). Display prefers the literal, dumps prefer the symbol.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Vocabulary {
    literal: Vec<Option<String>>,
    symbolic: Vec<Option<String>>,
}

impl Vocabulary {
    pub fn new<L, S>(literal: L, symbolic: S) -> Self
    where
        L: IntoIterator<Item = Option<&'static str>>,
        S: IntoIterator<Item = Option<&'static str>>,
    {
        let mut literal: Vec<_> = literal.into_iter().map(|s| s.map(str::to_owned)).collect();
        let mut symbolic: Vec<_> = symbolic.into_iter().map(|s| s.map(str::to_owned)).collect();
        let len = literal.len().max(symbolic.len()).max(1);
        literal.resize(len, None);
        symbolic.resize(len, None);
        // Slot 0 is the invalid sentinel regardless of what the grammar listed.
        literal[0] = None;
        symbolic[0] = Some("<INVALID>".to_owned());
        Self { literal, symbolic }
    }

    /// Number of slots, including the invalid sentinel.
    pub fn len(&self) -> usize {
        self.literal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// Token types `1..len`, excluding the invalid sentinel and `EOF`.
    pub fn token_types(&self) -> impl Iterator<Item = TokenType> {
        (1..self.len() as u16).map(TokenType::new)
    }

    pub fn literal_name(&self, ty: TokenType) -> Option<&str> {
        self.literal.get(ty.raw() as usize)?.as_deref()
    }

    pub fn symbolic_name(&self, ty: TokenType) -> Option<&str> {
        if ty.is_eof() {
            return Some("EOF");
        }
        self.symbolic.get(ty.raw() as usize)?.as_deref()
    }

    /// Human-facing name: literal, then symbolic, then the raw number.
    pub fn display_name(&self, ty: TokenType) -> String {
        if let Some(lit) = self.literal_name(ty) {
            return lit.to_owned();
        }
        if let Some(sym) = self.symbolic_name(ty) {
            return sym.to_owned();
        }
        ty.raw().to_string()
    }

    /// Name used inside expected-set listings; `EOF` renders as `<EOF>`.
    pub fn element_name(&self, ty: TokenType) -> String {
        if ty.is_eof() {
            return "<EOF>".to_owned();
        }
        self.display_name(ty)
    }

    /// `'x'` for one member, `{'x', ID}` for several, `{}` when empty.
    pub fn display_set(&self, set: &TokenSet) -> String {
        let names: Vec<String> = set.iter().map(|ty| self.element_name(ty)).collect();
        match names.as_slice() {
            [single] => single.clone(),
            _ => format!("{{{}}}", names.join(", ")),
        }
    }

    /// Finds a token type by literal (`'func'`) or symbolic (`ID`) name.
    pub fn token_type(&self, name: &str) -> Option<TokenType> {
        if name == "EOF" {
            return Some(TokenType::EOF);
        }
        (1..self.len()).find_map(|i| {
            let hit = self.literal[i].as_deref() == Some(name)
                || self.symbolic[i].as_deref() == Some(name);
            hit.then(|| TokenType::new(i as u16))
        })
    }
}

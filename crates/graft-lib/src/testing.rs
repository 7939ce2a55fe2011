//! Test fixtures: a one-char-per-token grammar and a recording tree builder.

use std::sync::{Arc, LazyLock};

use graft_core::{ElementTypes, Language, RuleIndex, TokenSet, TokenType, Vocabulary};
use rowan::{SyntaxKind, TextRange, TextSize};

use crate::host::{HostToken, TokenCursor, TreeBuilder};
use crate::runtime::{HIDDEN_CHANNEL, PResult, Parser, Recognizer, Token, TokenSource};
use crate::Error;

pub const X: TokenType = TokenType::new(1);
pub const Y: TokenType = TokenType::new(2);
pub const Z: TokenType = TokenType::new(3);
pub const SEMI: TokenType = TokenType::new(4);
pub const LPAREN: TokenType = TokenType::new(5);
pub const RPAREN: TokenType = TokenType::new(6);
pub const WS: TokenType = TokenType::new(7);
pub const EOF: TokenType = TokenType::EOF;

pub const PAIR: RuleIndex = RuleIndex::new(0);
pub const ITEMS: RuleIndex = RuleIndex::new(1);
pub const CHOICE: RuleIndex = RuleIndex::new(2);
pub const GUARDED: RuleIndex = RuleIndex::new(3);
pub const DEEP: RuleIndex = RuleIndex::new(4);
pub const LOOKAHEAD: RuleIndex = RuleIndex::new(5);
pub const GROUP: RuleIndex = RuleIndex::new(6);

const EOR: TokenSet = TokenSet::END_OF_RULE;
const ITEMS_LOOP: TokenSet = TokenSet::new(&[X, EOF]);

pub static XYZ: LazyLock<Arc<Language>> = LazyLock::new(|| {
    let vocab = Vocabulary::new(
        [
            None,
            Some("'x'"),
            Some("'y'"),
            Some("'z'"),
            Some("';'"),
            Some("'('"),
            Some("')'"),
            None,
        ],
        [
            None,
            Some("X"),
            Some("Y"),
            Some("Z"),
            Some("SEMI"),
            Some("LPAREN"),
            Some("RPAREN"),
            Some("WS"),
        ],
    );
    let rules = ["pair", "items", "choice", "guarded", "deep", "lookahead", "group"];
    Arc::new(Language::new("xyz", vocab, rules).with_trivia(TokenSet::single(WS)))
});

fn classify(c: char) -> TokenType {
    match c {
        'x' => X,
        'y' => Y,
        'z' => Z,
        ';' => SEMI,
        '(' => LPAREN,
        ')' => RPAREN,
        ' ' => WS,
        _ => TokenType::INVALID,
    }
}

/// One token per char; spaces go to the hidden channel.
pub struct CharSource {
    chars: Vec<(usize, char)>,
    next: usize,
    len: usize,
}

impl CharSource {
    pub fn new(src: &str) -> Self {
        Self {
            chars: src.char_indices().collect(),
            next: 0,
            len: src.len(),
        }
    }
}

impl TokenSource for CharSource {
    fn next_token(&mut self) -> Result<Token, Error> {
        let Some(&(offset, c)) = self.chars.get(self.next) else {
            return Ok(Token::eof(TextSize::from(self.len as u32)));
        };
        self.next += 1;
        let ty = classify(c);
        let span = TextRange::at(TextSize::from(offset as u32), TextSize::of(c));
        let token = Token::new(ty, c.to_string(), span);
        Ok(if ty == WS {
            token.with_channel(HIDDEN_CHANNEL)
        } else {
            token
        })
    }
}

/// Host tokens for `src`; unknown chars become `ERROR` tokens.
pub fn host_tokens(src: &str) -> Vec<HostToken> {
    let elements = XYZ.element_types();
    src.char_indices()
        .map(|(offset, c)| {
            let ty = classify(c);
            let kind = if ty.is_invalid() {
                ElementTypes::ERROR
            } else {
                elements.token(ty)
            };
            HostToken {
                kind: SyntaxKind(kind),
                range: TextRange::at(TextSize::from(offset as u32), TextSize::of(c)),
            }
        })
        .collect()
}

pub fn parser<'a>(src: &str) -> Parser<'a> {
    Parser::new(Box::new(CharSource::new(src)), XYZ.clone())
}

/// ```text
/// pair      : 'x' 'y' ;
/// items     : (pair ';')* EOF ;
/// choice    : 'x' 'y' | 'x' 'z' ;
/// guarded   : {false}? 'x' ;
/// deep      : 'x' deep | 'y' ;
/// lookahead : ('x' 'z')=> 'x' 'z' | 'x' 'y' ;
/// group     : '(' pair ')' ;
/// ```
pub struct XyzGrammar;

impl Recognizer for XyzGrammar {
    fn language(&self) -> Arc<Language> {
        XYZ.clone()
    }

    fn parse(&self, entry: RuleIndex, p: &mut Parser<'_>) -> PResult<()> {
        match entry {
            PAIR => pair(p),
            ITEMS => items(p),
            CHOICE => choice(p),
            GUARDED => guarded(p),
            DEEP => deep(p),
            LOOKAHEAD => lookahead(p),
            _ => group(p),
        }
    }
}

pub fn pair(p: &mut Parser<'_>) -> PResult<()> {
    p.rule(PAIR, |p| {
        p.expect(X, TokenSet::single(Y))?;
        p.expect(Y, EOR)?;
        Ok(())
    })
}

pub fn items(p: &mut Parser<'_>) -> PResult<()> {
    p.rule(ITEMS, |p| {
        loop {
            p.sync(ITEMS_LOOP)?;
            if p.la(1)? != X {
                break;
            }
            p.invoke(TokenSet::single(SEMI), pair)?;
            p.expect(SEMI, ITEMS_LOOP)?;
        }
        p.expect(EOF, EOR)?;
        Ok(())
    })
}

pub fn choice(p: &mut Parser<'_>) -> PResult<()> {
    p.rule(CHOICE, |p| {
        if p.la(1)? != X {
            return Err(p.no_viable_alt(1));
        }
        match p.la(2)? {
            Y => {
                p.expect(X, TokenSet::single(Y))?;
                p.expect(Y, EOR)?;
            }
            Z => {
                p.expect(X, TokenSet::single(Z))?;
                p.expect(Z, EOR)?;
            }
            _ => return Err(p.no_viable_alt(2)),
        }
        Ok(())
    })
}

pub fn guarded(p: &mut Parser<'_>) -> PResult<()> {
    p.rule(GUARDED, |p| {
        p.predicate(false, "false")?;
        p.expect(X, EOR)?;
        Ok(())
    })
}

pub fn deep(p: &mut Parser<'_>) -> PResult<()> {
    p.rule(DEEP, |p| {
        if p.la(1)? == X {
            p.expect(X, TokenSet::new(&[X, Y]))?;
            p.invoke(EOR, deep)?;
        } else {
            p.expect(Y, EOR)?;
        }
        Ok(())
    })
}

pub fn lookahead(p: &mut Parser<'_>) -> PResult<()> {
    p.rule(LOOKAHEAD, |p| {
        let xz = p.speculate(|p| {
            p.expect(X, TokenSet::single(Z))?;
            p.expect(Z, EOR)?;
            Ok(())
        })?;
        let second = if xz { Z } else { Y };
        p.expect(X, TokenSet::single(second))?;
        p.expect(second, EOR)?;
        Ok(())
    })
}

pub fn group(p: &mut Parser<'_>) -> PResult<()> {
    p.rule(GROUP, |p| {
        p.expect(LPAREN, TokenSet::single(X))?;
        p.invoke(TokenSet::single(RPAREN), pair)?;
        p.expect(RPAREN, EOR)?;
        Ok(())
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Op {
    Mark(usize),
    Done(usize, String),
    Error(usize, String),
    Advance(String),
}

/// Tree builder double that logs marker operations instead of building a tree.
///
/// Trivia is dropped up front. Nesting is checked like a real host would.
pub struct RecordingBuilder {
    tokens: Vec<(SyntaxKind, String, TextSize)>,
    end: TextSize,
    pos: usize,
    next_marker: usize,
    /// (marker, position at mark, log length at mark)
    open: Vec<(usize, usize, usize)>,
    ops: Vec<Op>,
}

#[derive(Debug)]
pub struct Recording {
    pub ops: Vec<Op>,
    pub position: usize,
}

impl Recording {
    pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Error(_, msg) => Some(msg.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl RecordingBuilder {
    pub fn new(src: &str) -> Self {
        let tokens = host_tokens(src)
            .into_iter()
            .filter(|t| {
                XYZ.element_types().token_type_of(t.kind.0) != Some(WS)
            })
            .map(|t| (t.kind, src[t.range].to_owned(), t.range.start()))
            .collect();
        Self {
            tokens,
            end: TextSize::of(src),
            pos: 0,
            next_marker: 0,
            open: Vec::new(),
            ops: Vec::new(),
        }
    }

    fn close(&mut self, marker: usize) {
        let (innermost, _, _) = self.open.pop().expect("close without open marker");
        assert_eq!(innermost, marker, "markers must close innermost first");
    }
}

impl TokenCursor for RecordingBuilder {
    fn current_kind(&self) -> Option<SyntaxKind> {
        self.tokens.get(self.pos).map(|t| t.0)
    }

    fn current_text(&self) -> &str {
        self.tokens.get(self.pos).map_or("", |t| t.1.as_str())
    }

    fn current_offset(&self) -> TextSize {
        self.tokens.get(self.pos).map_or(self.end, |t| t.2)
    }

    fn advance(&mut self) {
        if let Some(t) = self.tokens.get(self.pos) {
            self.ops.push(Op::Advance(t.1.clone()));
            self.pos += 1;
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}

impl TreeBuilder for RecordingBuilder {
    type Marker = usize;
    type Tree = Recording;

    fn mark(&mut self) -> usize {
        let id = self.next_marker;
        self.next_marker += 1;
        self.open.push((id, self.pos, self.ops.len()));
        self.ops.push(Op::Mark(id));
        id
    }

    fn done(&mut self, marker: usize, kind: SyntaxKind) {
        self.close(marker);
        self.ops.push(Op::Done(marker, XYZ.element_name(kind.0)));
    }

    fn error(&mut self, marker: usize, message: &str) {
        self.close(marker);
        self.ops.push(Op::Error(marker, message.to_owned()));
    }

    fn rollback_to(&mut self, marker: usize) {
        let at = self
            .open
            .iter()
            .rposition(|(m, _, _)| *m == marker)
            .expect("rollback to a closed marker");
        let (_, pos, log) = self.open[at];
        self.open.truncate(at);
        self.ops.truncate(log);
        self.pos = pos;
    }

    fn finish(self) -> Recording {
        assert!(self.open.is_empty(), "finish with open markers");
        Recording {
            ops: self.ops,
            position: self.pos,
        }
    }
}

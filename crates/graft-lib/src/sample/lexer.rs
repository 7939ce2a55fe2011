//! Host lexer for the sample language.
//!
//! Consecutive unrecognized characters are coalesced into a single `ERROR`
//! token, so a run of garbage becomes one error region instead of many.

use std::ops::Range;

use graft_core::{ElementTypes, TokenType};
use logos::Logos;
use rowan::{SyntaxKind, TextRange};

use super::tokens;
use crate::host::HostToken;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    #[token("func")]
    Func,
    #[token("var")]
    Var,
    #[token("return")]
    Return,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token("=")]
    Assign,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    /// Defined after keywords so they take precedence.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Id,
    #[regex(r"[0-9]+")]
    Int,
    #[regex(r#""(?:[^"\\]|\\.)*""#)]
    Str,

    #[regex(r"[ \t\r\n]+")]
    Whitespace,
    #[regex(r"//[^\n]*", allow_greedy = true)]
    Comment,
}

impl Lexeme {
    fn token_type(self) -> TokenType {
        match self {
            Lexeme::Func => tokens::FUNC,
            Lexeme::Var => tokens::VAR,
            Lexeme::Return => tokens::RETURN,
            Lexeme::LParen => tokens::LPAREN,
            Lexeme::RParen => tokens::RPAREN,
            Lexeme::LBrace => tokens::LBRACE,
            Lexeme::RBrace => tokens::RBRACE,
            Lexeme::Comma => tokens::COMMA,
            Lexeme::Semi => tokens::SEMI,
            Lexeme::Assign => tokens::ASSIGN,
            Lexeme::Plus => tokens::PLUS,
            Lexeme::Minus => tokens::MINUS,
            Lexeme::Star => tokens::STAR,
            Lexeme::Slash => tokens::SLASH,
            Lexeme::Id => tokens::ID,
            Lexeme::Int => tokens::INT,
            Lexeme::Str => tokens::STRING,
            Lexeme::Whitespace => tokens::WS,
            Lexeme::Comment => tokens::COMMENT,
        }
    }
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Tokenizes `source` into host tokens covering all of it.
pub fn lex(source: &str) -> Vec<HostToken> {
    let language = super::language();
    let elements = language.element_types();
    let mut tokens = Vec::new();
    let mut lexer = Lexeme::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(lexeme)) => {
                if let Some(start) = error_start.take() {
                    tokens.push(garbage(start..lexer.span().start));
                }
                tokens.push(HostToken {
                    kind: SyntaxKind(elements.token(lexeme.token_type())),
                    range: range_to_text_range(lexer.span()),
                });
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(garbage(start..source.len()));
                }
                break;
            }
        }
    }

    tokens
}

fn garbage(range: Range<usize>) -> HostToken {
    HostToken {
        kind: SyntaxKind(ElementTypes::ERROR),
        range: range_to_text_range(range),
    }
}

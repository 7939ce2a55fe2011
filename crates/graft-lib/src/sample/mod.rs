//! A small scripting language wired end to end: `logos` host lexer,
//! recursive-descent grammar, registered metadata.
//!
//! ```text
//! script    : (function | statement)* EOF ;
//! function  : 'func' ID '(' params? ')' block ;
//! params    : ID (',' ID)* ;
//! block     : '{' statement* '}' ;
//! statement : 'var' ID '=' expr ';'
//!           | (ID '=')=> ID '=' expr ';'
//!           | ID '(' ... ')' ';'        // call, parsed as expr
//!           | 'return' expr? ';'
//!           | block ;
//! expr      : term (('+' | '-') term)* ;
//! term      : primary (('*' | '/') primary)* ;
//! primary   : INT | STRING | ID ('(' args? ')')? | '(' expr ')' ;
//! args      : expr (',' expr)* ;
//! ```

mod grammar;
mod lexer;

#[cfg(test)]
mod grammar_tests;
#[cfg(test)]
mod lexer_tests;

use std::sync::Arc;

use graft_core::{ElementTypes, Language, TokenSet, Vocabulary};
use rowan::SyntaxKind;

pub use grammar::SampleGrammar;
pub use lexer::lex;

use crate::bridge::ParseDriver;
use crate::host::{GreenTreeBuilder, HostTree};
use crate::runtime::CancellationToken;
use crate::Error;

pub const NAME: &str = "sample";

pub mod tokens {
    use graft_core::TokenType;

    pub const FUNC: TokenType = TokenType::new(1);
    pub const VAR: TokenType = TokenType::new(2);
    pub const RETURN: TokenType = TokenType::new(3);
    pub const LPAREN: TokenType = TokenType::new(4);
    pub const RPAREN: TokenType = TokenType::new(5);
    pub const LBRACE: TokenType = TokenType::new(6);
    pub const RBRACE: TokenType = TokenType::new(7);
    pub const COMMA: TokenType = TokenType::new(8);
    pub const SEMI: TokenType = TokenType::new(9);
    pub const ASSIGN: TokenType = TokenType::new(10);
    pub const PLUS: TokenType = TokenType::new(11);
    pub const MINUS: TokenType = TokenType::new(12);
    pub const STAR: TokenType = TokenType::new(13);
    pub const SLASH: TokenType = TokenType::new(14);
    pub const ID: TokenType = TokenType::new(15);
    pub const INT: TokenType = TokenType::new(16);
    pub const STRING: TokenType = TokenType::new(17);
    pub const WS: TokenType = TokenType::new(18);
    pub const COMMENT: TokenType = TokenType::new(19);
    pub const EOF: TokenType = TokenType::EOF;
}

pub mod rules {
    use graft_core::RuleIndex;

    pub const SCRIPT: RuleIndex = RuleIndex::new(0);
    pub const FUNCTION: RuleIndex = RuleIndex::new(1);
    pub const PARAMS: RuleIndex = RuleIndex::new(2);
    pub const BLOCK: RuleIndex = RuleIndex::new(3);
    pub const STATEMENT: RuleIndex = RuleIndex::new(4);
    pub const EXPR: RuleIndex = RuleIndex::new(5);
    pub const TERM: RuleIndex = RuleIndex::new(6);
    pub const PRIMARY: RuleIndex = RuleIndex::new(7);
    pub const ARGS: RuleIndex = RuleIndex::new(8);
}

const LITERAL_NAMES: [Option<&str>; 20] = [
    None,
    Some("'func'"),
    Some("'var'"),
    Some("'return'"),
    Some("'('"),
    Some("')'"),
    Some("'{'"),
    Some("'}'"),
    Some("','"),
    Some("';'"),
    Some("'='"),
    Some("'+'"),
    Some("'-'"),
    Some("'*'"),
    Some("'/'"),
    None,
    None,
    None,
    None,
    None,
];

const SYMBOLIC_NAMES: [Option<&str>; 20] = [
    None,
    Some("FUNC"),
    Some("VAR"),
    Some("RETURN"),
    Some("LPAREN"),
    Some("RPAREN"),
    Some("LBRACE"),
    Some("RBRACE"),
    Some("COMMA"),
    Some("SEMI"),
    Some("ASSIGN"),
    Some("PLUS"),
    Some("MINUS"),
    Some("STAR"),
    Some("SLASH"),
    Some("ID"),
    Some("INT"),
    Some("STRING"),
    Some("WS"),
    Some("COMMENT"),
];

const RULE_NAMES: [&str; 9] = [
    "script",
    "function",
    "params",
    "block",
    "statement",
    "expr",
    "term",
    "primary",
    "args",
];

/// The sample language, registered on first use.
pub fn language() -> Arc<Language> {
    graft_core::register_with(NAME, || {
        let vocabulary = Vocabulary::new(LITERAL_NAMES, SYMBOLIC_NAMES);
        Language::new(NAME, vocabulary, RULE_NAMES)
            .with_start_rule(rules::SCRIPT)
            .with_trivia(TokenSet::new(&[tokens::WS, tokens::COMMENT]))
    })
}

/// Kind of the root node wrapping a whole source file.
pub fn file_kind() -> SyntaxKind {
    SyntaxKind(ElementTypes::FILE)
}

/// Host tree builder over the lexed `source`.
pub fn builder(source: &str) -> GreenTreeBuilder<'_> {
    let language = language();
    GreenTreeBuilder::new(
        source,
        lex(source),
        language.element_types(),
        language.trivia(),
    )
}

/// Parses a whole script.
pub fn parse(source: &str) -> Result<HostTree, Error> {
    parse_with(source, CancellationToken::new())
}

pub fn parse_with(source: &str, cancel: CancellationToken) -> Result<HostTree, Error> {
    ParseDriver::new(SampleGrammar)
        .with_cancellation(cancel)
        .project(rules::SCRIPT, file_kind(), builder(source))
}

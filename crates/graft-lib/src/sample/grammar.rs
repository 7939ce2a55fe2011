use std::sync::Arc;

use graft_core::{Language, RuleIndex, TokenSet};

use super::rules::*;
use super::tokens::*;
use crate::runtime::{PResult, Parser, Recognizer};

const EOR: TokenSet = TokenSet::END_OF_RULE;

const FIRST_STMT: TokenSet = TokenSet::new(&[VAR, RETURN, LBRACE, ID]);
const FIRST_EXPR: TokenSet = TokenSet::new(&[INT, STRING, ID, LPAREN]);

/// What may start or end an iteration of the top-level loop.
const SCRIPT_LOOP: TokenSet = FIRST_STMT.with(FUNC).with(EOF);
const BLOCK_LOOP: TokenSet = FIRST_STMT.with(RBRACE);

const ADD_OPS: TokenSet = TokenSet::new(&[PLUS, MINUS]);
const MUL_OPS: TokenSet = TokenSet::new(&[STAR, SLASH]);

/// Recursive-descent recognizer for the sample language.
#[derive(Clone, Copy, Debug, Default)]
pub struct SampleGrammar;

impl Recognizer for SampleGrammar {
    fn language(&self) -> Arc<Language> {
        super::language()
    }

    fn parse(&self, entry: RuleIndex, p: &mut Parser<'_>) -> PResult<()> {
        match entry {
            SCRIPT => script(p),
            FUNCTION => function(p),
            PARAMS => params(p),
            BLOCK => block(p),
            STATEMENT => statement(p),
            EXPR => expr(p),
            TERM => term(p),
            PRIMARY => primary(p),
            _ => args(p),
        }
    }
}

fn script(p: &mut Parser<'_>) -> PResult<()> {
    p.rule(SCRIPT, |p| {
        loop {
            p.sync(SCRIPT_LOOP)?;
            match p.la(1)? {
                FUNC => p.invoke(SCRIPT_LOOP, function)?,
                ty if FIRST_STMT.contains(ty) => p.invoke(SCRIPT_LOOP, statement)?,
                _ => break,
            }
        }
        p.expect(EOF, EOR)?;
        Ok(())
    })
}

fn function(p: &mut Parser<'_>) -> PResult<()> {
    p.rule(FUNCTION, |p| {
        p.expect(FUNC, TokenSet::single(ID))?;
        p.expect(ID, TokenSet::single(LPAREN))?;
        p.expect(LPAREN, TokenSet::new(&[ID, RPAREN]))?;
        if p.la(1)? == ID {
            p.invoke(TokenSet::single(RPAREN), params)?;
        }
        p.expect(RPAREN, TokenSet::single(LBRACE))?;
        p.invoke(EOR, block)
    })
}

fn params(p: &mut Parser<'_>) -> PResult<()> {
    let after_id = TokenSet::single(COMMA).with_end_of_rule();
    p.rule(PARAMS, |p| {
        p.expect(ID, after_id)?;
        while p.la(1)? == COMMA {
            p.expect(COMMA, TokenSet::single(ID))?;
            p.expect(ID, after_id)?;
        }
        Ok(())
    })
}

fn block(p: &mut Parser<'_>) -> PResult<()> {
    p.rule(BLOCK, |p| {
        p.expect(LBRACE, BLOCK_LOOP)?;
        loop {
            p.sync(BLOCK_LOOP)?;
            if !FIRST_STMT.contains(p.la(1)?) {
                break;
            }
            p.invoke(BLOCK_LOOP, statement)?;
        }
        p.expect(RBRACE, EOR)?;
        Ok(())
    })
}

fn statement(p: &mut Parser<'_>) -> PResult<()> {
    p.rule(STATEMENT, |p| {
        match p.la(1)? {
            VAR => {
                p.expect(VAR, TokenSet::single(ID))?;
                assignment_tail(p)?;
            }
            RETURN => {
                p.expect(RETURN, FIRST_EXPR.with(SEMI))?;
                if FIRST_EXPR.contains(p.la(1)?) {
                    p.invoke(TokenSet::single(SEMI), expr)?;
                }
                p.expect(SEMI, EOR)?;
            }
            LBRACE => p.invoke(EOR, block)?,
            ID => {
                let is_assignment = p.speculate(|p| {
                    p.expect(ID, TokenSet::single(ASSIGN))?;
                    p.expect(ASSIGN, FIRST_EXPR)?;
                    Ok(())
                })?;
                if is_assignment {
                    assignment_tail(p)?;
                } else if p.la(2)? == LPAREN {
                    p.invoke(TokenSet::single(SEMI), expr)?;
                    p.expect(SEMI, EOR)?;
                } else {
                    return Err(p.no_viable_alt(2));
                }
            }
            _ => return Err(p.no_viable_alt(1)),
        }
        Ok(())
    })
}

/// `ID '=' expr ';'`
fn assignment_tail(p: &mut Parser<'_>) -> PResult<()> {
    p.expect(ID, TokenSet::single(ASSIGN))?;
    p.expect(ASSIGN, FIRST_EXPR)?;
    p.invoke(TokenSet::single(SEMI), expr)?;
    p.expect(SEMI, EOR)?;
    Ok(())
}

fn expr(p: &mut Parser<'_>) -> PResult<()> {
    let follow = ADD_OPS.with_end_of_rule();
    p.rule(EXPR, |p| {
        p.invoke(follow, term)?;
        loop {
            let op = p.la(1)?;
            if !ADD_OPS.contains(op) {
                break;
            }
            p.expect(op, FIRST_EXPR)?;
            p.invoke(follow, term)?;
        }
        Ok(())
    })
}

fn term(p: &mut Parser<'_>) -> PResult<()> {
    let follow = MUL_OPS.with_end_of_rule();
    p.rule(TERM, |p| {
        p.invoke(follow, primary)?;
        loop {
            let op = p.la(1)?;
            if !MUL_OPS.contains(op) {
                break;
            }
            p.expect(op, FIRST_EXPR)?;
            p.invoke(follow, primary)?;
        }
        Ok(())
    })
}

fn primary(p: &mut Parser<'_>) -> PResult<()> {
    p.rule(PRIMARY, |p| {
        match p.la(1)? {
            INT => {
                p.expect(INT, EOR)?;
            }
            STRING => {
                p.expect(STRING, EOR)?;
            }
            ID => {
                p.expect(ID, TokenSet::single(LPAREN).with_end_of_rule())?;
                if p.la(1)? == LPAREN {
                    p.expect(LPAREN, FIRST_EXPR.with(RPAREN))?;
                    if FIRST_EXPR.contains(p.la(1)?) {
                        p.invoke(TokenSet::single(RPAREN), args)?;
                    }
                    p.expect(RPAREN, EOR)?;
                }
            }
            LPAREN => {
                p.expect(LPAREN, FIRST_EXPR)?;
                p.invoke(TokenSet::single(RPAREN), expr)?;
                p.expect(RPAREN, EOR)?;
            }
            _ => return Err(p.no_viable_alt(1)),
        }
        Ok(())
    })
}

fn args(p: &mut Parser<'_>) -> PResult<()> {
    let follow = TokenSet::single(COMMA).with_end_of_rule();
    p.rule(ARGS, |p| {
        p.invoke(follow, expr)?;
        while p.la(1)? == COMMA {
            p.expect(COMMA, FIRST_EXPR)?;
            p.invoke(follow, expr)?;
        }
        Ok(())
    })
}

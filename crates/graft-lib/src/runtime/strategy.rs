//! Error reporting and recovery policy.
//!
//! `ErrorStrategy` is a hook trait: every method has a default, and the
//! defaults live in [`defaults`] as free functions so an override can still
//! delegate to the stock behavior.

use graft_core::{TokenSet, TokenType};

use super::exception::{ExceptionKind, PResult, RecognitionException};
use super::parser::{Parser, RecoveryState};
use super::token::{Token, quote};
use crate::Error;

pub trait ErrorStrategy {
    fn in_error_recovery_mode(&self, p: &Parser<'_>) -> bool {
        p.recovery().in_recovery
    }

    fn begin_error_condition(&self, p: &mut Parser<'_>) {
        p.recovery_mut().in_recovery = true;
    }

    fn end_error_condition(&self, p: &mut Parser<'_>) {
        *p.recovery_mut() = RecoveryState::default();
    }

    /// Called after every successful match.
    fn report_match(&self, p: &mut Parser<'_>) {
        self.end_error_condition(p);
    }

    fn report_error(&self, p: &mut Parser<'_>, e: &RecognitionException) {
        defaults::report_error(self, p, e);
    }

    /// Resynchronizes after a rule failed with `e`.
    fn recover(&self, p: &mut Parser<'_>, e: &RecognitionException) -> Result<(), Error> {
        defaults::recover(self, p, e)
    }

    /// Recovers from a mismatched `expected` token without leaving the rule.
    fn recover_inline(
        &self,
        p: &mut Parser<'_>,
        expected: TokenType,
        follow: TokenSet,
    ) -> PResult<Token> {
        defaults::recover_inline(self, p, expected, follow)
    }

    fn single_token_deletion(
        &self,
        p: &mut Parser<'_>,
        expected: TokenType,
    ) -> Result<Option<Token>, Error> {
        defaults::single_token_deletion(self, p, expected)
    }

    fn single_token_insertion(
        &self,
        p: &mut Parser<'_>,
        expected: TokenType,
        follow: TokenSet,
    ) -> Result<bool, Error> {
        defaults::single_token_insertion(self, p, expected, follow)
    }

    /// Placeholder for a token the input lacks.
    fn missing_symbol(&self, p: &mut Parser<'_>, expected: TokenType) -> Result<Token, Error> {
        defaults::missing_symbol(p, expected)
    }

    fn report_unwanted_token(&self, p: &mut Parser<'_>, expecting: TokenSet) -> Result<(), Error> {
        defaults::report_unwanted_token(self, p, expecting)
    }

    fn report_missing_token(&self, p: &mut Parser<'_>, expecting: TokenSet) -> Result<(), Error> {
        defaults::report_missing_token(self, p, expecting)
    }

    fn sync(&self, p: &mut Parser<'_>, expecting: TokenSet) -> Result<(), Error> {
        defaults::sync(self, p, expecting)
    }

    /// Consumes tokens until one in `set` (or `EOF`) is current.
    fn consume_until(&self, p: &mut Parser<'_>, set: TokenSet) -> Result<(), Error> {
        defaults::consume_until(p, set)
    }
}

/// Stock strategy: every hook at its default.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultErrorStrategy;

impl ErrorStrategy for DefaultErrorStrategy {}

pub mod defaults {
    use super::*;

    pub fn report_error<S: ErrorStrategy + ?Sized>(
        s: &S,
        p: &mut Parser<'_>,
        e: &RecognitionException,
    ) {
        if s.in_error_recovery_mode(p) {
            return;
        }
        s.begin_error_condition(p);
        let msg = match &e.kind {
            ExceptionKind::NoViableAlt { start } => {
                let input = if start.ty.is_eof() {
                    "<EOF>".to_owned()
                } else {
                    p.text_between(start, &e.offending)
                };
                format!("no viable alternative at input {}", quote(&input))
            }
            ExceptionKind::InputMismatch => format!(
                "mismatched input {} expecting {}",
                e.offending.error_display(),
                p.language().vocabulary().display_set(&e.expected)
            ),
            ExceptionKind::FailedPredicate { predicate } => format!(
                "rule {} failed predicate: {{{}}}?",
                p.language().rule_name(e.rule).unwrap_or("?"),
                predicate
            ),
        };
        p.notify_error_listeners(&e.offending, &msg, Some(e));
    }

    pub fn recover<S: ErrorStrategy + ?Sized>(
        s: &S,
        p: &mut Parser<'_>,
        _e: &RecognitionException,
    ) -> Result<(), Error> {
        let rule = p.current_rule();
        let stalled = {
            let r = p.recovery();
            r.last_error_index == Some(p.index())
                && rule.is_some_and(|rule| r.last_error_rules.contains(&rule))
        };
        if stalled {
            // Same spot, same rule: recovery made no progress last time.
            p.consume()?;
        }
        let index = p.index();
        let r = p.recovery_mut();
        r.last_error_index = Some(index);
        if let Some(rule) = rule {
            r.last_error_rules.push(rule);
        }
        let follow = p.error_recovery_set();
        s.consume_until(p, follow)
    }

    pub fn recover_inline<S: ErrorStrategy + ?Sized>(
        s: &S,
        p: &mut Parser<'_>,
        expected: TokenType,
        follow: TokenSet,
    ) -> PResult<Token> {
        if let Some(matched) = s.single_token_deletion(p, expected)? {
            p.consume()?;
            return Ok(matched);
        }
        if s.single_token_insertion(p, expected, follow)? {
            return Ok(s.missing_symbol(p, expected)?);
        }
        Err(p.input_mismatch(TokenSet::single(expected)))
    }

    /// Drops the current token if the one after it is `expected`.
    pub fn single_token_deletion<S: ErrorStrategy + ?Sized>(
        s: &S,
        p: &mut Parser<'_>,
        expected: TokenType,
    ) -> Result<Option<Token>, Error> {
        if p.la(2)? != expected {
            return Ok(None);
        }
        s.report_unwanted_token(p, TokenSet::single(expected))?;
        p.consume()?;
        let matched = p.lt(1)?.clone();
        s.report_match(p);
        Ok(Some(matched))
    }

    /// Pretends `expected` was present if the current token could follow it.
    pub fn single_token_insertion<S: ErrorStrategy + ?Sized>(
        s: &S,
        p: &mut Parser<'_>,
        expected: TokenType,
        follow: TokenSet,
    ) -> Result<bool, Error> {
        let current = p.la(1)?;
        if !p.viable_follow(follow).contains(current) {
            return Ok(false);
        }
        s.report_missing_token(p, TokenSet::single(expected))?;
        Ok(true)
    }

    /// `<missing 'x'>` without a position, carrying the line/column of the
    /// nearest real token.
    pub fn missing_symbol(p: &mut Parser<'_>, expected: TokenType) -> Result<Token, Error> {
        let text = if expected.is_eof() {
            "<missing EOF>".to_owned()
        } else {
            format!(
                "<missing {}>",
                p.language().vocabulary().display_name(expected)
            )
        };
        let mut near = p.lt(1)?.clone();
        if near.ty.is_eof()
            && let Some(back) = p.lt_back(1)
        {
            near = back.clone();
        }
        let mut token = Token::conjured(expected, text);
        token.line = near.line;
        token.column = near.column;
        Ok(token)
    }

    pub fn report_unwanted_token<S: ErrorStrategy + ?Sized>(
        s: &S,
        p: &mut Parser<'_>,
        expecting: TokenSet,
    ) -> Result<(), Error> {
        if s.in_error_recovery_mode(p) {
            return Ok(());
        }
        s.begin_error_condition(p);
        let token = p.lt(1)?.clone();
        let expecting = p.viable_follow(expecting);
        let msg = format!(
            "extraneous input {} expecting {}",
            token.error_display(),
            p.language().vocabulary().display_set(&expecting)
        );
        p.notify_error_listeners(&token, &msg, None);
        Ok(())
    }

    pub fn report_missing_token<S: ErrorStrategy + ?Sized>(
        s: &S,
        p: &mut Parser<'_>,
        expecting: TokenSet,
    ) -> Result<(), Error> {
        if s.in_error_recovery_mode(p) {
            return Ok(());
        }
        s.begin_error_condition(p);
        let token = p.lt(1)?.clone();
        let expecting = p.viable_follow(expecting);
        let msg = format!(
            "missing {} at {}",
            p.language().vocabulary().display_set(&expecting),
            token.error_display()
        );
        p.notify_error_listeners(&token, &msg, None);
        Ok(())
    }

    pub fn sync<S: ErrorStrategy + ?Sized>(
        s: &S,
        p: &mut Parser<'_>,
        expecting: TokenSet,
    ) -> Result<(), Error> {
        if s.in_error_recovery_mode(p) {
            return Ok(());
        }
        let la = p.la(1)?;
        if expecting.contains(la) || expecting.contains_end_of_rule() {
            return Ok(());
        }
        s.report_unwanted_token(p, expecting)?;
        let resync = expecting.union(p.error_recovery_set());
        s.consume_until(p, resync)
    }

    pub fn consume_until(p: &mut Parser<'_>, set: TokenSet) -> Result<(), Error> {
        loop {
            let ty = p.la(1)?;
            if ty.is_eof() || set.contains(ty) {
                return Ok(());
            }
            p.consume()?;
        }
    }
}

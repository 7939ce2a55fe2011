//! Parser state machine and low-level operations.

use std::rc::Rc;
use std::sync::Arc;

use graft_core::{Language, RuleIndex, TokenSet, TokenType};

use super::cancel::CancellationToken;
use super::exception::{ExceptionId, ExceptionKind, Interrupt, PResult, RecognitionException};
use super::listener::ErrorListener;
use super::strategy::{DefaultErrorStrategy, ErrorStrategy};
use super::stream::TokenStream;
use super::token::{Token, TokenSource};
use super::tree::{NodeId, ParseNode, ParseTree};
use crate::Error;

/// Error-recovery bookkeeping, owned by the parser and driven by the strategy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecoveryState {
    /// Set by the first report, cleared by the next successful match.
    /// Reports are suppressed and consumed tokens become error leaves meanwhile.
    pub in_recovery: bool,
    /// Input index where `recover` last ran.
    pub last_error_index: Option<usize>,
    /// Rules that recovered at `last_error_index`.
    pub last_error_rules: Vec<RuleIndex>,
}

#[derive(Debug)]
struct Frame {
    rule: RuleIndex,
    /// `None` while speculating.
    node: Option<NodeId>,
}

pub struct Parser<'a> {
    input: TokenStream<'a>,
    tree: ParseTree,
    frames: Vec<Frame>,
    /// Follow frames pushed by `invoke`; the implicit base frame is `{EOF}`.
    follow: Vec<TokenSet>,
    strategy: Rc<dyn ErrorStrategy>,
    listeners: Vec<&'a mut dyn ErrorListener>,
    recovery: RecoveryState,
    language: Arc<Language>,
    cancel: CancellationToken,
    next_exception: u32,
    recursion_fuel_limit: Option<u32>,
    speculating: u32,
    syntax_errors: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: Box<dyn TokenSource + 'a>, language: Arc<Language>) -> Self {
        Self {
            input: TokenStream::new(source),
            tree: ParseTree::new(),
            frames: Vec::with_capacity(16),
            follow: Vec::with_capacity(16),
            strategy: Rc::new(DefaultErrorStrategy),
            listeners: Vec::new(),
            recovery: RecoveryState::default(),
            language,
            cancel: CancellationToken::new(),
            next_exception: 0,
            recursion_fuel_limit: None,
            speculating: 0,
            syntax_errors: 0,
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel_limit = limit;
        self
    }

    pub fn with_error_strategy(mut self, strategy: Rc<dyn ErrorStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn add_error_listener(&mut self, listener: &'a mut dyn ErrorListener) {
        self.listeners.push(listener);
    }

    pub fn remove_error_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn tree(&self) -> &ParseTree {
        &self.tree
    }

    /// Ends the parse and hands over the tree.
    pub fn finish(self) -> ParseTree {
        self.tree
    }

    pub fn syntax_error_count(&self) -> usize {
        self.syntax_errors
    }

    pub fn recovery(&self) -> &RecoveryState {
        &self.recovery
    }

    pub fn recovery_mut(&mut self) -> &mut RecoveryState {
        &mut self.recovery
    }

    pub fn is_speculating(&self) -> bool {
        self.speculating > 0
    }

    pub fn current_rule(&self) -> Option<RuleIndex> {
        self.frames.last().map(|f| f.rule)
    }

    pub fn la(&mut self, k: usize) -> Result<TokenType, Error> {
        self.input.la(k)
    }

    pub fn lt(&mut self, k: usize) -> Result<&Token, Error> {
        self.input.lt(k)
    }

    pub fn lt_back(&self, k: usize) -> Option<&Token> {
        self.input.lt_back(k)
    }

    pub fn index(&self) -> usize {
        self.input.index()
    }

    /// Source text from `start` through `stop`, both inclusive.
    pub fn text_between(&self, start: &Token, stop: &Token) -> String {
        match (start.index, stop.index) {
            (Some(s), Some(e)) => self.input.text_between(s, e),
            _ => start.text.clone(),
        }
    }

    /// Runs `body` as rule `rule`: catches recognition errors, records them on
    /// the rule node, reports them and resynchronizes.
    ///
    /// While speculating, errors propagate to the predicate instead.
    pub fn rule<F>(&mut self, rule: RuleIndex, body: F) -> PResult<()>
    where
        F: FnOnce(&mut Self) -> PResult<()>,
    {
        self.enter_rule(rule)?;
        let outcome = match body(self) {
            Err(Interrupt::Recognition(e)) if !self.is_speculating() => self.handle_recognition(*e),
            other => other,
        };
        let exited = self.exit_rule();
        outcome?;
        exited?;
        Ok(())
    }

    /// Invokes a sub-rule with the follow frame of the call site.
    ///
    /// `follow` holds what may come next in the caller; its end-of-rule flag
    /// means the call is last in the caller and the caller's own follow applies.
    pub fn invoke<T, F>(&mut self, follow: TokenSet, f: F) -> PResult<T>
    where
        F: FnOnce(&mut Self) -> PResult<T>,
    {
        self.follow.push(follow);
        let result = f(self);
        self.follow.pop();
        result
    }

    /// Matches `ty`, recovering inline on mismatch.
    ///
    /// `follow` is what may come after `ty` in the current rule.
    pub fn expect(&mut self, ty: TokenType, follow: TokenSet) -> PResult<Token> {
        if self.la(1)? == ty {
            if !self.is_speculating() {
                let strategy = Rc::clone(&self.strategy);
                strategy.report_match(self);
            }
            return Ok(self.consume()?);
        }
        if self.is_speculating() {
            return Err(self.input_mismatch(TokenSet::single(ty)));
        }
        let strategy = Rc::clone(&self.strategy);
        let token = strategy.recover_inline(self, ty, follow)?;
        if token.is_conjured() {
            self.add_error_node(token.clone());
        }
        Ok(token)
    }

    /// Consumes the current token and attaches it to the current rule:
    /// as an error leaf in recovery mode, as a terminal otherwise.
    pub fn consume(&mut self) -> Result<Token, Error> {
        let token = self.input.lt(1)?.clone();
        self.input.consume()?;
        if !self.is_speculating() {
            let leaf = if self.strategy.in_error_recovery_mode(self) {
                ParseNode::Error(token.clone())
            } else {
                ParseNode::Terminal(token.clone())
            };
            self.add_leaf(leaf);
        }
        Ok(token)
    }

    pub fn add_error_node(&mut self, token: Token) {
        if !self.is_speculating() {
            self.add_leaf(ParseNode::Error(token));
        }
    }

    /// Loop guard: skips tokens that can neither start an iteration nor follow the loop.
    pub fn sync(&mut self, expecting: TokenSet) -> Result<(), Error> {
        if self.is_speculating() {
            return Ok(());
        }
        let strategy = Rc::clone(&self.strategy);
        strategy.sync(self, expecting)
    }

    /// Runs a syntactic predicate: no tree building, no reports, input rewound.
    /// True if `f` recognized its input.
    pub fn speculate<F>(&mut self, f: F) -> Result<bool, Error>
    where
        F: FnOnce(&mut Self) -> PResult<()>,
    {
        self.input.lt(1)?;
        let mark = self.input.index();
        let frames = self.frames.len();
        let follow = self.follow.len();
        self.speculating += 1;
        let result = f(self);
        self.speculating -= 1;
        self.frames.truncate(frames);
        self.follow.truncate(follow);
        self.input.seek(mark)?;
        match result {
            Ok(()) => Ok(true),
            Err(Interrupt::Recognition(_)) => Ok(false),
            Err(Interrupt::Fatal(err)) => Err(err),
        }
    }

    /// No alternative of a decision matched. The decision started at `LT(1)`
    /// and failed at `LT(depth)`.
    pub fn no_viable_alt(&mut self, depth: usize) -> Interrupt {
        let start = match self.lt(1) {
            Ok(t) => t.clone(),
            Err(err) => return err.into(),
        };
        let offending = match self.lt(depth.max(1)) {
            Ok(t) => t.clone(),
            Err(err) => return err.into(),
        };
        self.exception(ExceptionKind::NoViableAlt { start }, offending, TokenSet::EMPTY)
            .into()
    }

    pub fn input_mismatch(&mut self, expected: TokenSet) -> Interrupt {
        match self.lt(1) {
            Ok(t) => {
                let offending = t.clone();
                self.exception(ExceptionKind::InputMismatch, offending, expected)
                    .into()
            }
            Err(err) => err.into(),
        }
    }

    /// Semantic predicate: fails the rule unless `holds`.
    pub fn predicate(&mut self, holds: bool, text: &str) -> PResult<()> {
        if holds {
            return Ok(());
        }
        let offending = self.lt(1)?.clone();
        let kind = ExceptionKind::FailedPredicate {
            predicate: text.to_owned(),
        };
        Err(self.exception(kind, offending, TokenSet::EMPTY).into())
    }

    pub fn notify_error_listeners(
        &mut self,
        offending: &Token,
        msg: &str,
        e: Option<&RecognitionException>,
    ) {
        self.syntax_errors += 1;
        for listener in self.listeners.iter_mut() {
            listener.syntax_error(offending, offending.line, offending.column, msg, e);
        }
    }

    /// Resolves an end-of-rule flag in `follow` against the follow frames.
    pub fn viable_follow(&self, follow: TokenSet) -> TokenSet {
        if !follow.contains_end_of_rule() {
            return follow;
        }
        let mut acc = follow.without_end_of_rule();
        for frame in self.follow.iter().rev() {
            acc = acc.union(frame.without_end_of_rule());
            if !frame.contains_end_of_rule() {
                return acc;
            }
        }
        acc.with(TokenType::EOF)
    }

    /// Everything any active invocation may be followed by, plus `EOF`.
    pub fn error_recovery_set(&self) -> TokenSet {
        self.follow
            .iter()
            .fold(TokenSet::single(TokenType::EOF), |acc, frame| {
                acc.union(frame.without_end_of_rule())
            })
    }

    fn exception(
        &mut self,
        kind: ExceptionKind,
        offending: Token,
        expected: TokenSet,
    ) -> RecognitionException {
        let id = ExceptionId(self.next_exception);
        self.next_exception += 1;
        RecognitionException {
            id,
            kind,
            offending,
            expected,
            rule: self.current_rule().unwrap_or(RuleIndex::new(0)),
        }
    }

    fn handle_recognition(&mut self, e: RecognitionException) -> PResult<()> {
        if let Some(node) = self.current_node()
            && let Some(rule) = self.tree.rule_mut(node)
        {
            rule.exception = Some(e.clone());
        }
        let strategy = Rc::clone(&self.strategy);
        strategy.report_error(self, &e);
        strategy.recover(self, &e)?;
        Ok(())
    }

    fn enter_rule(&mut self, rule: RuleIndex) -> Result<(), Error> {
        self.cancel.check()?;
        if let Some(limit) = self.recursion_fuel_limit
            && self.frames.len() as u32 >= limit
        {
            return Err(Error::RecursionLimitExceeded);
        }
        let node = if self.is_speculating() {
            None
        } else {
            let start = self.input.lt(1)?.index;
            Some(self.tree.add_rule(self.current_node(), rule, start))
        };
        self.frames.push(Frame { rule, node });
        Ok(())
    }

    fn exit_rule(&mut self) -> Result<(), Error> {
        let frame = self.frames.pop();
        self.ensure_frame(frame.is_some());
        if let Some(node) = frame.and_then(|f| f.node) {
            let stop = self.input.lt_back(1).and_then(|t| t.index);
            if let Some(rule) = self.tree.rule_mut(node) {
                rule.stop = stop.filter(|s| rule.start.is_some_and(|start| *s >= start));
            }
        }
        self.cancel.check()
    }

    fn current_node(&self) -> Option<NodeId> {
        self.frames.last().and_then(|f| f.node)
    }

    fn add_leaf(&mut self, leaf: ParseNode) {
        let parent = self.current_node();
        self.tree.add_leaf(parent, leaf);
    }
}

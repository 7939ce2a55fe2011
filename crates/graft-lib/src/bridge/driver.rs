use std::rc::Rc;
use std::sync::Arc;

use graft_core::{Language, RuleIndex};
use rowan::SyntaxKind;

use super::collector::{CorrelatedErrors, SyntaxErrorCollector};
use super::projector::{ProjectionStats, project_tree};
use super::strategy::AnchoringErrorStrategy;
use super::token_source::TokenBridge;
use crate::Error;
use crate::host::{TokenCursor, TreeBuilder};
use crate::runtime::{CancellationToken, Interrupt, ParseTree, Parser, Recognizer};
use crate::trace::{NoopTracer, Tracer};

const DEFAULT_RECURSION_FUEL: u32 = 4096;

/// Parses with a recognizer and projects the result onto a host tree builder.
///
/// # Example
///
/// ```
/// use graft_lib::{GreenTreeBuilder, ParseDriver, sample};
///
/// let source = "var a = 1;";
/// let language = sample::language();
/// let builder = GreenTreeBuilder::new(
///     source,
///     sample::lex(source),
///     language.element_types(),
///     language.trivia(),
/// );
/// let mut driver = ParseDriver::new(sample::SampleGrammar);
/// let tree = driver
///     .project(language.start_rule(), sample::file_kind(), builder)
///     .expect("not cancelled");
/// assert!(!tree.has_errors());
/// ```
pub struct ParseDriver<R, T = NoopTracer> {
    recognizer: R,
    language: Arc<Language>,
    cancel: CancellationToken,
    recursion_fuel: Option<u32>,
    tracer: T,
    stats: ProjectionStats,
}

impl<R: Recognizer> ParseDriver<R> {
    pub fn new(recognizer: R) -> Self {
        Self {
            language: recognizer.language(),
            recognizer,
            cancel: CancellationToken::new(),
            recursion_fuel: Some(DEFAULT_RECURSION_FUEL),
            tracer: NoopTracer,
            stats: ProjectionStats::default(),
        }
    }
}

impl<R: Recognizer, T: Tracer> ParseDriver<R, T> {
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Rule nesting limit. `None` disables the check.
    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel = limit;
        self
    }

    pub fn with_tracer<U: Tracer>(self, tracer: U) -> ParseDriver<R, U> {
        ParseDriver {
            recognizer: self.recognizer,
            language: self.language,
            cancel: self.cancel,
            recursion_fuel: self.recursion_fuel,
            tracer,
            stats: self.stats,
        }
    }

    pub fn language(&self) -> &Arc<Language> {
        &self.language
    }

    pub fn tracer(&self) -> &T {
        &self.tracer
    }

    /// Counters of the last successful projection.
    pub fn stats(&self) -> ProjectionStats {
        self.stats
    }

    /// Resolves a rule by name.
    pub fn entry_rule(&self, name: &str) -> Result<RuleIndex, Error> {
        self.language
            .rule_index(name)
            .ok_or_else(|| Error::UnknownRule(name.to_owned()))
    }

    /// Runs the recognizer over `cursor`, consuming it.
    ///
    /// Syntax errors are recovered from and returned alongside the tree;
    /// only cancellation and recursion overflow fail.
    pub fn recognize<C>(
        &mut self,
        entry: RuleIndex,
        cursor: &mut C,
    ) -> Result<(ParseTree, CorrelatedErrors), Error>
    where
        C: TokenCursor + ?Sized,
    {
        self.check_entry(entry)?;
        self.run_recognizer(entry, cursor)
    }

    fn run_recognizer<C>(
        &mut self,
        entry: RuleIndex,
        cursor: &mut C,
    ) -> Result<(ParseTree, CorrelatedErrors), Error>
    where
        C: TokenCursor + ?Sized,
    {
        self.tracer.trace_parse_start(entry);

        let mut collector = SyntaxErrorCollector::new();
        let tree = {
            let source =
                TokenBridge::new(cursor, *self.language.element_types(), self.cancel.clone());
            let mut parser = Parser::new(Box::new(source), Arc::clone(&self.language))
                .with_cancellation(self.cancel.clone())
                .with_recursion_fuel(self.recursion_fuel)
                .with_error_strategy(Rc::new(AnchoringErrorStrategy));
            parser.remove_error_listeners();
            parser.add_error_listener(&mut collector);
            match self.recognizer.parse(entry, &mut parser) {
                // Recognition errors are recorded in the tree, never thrown out of a rule.
                Ok(()) | Err(Interrupt::Recognition(_)) => {}
                Err(Interrupt::Fatal(err)) => return Err(err),
            }
            parser.finish()
        };

        let errors = collector.index();
        self.tracer.trace_parse_end(errors.len());
        Ok((tree, errors))
    }

    /// Parses the builder's tokens from rule `entry` and builds the host tree,
    /// rooted at a node of kind `root`.
    ///
    /// The recognizer reads ahead on its own; the builder is rewound afterwards
    /// and only the projection moves it for real. Host tokens the entry rule
    /// did not reach end up directly under the root.
    pub fn project<B: TreeBuilder>(
        &mut self,
        entry: RuleIndex,
        root: SyntaxKind,
        mut builder: B,
    ) -> Result<B::Tree, Error> {
        self.check_entry(entry)?;
        let snapshot = builder.mark();
        let (tree, errors) = self.run_recognizer(entry, &mut builder)?;
        builder.rollback_to(snapshot);

        let root_marker = builder.mark();
        let mut stats = project_tree(
            &tree,
            &errors,
            self.language.element_types(),
            &mut builder,
            &self.cancel,
            &mut self.tracer,
        )?;

        let mut drained = 0;
        while !builder.at_end() {
            self.cancel.check()?;
            builder.advance();
            drained += 1;
        }
        self.tracer.trace_drain(drained);
        stats.drained = drained;

        builder.done(root_marker, root);
        self.stats = stats;
        Ok(builder.finish())
    }

    fn check_entry(&self, entry: RuleIndex) -> Result<(), Error> {
        if self.language.rule_name(entry).is_none() {
            return Err(Error::UnknownRule(format!("#{}", entry.raw())));
        }
        Ok(())
    }
}

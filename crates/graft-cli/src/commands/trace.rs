//! Trace how a parse is projected onto the host builder.

use graft_core::Colors;
use graft_lib::trace::{PrintTracer, Verbosity};

use super::run_common::{self, SourceInput};

pub struct TraceArgs {
    pub input: SourceInput,
    pub verbosity: Verbosity,
    pub color: bool,
}

pub fn run(args: TraceArgs) {
    let prepared = run_common::prepare_or_exit(&args.input);
    let tracer = PrintTracer::new(
        prepared.language.clone(),
        args.verbosity,
        Colors::new(args.color),
    );
    let mut driver = prepared.driver().with_tracer(tracer);

    let result = driver.project(prepared.entry, prepared.root_kind(), prepared.builder());
    driver.tracer().print();

    if let Err(err) = result {
        run_common::exit_with(err);
    }
}

use graft_lib::Diagnostics;

use super::run_common::{self, SourceInput};

pub struct CheckArgs {
    pub input: SourceInput,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let prepared = run_common::prepare_or_exit(&args.input);
    let tree = prepared
        .driver()
        .project(prepared.entry, prepared.root_kind(), prepared.builder())
        .unwrap_or_else(|err| run_common::exit_with(err));

    let diagnostics = Diagnostics::from_tree(&tree);
    if diagnostics.has_errors() {
        let mut printer = diagnostics
            .printer()
            .source(&prepared.source)
            .colored(args.color);
        if let Some(path) = &prepared.path {
            printer = printer.path(path);
        }
        eprintln!("{}", printer.render());
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}

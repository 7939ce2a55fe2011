use super::run_common::{self, SourceInput};

pub struct ParseTreeArgs {
    pub input: SourceInput,
}

/// Prints the recognizer's tree before projection, error leaves included.
pub fn run(args: ParseTreeArgs) {
    let prepared = run_common::prepare_or_exit(&args.input);
    let mut builder = prepared.builder();
    let (tree, _errors) = prepared
        .driver()
        .recognize(prepared.entry, &mut builder)
        .unwrap_or_else(|err| run_common::exit_with(err));

    println!("{}", tree.to_sexpr(&prepared.language));
}

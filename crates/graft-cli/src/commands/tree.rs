use graft_lib::TreeQuery;

use super::run_common::{self, SourceInput};

pub struct TreeArgs {
    pub input: SourceInput,
    pub spans: bool,
    pub trivia: bool,
    pub json: bool,
}

pub fn run(args: TreeArgs) {
    let prepared = run_common::prepare_or_exit(&args.input);
    let tree = prepared
        .driver()
        .project(prepared.entry, prepared.root_kind(), prepared.builder())
        .unwrap_or_else(|err| run_common::exit_with(err));

    let query = TreeQuery::new(&tree, prepared.language.clone());
    let printer = query
        .printer()
        .with_spans(args.spans)
        .with_trivia(args.trivia);

    if args.json {
        let output = serde_json::to_string_pretty(&printer.to_dump()).unwrap_or_else(|err| {
            eprintln!("error: {}", err);
            std::process::exit(1);
        });
        println!("{}", output);
        return;
    }

    print!("{}", printer.dump());
}

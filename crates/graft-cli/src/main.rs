mod cli;
mod commands;

use cli::{CheckParams, LangsParams, ParseTreeParams, TraceParams, TreeParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("tree", m)) => {
            let params = TreeParams::from_matches(m);
            commands::tree::run(params.into());
        }
        Some(("parse-tree", m)) => {
            let params = ParseTreeParams::from_matches(m);
            commands::parse_tree::run(params.into());
        }
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("trace", m)) => {
            let params = TraceParams::from_matches(m);
            commands::trace::run(params.into());
        }
        Some(("langs", m)) => {
            let _params = LangsParams::from_matches(m);
            commands::langs::run();
        }
        _ => unreachable!("clap should have caught this"),
    }
}

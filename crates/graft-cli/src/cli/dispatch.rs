//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors pull the relevant fields
//! - `Into<*Args>` impls bridge dispatch to the command handlers

use std::path::PathBuf;

use clap::ArgMatches;
use graft_lib::trace::Verbosity;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::parse_tree::ParseTreeArgs;
use crate::commands::run_common::SourceInput;
use crate::commands::trace::TraceArgs;
use crate::commands::tree::TreeArgs;

/// Source input args shared by every parsing command.
#[derive(Debug, PartialEq, Eq)]
pub struct SourceParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub lang: Option<String>,
    pub entry: Option<String>,
}

impl SourceParams {
    fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            lang: m.get_one::<String>("lang").cloned(),
            entry: m.get_one::<String>("entry").cloned(),
        }
    }
}

impl From<SourceParams> for SourceInput {
    fn from(p: SourceParams) -> Self {
        Self {
            source_path: p.source_path,
            source_text: p.source_text,
            lang: p.lang,
            entry: p.entry,
        }
    }
}

pub struct TreeParams {
    pub source: SourceParams,
    pub spans: bool,
    pub trivia: bool,
    pub json: bool,
}

impl TreeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source: SourceParams::from_matches(m),
            spans: m.get_flag("spans"),
            trivia: m.get_flag("trivia"),
            json: m.get_flag("json"),
        }
    }
}

impl From<TreeParams> for TreeArgs {
    fn from(p: TreeParams) -> Self {
        Self {
            input: p.source.into(),
            spans: p.spans,
            trivia: p.trivia,
            json: p.json,
        }
    }
}

pub struct ParseTreeParams {
    pub source: SourceParams,
}

impl ParseTreeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source: SourceParams::from_matches(m),
        }
    }
}

impl From<ParseTreeParams> for ParseTreeArgs {
    fn from(p: ParseTreeParams) -> Self {
        Self {
            input: p.source.into(),
        }
    }
}

pub struct CheckParams {
    pub source: SourceParams,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source: SourceParams::from_matches(m),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            input: p.source.into(),
            color: p.color.should_colorize(),
        }
    }
}

pub struct TraceParams {
    pub source: SourceParams,
    pub verbose: u8,
    pub color: ColorChoice,
}

impl TraceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source: SourceParams::from_matches(m),
            verbose: m.get_count("verbose"),
            color: parse_color(m),
        }
    }
}

impl From<TraceParams> for TraceArgs {
    fn from(p: TraceParams) -> Self {
        let verbosity = match p.verbose {
            0 => Verbosity::Default,
            1 => Verbosity::Verbose,
            _ => Verbosity::VeryVerbose,
        };
        Self {
            input: p.source.into(),
            verbosity,
            color: p.color.should_colorize(),
        }
    }
}

pub struct LangsParams;

impl LangsParams {
    pub fn from_matches(_m: &ArgMatches) -> Self {
        Self
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

//! Command builders for the CLI.
//!
//! Every parsing command takes the same source input args; command-specific
//! flags are added on top.

use clap::Command;

use super::args::*;

/// Source input, language and entry rule, shared by all parsing commands.
fn with_source_args(cmd: Command) -> Command {
    cmd.arg(source_path_arg())
        .arg(source_text_arg())
        .arg(lang_arg())
        .arg(entry_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("graft")
        .about("Parse with a grammar recognizer and inspect the projected syntax tree")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(tree_command())
        .subcommand(parse_tree_command())
        .subcommand(check_command())
        .subcommand(trace_command())
        .subcommand(langs_command())
}

/// Show the projected host tree.
pub fn tree_command() -> Command {
    let cmd = Command::new("tree")
        .about("Show the host syntax tree of a source file")
        .override_usage(
            "\
  graft tree <SOURCE>
  graft tree -s <TEXT> [-l <LANG>]",
        )
        .after_help(
            r#"EXAMPLES:
  graft tree app.sample                 # host tree
  graft tree app.sample --spans         # with byte ranges
  graft tree app.sample --trivia        # include whitespace and comments
  graft tree -s 'var a = 1;' --json     # JSON dump
  cat app.sample | graft tree - -l sample"#,
        );

    with_source_args(cmd)
        .arg(spans_arg())
        .arg(trivia_arg())
        .arg(json_arg())
}

/// Show the recognizer's own parse tree.
pub fn parse_tree_command() -> Command {
    let cmd = Command::new("parse-tree")
        .about("Show the recognizer parse tree as an s-expression")
        .override_usage(
            "\
  graft parse-tree <SOURCE>
  graft parse-tree -s <TEXT> [-l <LANG>] [-e <RULE>]",
        )
        .after_help(
            r#"EXAMPLES:
  graft parse-tree app.sample
  graft parse-tree -s '1 + 2' -e expr"#,
        );

    with_source_args(cmd)
}

/// Report syntax errors.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Report syntax errors (silent and exit 0 when there are none)")
        .override_usage(
            "\
  graft check <SOURCE>
  graft check -s <TEXT> [-l <LANG>]",
        )
        .after_help(
            r#"EXAMPLES:
  graft check app.sample
  graft check -s 'var a 1;'
  graft check app.sample --color never"#,
        );

    with_source_args(cmd).arg(color_arg())
}

/// Trace the projection.
pub fn trace_command() -> Command {
    let cmd = Command::new("trace")
        .about("Trace how the parse tree is replayed onto the host builder")
        .override_usage(
            "\
  graft trace <SOURCE> [-v|-vv]
  graft trace -s <TEXT> [-l <LANG>] [-e <RULE>]",
        )
        .after_help(
            r#"EXAMPLES:
  graft trace app.sample        # rules and errors
  graft trace app.sample -v     # also advances and skipped tokens
  graft trace app.sample -vv    # also token text and offsets"#,
        );

    with_source_args(cmd)
        .arg(verbose_arg())
        .arg(color_arg())
}

/// List registered languages.
pub fn langs_command() -> Command {
    Command::new("langs").about("List supported languages")
}

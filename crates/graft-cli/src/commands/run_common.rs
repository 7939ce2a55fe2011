//! Input preparation shared by the parsing commands.

use std::path::PathBuf;
use std::sync::Arc;

use graft_lib::runtime::Recognizer;
use graft_lib::{GreenTreeBuilder, Language, ParseDriver, RuleIndex};
use rowan::SyntaxKind;

use super::lang_resolver::{self, Lang};
use super::source_loader::{self, InputError};

/// Where the source comes from and how to parse it.
#[derive(Debug, Default)]
pub struct SourceInput {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub lang: Option<String>,
    pub entry: Option<String>,
}

/// Loaded source with its language and entry rule resolved.
pub struct PreparedSource {
    pub lang: &'static Lang,
    pub language: Arc<Language>,
    pub entry: RuleIndex,
    pub source: String,
    /// Display name for diagnostics, `None` for inline text.
    pub path: Option<String>,
}

impl PreparedSource {
    pub fn builder(&self) -> GreenTreeBuilder<'_> {
        self.lang.builder(&self.source)
    }

    pub fn driver(&self) -> ParseDriver<&'static (dyn Recognizer + Sync)> {
        ParseDriver::new(self.lang.recognizer())
    }

    /// Kind of the root node the projection wraps everything in.
    pub fn root_kind(&self) -> SyntaxKind {
        SyntaxKind(graft_core::ElementTypes::FILE)
    }
}

pub fn prepare(input: &SourceInput) -> Result<PreparedSource, InputError> {
    let source_path = input.source_path.as_deref();
    let lang = lang_resolver::resolve_lang(input.lang.as_deref(), source_path)
        .map_err(InputError::UnknownLanguage)?;
    let source = source_loader::load_source(source_path, input.source_text.as_deref())?;

    let language = lang.language();
    let entry = match &input.entry {
        Some(name) => language
            .rule_index(name)
            .ok_or_else(|| InputError::UnknownRule {
                lang: lang.name().to_owned(),
                rule: name.clone(),
            })?,
        None => language.start_rule(),
    };

    Ok(PreparedSource {
        lang,
        language,
        entry,
        source,
        path: source_loader::display_path(source_path),
    })
}

/// Like [`prepare`], but reports the error and exits.
pub fn prepare_or_exit(input: &SourceInput) -> PreparedSource {
    prepare(input).unwrap_or_else(|err| {
        eprintln!("error: {}", err);
        if matches!(err, InputError::UnknownLanguage(_)) {
            eprintln!();
            eprintln!("Run 'graft langs' for the full list.");
        }
        std::process::exit(1);
    })
}

/// Reports a parse that did not finish and exits.
pub fn exit_with(err: graft_lib::Error) -> ! {
    eprintln!("error: {}", err);
    std::process::exit(1);
}

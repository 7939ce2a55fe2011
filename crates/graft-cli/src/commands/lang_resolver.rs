use std::path::Path;
use std::sync::Arc;

use graft_lib::runtime::Recognizer;
use graft_lib::{GreenTreeBuilder, HostToken, Language, sample};

/// Language used when neither `--lang` nor a file extension names one.
pub const DEFAULT_LANG: &str = sample::NAME;

/// A language the CLI can parse: grammar plus host lexer.
pub struct Lang {
    name: &'static str,
    extensions: &'static [&'static str],
    recognizer: &'static (dyn Recognizer + Sync),
    lex: fn(&str) -> Vec<HostToken>,
}

static LANGS: &[Lang] = &[Lang {
    name: sample::NAME,
    extensions: &["sample", "smp"],
    recognizer: &sample::SampleGrammar,
    lex: sample::lex,
}];

impl Lang {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn recognizer(&self) -> &'static (dyn Recognizer + Sync) {
        self.recognizer
    }

    /// Grammar metadata; registers the language on first use.
    pub fn language(&self) -> Arc<Language> {
        self.recognizer.language()
    }

    /// Host tree builder over the lexed `source`.
    pub fn builder<'s>(&self, source: &'s str) -> GreenTreeBuilder<'s> {
        let language = self.language();
        GreenTreeBuilder::new(
            source,
            (self.lex)(source),
            language.element_types(),
            language.trivia(),
        )
    }
}

pub fn all() -> &'static [Lang] {
    LANGS
}

/// Case-insensitive lookup by name.
pub fn from_name(name: &str) -> Option<&'static Lang> {
    LANGS.iter().find(|l| l.name.eq_ignore_ascii_case(name))
}

pub fn from_ext(ext: &str) -> Option<&'static Lang> {
    LANGS
        .iter()
        .find(|l| l.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// Explicit name first, then the source file's extension, then the default.
///
/// Only an explicit name can fail; an unrecognized extension falls back.
pub fn resolve_lang(
    explicit: Option<&str>,
    source_path: Option<&Path>,
) -> Result<&'static Lang, String> {
    if let Some(name) = explicit {
        return from_name(name).ok_or_else(|| format!("unknown language: '{}'", name));
    }

    if let Some(path) = source_path
        && path.as_os_str() != "-"
        && let Some(ext) = path.extension().and_then(|e| e.to_str())
        && let Some(lang) = from_ext(ext)
    {
        return Ok(lang);
    }

    from_name(DEFAULT_LANG).ok_or_else(|| format!("unknown language: '{}'", DEFAULT_LANG))
}

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Failures while resolving what to parse.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("cannot use both --source and positional SOURCE")]
    BothSources,

    #[error("source required (positional or --source)")]
    MissingSource,

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("failed to read '{}': {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    UnknownLanguage(String),

    #[error("unknown rule '{rule}' for language '{lang}'")]
    UnknownRule { lang: String, rule: String },
}

/// Inline text, a file, or stdin when the path is `-`.
pub fn load_source(path: Option<&Path>, text: Option<&str>) -> Result<String, InputError> {
    match (text, path) {
        (Some(text), None) => Ok(text.to_owned()),
        (None, Some(path)) if path.as_os_str() == "-" => load_stdin(),
        (None, Some(path)) => load_file(path),
        (Some(_), Some(_)) => Err(InputError::BothSources),
        (None, None) => Err(InputError::MissingSource),
    }
}

/// Name shown in diagnostics: the file path, `<stdin>`, or nothing for inline text.
pub fn display_path(path: Option<&Path>) -> Option<String> {
    let path = path?;
    if path.as_os_str() == "-" {
        return Some("<stdin>".to_owned());
    }
    Some(path.display().to_string())
}

fn load_stdin() -> Result<String, InputError> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(InputError::Stdin)?;
    Ok(buf)
}

fn load_file(path: &Path) -> Result<String, InputError> {
    fs::read_to_string(path).map_err(|source| InputError::File {
        path: path.to_owned(),
        source,
    })
}

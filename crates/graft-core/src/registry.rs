//! Process-wide language registry.
//!
//! Each language is registered once; later registrations under the same name
//! return the existing entry. Readers never block each other.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use crate::{Language, RegistryError};

static REGISTRY: LazyLock<RwLock<HashMap<String, Arc<Language>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Registers `language` under its own name. First registration wins.
pub fn register(language: Language) -> Arc<Language> {
    let name = language.name().to_owned();
    register_with(&name, move || language)
}

/// Registers the language built by `init` under `name`, unless already present.
///
/// `init` runs at most once per name, under the write lock.
pub fn register_with(name: &str, init: impl FnOnce() -> Language) -> Arc<Language> {
    if let Some(existing) = read_entry(name) {
        return existing;
    }
    let mut map = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    map.entry(name.to_owned())
        .or_insert_with(|| Arc::new(init()))
        .clone()
}

pub fn lookup(name: &str) -> Result<Arc<Language>, RegistryError> {
    read_entry(name).ok_or_else(|| RegistryError::UnknownLanguage(name.to_owned()))
}

/// Names of all registered languages, sorted.
pub fn registered() -> Vec<String> {
    let map = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    let mut names: Vec<String> = map.keys().cloned().collect();
    names.sort();
    names
}

fn read_entry(name: &str) -> Option<Arc<Language>> {
    let map = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    map.get(name).cloned()
}

use super::lang_resolver;

pub fn run() {
    // Languages register lazily; touch each so the registry is complete.
    for lang in lang_resolver::all() {
        lang.language();
    }

    let names = graft_core::registered();
    println!("Supported languages ({}):", names.len());
    for name in names {
        let Ok(language) = graft_core::lookup(&name) else {
            continue;
        };
        let elements = language.element_types();
        println!(
            "  {} ({} tokens, {} rules)",
            name,
            elements.token_count(),
            language.rule_count()
        );
    }
}

pub mod check;
pub mod lang_resolver;
pub mod langs;
pub mod parse_tree;
pub mod run_common;
pub mod source_loader;
pub mod trace;
pub mod tree;

//! Input handling module

pub mod documents;
pub mod glob_resolver;

pub use documents::{collect_documents, non_isbn_names};
pub use glob_resolver::resolve_patterns;

//! Building documents from resolved files

use azlevel_core::{looks_like_isbn, Document};
use std::path::{Path, PathBuf};

/// One document per file, in the given order
pub fn collect_documents(paths: &[PathBuf]) -> Vec<Document> {
    paths.iter().map(Document::from_file).collect()
}

/// File names that do not look like an ISBN
pub fn non_isbn_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|path| file_name(path))
        .filter(|name| !looks_like_isbn(name))
        .collect()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

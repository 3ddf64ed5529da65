//! Book identifiers derived from file names

use regex::Regex;
use std::sync::OnceLock;

static ISBN_SHAPE: OnceLock<Regex> = OnceLock::new();

fn isbn_shape() -> &'static Regex {
    ISBN_SHAPE.get_or_init(|| {
        Regex::new(r"^(?:\d{10}|\d{13}|\d{9}[0-9Xx])$").expect("ISBN pattern must compile")
    })
}

/// File name without its last extension; a trailing dot alone is kept
fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(dot) if dot + 1 < file_name.len() => &file_name[..dot],
        _ => file_name,
    }
}

fn isbn_chars(base: &str) -> String {
    base.chars()
        .filter(|c| c.is_ascii_digit() || *c == 'X' || *c == 'x')
        .collect()
}

/// Identifier for a book file: its digits and check letters, or the bare
/// base name when it has none.
///
/// ```
/// use azlevel_core::extract_isbn;
///
/// assert_eq!(extract_isbn("978-85-359-1484-9.pdf"), "9788535914849");
/// assert_eq!(extract_isbn("notes.txt"), "notes");
/// ```
pub fn extract_isbn(file_name: &str) -> String {
    let base = strip_extension(file_name);
    let only = isbn_chars(base);
    if only.is_empty() {
        base.to_string()
    } else {
        only
    }
}

/// Whether a file name carries a plausible ISBN-10 or ISBN-13
pub fn looks_like_isbn(file_name: &str) -> bool {
    isbn_shape().is_match(&isbn_chars(strip_extension(file_name)))
}

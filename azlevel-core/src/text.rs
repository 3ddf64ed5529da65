//! Whitespace normalization and sampling of extracted text

use std::fmt;
use std::ops::Deref;

/// Text with whitespace runs collapsed, trimmed and capped in length.
///
/// The cap counts characters, not bytes, so truncation never splits a
/// multi-byte character.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedText(String);

impl NormalizedText {
    /// Normalize `raw` and keep at most `max_chars` characters
    pub fn new(raw: &str, max_chars: usize) -> Self {
        let mut collapsed = String::with_capacity(raw.len().min(max_chars.saturating_mul(4)));
        let mut chars = 0usize;
        for word in raw.split_whitespace() {
            if chars > max_chars {
                break;
            }
            if !collapsed.is_empty() {
                collapsed.push(' ');
                chars += 1;
            }
            collapsed.push_str(word);
            chars += word.chars().count();
        }

        if let Some((cut, _)) = collapsed.char_indices().nth(max_chars) {
            collapsed.truncate(cut);
            let kept = collapsed.trim_end().len();
            collapsed.truncate(kept);
        }
        Self(collapsed)
    }

    /// Borrow the text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    /// Take ownership of the inner string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for NormalizedText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Convenience wrapper returning a plain `String`
pub fn normalize_text(raw: &str, max_chars: usize) -> String {
    NormalizedText::new(raw, max_chars).into_string()
}

//! Closed word classes used as syntactic complexity proxies
//!
//! Matching is per single token. Multi-word subordinators ("even though",
//! "so that", ...) are kept in their phrase form and contribute each of their
//! words to the lookup set, so "so" or "in" on their own are counted too.

use std::collections::HashSet;
use std::sync::OnceLock;

/// Coordinating and adverbial connectives
pub const CONNECTIVES: &[&str] = &[
    "because",
    "although",
    "however",
    "whereas",
    "moreover",
    "nevertheless",
    "therefore",
    "furthermore",
    "unless",
    "despite",
    "since",
    "while",
    "whenever",
    "wherever",
    "notwithstanding",
    "consequently",
    "albeit",
    "hence",
    "nonetheless",
    "whereby",
];

/// Subordinating conjunctions, including multi-word phrases
pub const SUBORDINATORS: &[&str] = &[
    "because",
    "although",
    "whereas",
    "unless",
    "since",
    "while",
    "whenever",
    "wherever",
    "though",
    "even though",
    "provided that",
    "so that",
    "in order that",
    "after",
    "before",
    "until",
    "once",
    "as long as",
    "as if",
    "as though",
];

/// Single-token lookup set built from a phrase table
#[derive(Debug, Clone)]
pub struct WordSet {
    words: HashSet<&'static str>,
}

impl WordSet {
    /// Build from phrases; every whitespace-separated word becomes a member
    pub fn from_phrases(phrases: &[&'static str]) -> Self {
        let words = phrases
            .iter()
            .flat_map(|phrase| phrase.split_whitespace())
            .collect();
        Self { words }
    }

    /// Membership test for a lowercase token
    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Count how many tokens are members
    pub fn count_in<S: AsRef<str>>(&self, tokens: &[S]) -> usize {
        tokens.iter().filter(|t| self.contains(t.as_ref())).count()
    }
}

/// Shared connective set
pub fn connectives() -> &'static WordSet {
    static SET: OnceLock<WordSet> = OnceLock::new();
    SET.get_or_init(|| WordSet::from_phrases(CONNECTIVES))
}

/// Shared subordinator set
pub fn subordinators() -> &'static WordSet {
    static SET: OnceLock<WordSet> = OnceLock::new();
    SET.get_or_init(|| WordSet::from_phrases(SUBORDINATORS))
}

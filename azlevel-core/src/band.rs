//! Level letters, the fixed band partition of A–Z, and the band mapper

use crate::heuristics::BandThresholds;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A reading level letter in `A..=Z`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Level(char);

impl Level {
    /// Lowest level
    pub const A: Level = Level('A');
    /// Highest level
    pub const Z: Level = Level('Z');

    /// Parse a level letter, case-insensitively
    pub fn new(letter: char) -> Option<Self> {
        let upper = letter.to_ascii_uppercase();
        upper.is_ascii_uppercase().then_some(Level(upper))
    }

    /// Parse a cell such as `"c"` or `" C "`; anything but one letter is rejected
    pub fn parse(cell: &str) -> Option<Self> {
        let mut chars = cell.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Self::new(letter),
            _ => None,
        }
    }

    /// The uppercase letter
    pub fn letter(self) -> char {
        self.0
    }

    /// Zero-based position in the alphabet
    pub fn index(self) -> usize {
        (self.0 as u8 - b'A') as usize
    }

    /// Level at `offset` letters after this one, if still within A–Z
    fn offset(self, offset: usize) -> Option<Self> {
        let code = self.0 as usize + offset;
        if code <= 'Z' as usize {
            char::from_u32(code as u32).map(Level)
        } else {
            None
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Level> for char {
    fn from(level: Level) -> char {
        level.0
    }
}

impl TryFrom<char> for Level {
    type Error = String;

    fn try_from(letter: char) -> Result<Self, Self::Error> {
        Level::new(letter).ok_or_else(|| format!("'{letter}' is not a level letter"))
    }
}

/// An inclusive range of level letters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Band {
    start: Level,
    end: Level,
}

/// The fixed partition of A–Z, in ascending order
pub const BANDS: [Band; 5] = [
    Band::from_letters('A', 'D'),
    Band::from_letters('E', 'I'),
    Band::from_letters('J', 'M'),
    Band::from_letters('N', 'S'),
    Band::from_letters('T', 'Z'),
];

impl Band {
    const fn from_letters(start: char, end: char) -> Self {
        Self {
            start: Level(start),
            end: Level(end),
        }
    }

    /// First letter of the band
    pub fn start(&self) -> Level {
        self.start
    }

    /// Last letter of the band
    pub fn end(&self) -> Level {
        self.end
    }

    /// Number of letters in the band
    pub fn len(&self) -> usize {
        self.end.index() - self.start.index() + 1
    }

    /// Bands are never empty
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `level` lies inside the band
    pub fn contains(&self, level: Level) -> bool {
        self.start <= level && level <= self.end
    }

    /// Letter at `index` within the band
    pub fn letter_at(&self, index: usize) -> Option<Level> {
        if index < self.len() {
            self.start.offset(index)
        } else {
            None
        }
    }

    /// Letters from start to end inclusive
    pub fn letters(&self) -> impl Iterator<Item = Level> + '_ {
        (0..self.len()).filter_map(move |i| self.start.offset(i))
    }

    /// Position of the band within [`BANDS`]
    pub fn position(&self) -> usize {
        BANDS
            .iter()
            .position(|band| band == self)
            .unwrap_or(BANDS.len())
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Band selected by average sentence length.
///
/// Upper bounds are inclusive; a value above every bound (or NaN) lands in
/// the last band.
pub fn map_to_band(avg_sent_len: f64, thresholds: &BandThresholds) -> Band {
    thresholds
        .upper_bounds()
        .iter()
        .position(|&bound| avg_sent_len <= bound)
        .map_or(BANDS[BANDS.len() - 1], |i| BANDS[i])
}

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four multiple-choice slots a question must fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum OptionLetter {
    A,
    B,
    C,
    D,
}

impl OptionLetter {
    pub const ALL: [OptionLetter; 4] = [
        OptionLetter::A,
        OptionLetter::B,
        OptionLetter::C,
        OptionLetter::D,
    ];

    /// Case-insensitive parse of a single letter.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(OptionLetter::A),
            'B' => Some(OptionLetter::B),
            'C' => Some(OptionLetter::C),
            'D' => Some(OptionLetter::D),
            _ => None,
        }
    }

    /// Parses a string holding exactly one letter, ignoring surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionLetter::A => "A",
            OptionLetter::B => "B",
            OptionLetter::C => "C",
            OptionLetter::D => "D",
        }
    }
}

impl fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One question block recovered from the generated markdown. Immutable after
/// parsing; discarded when a new quiz starts.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ParsedQuestion {
    /// 1-based ordinal from the question heading.
    pub number: u32,
    /// Decorative tag from the heading line; carries no semantic weight.
    pub emoji: String,
    pub text: String,
    /// Exactly four entries keyed A through D, or the block was dropped.
    pub options: BTreeMap<OptionLetter, String>,
}

impl ParsedQuestion {
    pub fn option_text(&self, letter: OptionLetter) -> Option<&str> {
        self.options.get(&letter).map(String::as_str)
    }
}

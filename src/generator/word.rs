/*
word.rs

Copyright 2025 Hervé Quatremain

This file is part of Cruzaletras.

Cruzaletras is free software: you can redistribute it and/or modify it under
the terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Cruzaletras is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Cruzaletras. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Words used in puzzles and the normalizer that produces them from raw glossary lemmas.
//!
//! A [`Word`] is always uppercase, at least [`MIN_WORD_LEN`] letters long, and only uses the
//! letters of [`ALPHABET`].
//! Raw lemmas, such as `"el ángel"` or `"niño/niña"`, are converted by [`Word::normalize`], which
//! returns `None` for entries that cannot be used in a puzzle (collocations, digits, too short).
//! The normalizer folds every diacritic, including the tilde of `ñ`, so `"niño"` becomes `"NINO"`.

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Letters allowed in a word. Also used to pick distractor letters.
pub const ALPHABET: [char; 27] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'Ñ', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Shortest word that can be used in a crossword.
pub const MIN_WORD_LEN: usize = 3;

/// Leading definite articles removed from lemmas.
const ARTICLES: [&str; 4] = ["el", "la", "los", "las"];

/// Characters removed from lemmas.
const PUNCTUATION: [char; 13] = [
    '"', '\'', '(', ')', '.', ',', ';', ':', '!', '?', '¡', '¿', '-',
];

/// Canonical puzzle word.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word {
    /// Uppercase text of the word.
    text: String,

    /// Letters of the word. `Ñ` is two bytes long in UTF-8, so indexing [`Word::text`] by byte
    /// does not work; grid coordinates use this vector instead.
    letters: Vec<char>,
}

impl Word {
    /// Create a [`Word`] object from text that is already in canonical form.
    ///
    /// Return `None` if the text is shorter than [`MIN_WORD_LEN`] or uses a character that is
    /// not in [`ALPHABET`].
    pub fn new(text: &str) -> Option<Self> {
        let letters: Vec<char> = text.chars().collect();
        if letters.len() < MIN_WORD_LEN || !letters.iter().all(|c| is_alphabet_letter(*c)) {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            letters,
        })
    }

    /// Convert a raw glossary lemma into a [`Word`].
    ///
    /// The leading article and the alternate forms after `/` are dropped, punctuation is removed,
    /// and accented vowels are folded. Lemmas made of several words are rejected.
    pub fn normalize(raw: &str) -> Option<Self> {
        let word: &str = raw.trim();
        if word.is_empty() {
            return None;
        }
        let word: &str = strip_article(word);

        // Only keep the first form of "niño/niña"
        let word: &str = word.split('/').next().unwrap_or_default().trim();
        if word.chars().any(char::is_whitespace) {
            return None;
        }

        let word: String = word.chars().filter(|c| !PUNCTUATION.contains(c)).collect();
        if word.is_empty() {
            return None;
        }

        // Compose first so that a decomposed "n" + tilde becomes "ñ" before folding
        let folded: String = word
            .nfc()
            .flat_map(char::to_lowercase)
            .map(fold_diacritic)
            .flat_map(char::to_uppercase)
            .collect();
        Self::new(&folded)
    }

    /// Return the word as a string slice.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Return the letters of the word.
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// Number of letters in the word.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Number of occurrences of each letter in the word.
    pub fn letter_counts(&self) -> HashMap<char, usize> {
        let mut counts: HashMap<char, usize> = HashMap::new();
        for letter in &self.letters {
            *counts.entry(*letter).or_insert(0) += 1;
        }
        counts
    }

    /// Set of the distinct letters in the word.
    pub fn letter_set(&self) -> HashSet<char> {
        self.letters.iter().copied().collect()
    }

    /// Number of distinct letters the two words have in common.
    pub fn shared_letters(&self, other: &Word) -> usize {
        let other_set: HashSet<char> = other.letter_set();
        self.letter_set()
            .iter()
            .filter(|c| other_set.contains(c))
            .count()
    }

    /// Lowercase form, as used by the dictionary file.
    pub fn to_lowercase(&self) -> String {
        self.text.to_lowercase()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Serialize a [`Word`] object as a plain string.
impl Serialize for Word {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.text)
    }
}

/// Deserialize a [`Word`] object from a string that must already be in canonical form.
impl<'de> Deserialize<'de> for Word {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text: String = String::deserialize(deserializer)?;
        Word::new(&text).ok_or_else(|| de::Error::custom(format!("invalid puzzle word: {text}")))
    }
}

/// Whether the character is one of the [`ALPHABET`] letters.
pub fn is_alphabet_letter(c: char) -> bool {
    c.is_ascii_uppercase() || c == 'Ñ'
}

/// Remove one leading definite article, if any.
fn strip_article(word: &str) -> &str {
    match word.split_once(char::is_whitespace) {
        Some((head, rest)) if ARTICLES.contains(&head.to_lowercase().as_str()) => rest.trim_start(),
        _ => word,
    }
}

/// Remove the diacritic from a lowercase letter.
fn fold_diacritic(c: char) -> char {
    match c {
        'ñ' => 'n',
        'á' | 'ä' | 'â' | 'à' => 'a',
        'é' | 'ë' | 'ê' | 'è' => 'e',
        'í' | 'ï' | 'î' | 'ì' => 'i',
        'ó' | 'ö' | 'ô' | 'ò' => 'o',
        'ú' | 'ü' | 'û' | 'ù' => 'u',
        _ => c,
    }
}

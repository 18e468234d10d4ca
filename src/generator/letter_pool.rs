/*
letter_pool.rs

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

//! Letters offered to the player.
//!
//! The player builds one word at a time from the pool, so the pool holds, for each letter, the
//! largest number of times that letter appears in a single solution word, and not the total
//! over all the words. A few distractor letters, not used by any solution word, are added to make
//! the puzzle harder.

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::word::{ALPHABET, Word};

/// Shuffled list of letters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct LetterPool {
    letters: Vec<char>,
}

impl LetterPool {
    /// Build the pool for the given solution words and add `distractors` extra letters.
    ///
    /// Distractors are letters that are not already in the pool. When every letter of the
    /// alphabet is already in use, fewer distractors are added.
    pub fn build<R: Rng + ?Sized>(words: &[Word], distractors: usize, rng: &mut R) -> Self {
        // BTreeMap keeps the pool deterministic before the shuffle
        let mut max_counts: BTreeMap<char, usize> = BTreeMap::new();
        for word in words {
            for (letter, count) in word.letter_counts() {
                let max: &mut usize = max_counts.entry(letter).or_insert(0);
                *max = (*max).max(count);
            }
        }

        let mut letters: Vec<char> =
            Vec::with_capacity(max_counts.values().sum::<usize>() + distractors);
        for (letter, count) in &max_counts {
            letters.extend(std::iter::repeat_n(*letter, *count));
        }

        let mut available: Vec<char> = ALPHABET
            .iter()
            .filter(|c| !max_counts.contains_key(c))
            .copied()
            .collect();
        for _ in 0..distractors {
            let Some(&letter) = available.choose(rng) else {
                break;
            };
            available.retain(|c| *c != letter);
            letters.push(letter);
        }

        letters.shuffle(rng);
        Self { letters }
    }

    /// Return the letters in the pool.
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// Number of letters in the pool.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Number of copies of the letter in the pool.
    pub fn count(&self, letter: char) -> usize {
        self.letters.iter().filter(|c| **c == letter).count()
    }

    /// Whether the word can be built with the letters of the pool.
    pub fn can_spell(&self, word: &Word) -> bool {
        word.letter_counts()
            .iter()
            .all(|(letter, count)| self.count(*letter) >= *count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn words(list: &[&str]) -> Vec<Word> {
        list.iter().map(|w| Word::new(w).unwrap()).collect()
    }

    #[test]
    fn uses_maximum_not_sum() {
        let mut rng = StdRng::seed_from_u64(1);
        let pool = LetterPool::build(&words(&["ANANA", "NADA"]), 0, &mut rng);
        assert_eq!(pool.count('A'), 3);
        assert_eq!(pool.count('N'), 2);
        assert_eq!(pool.count('D'), 1);
        assert_eq!(pool.len(), 6);

        let pool = LetterPool::build(&words(&["ROSA", "SOPA"]), 0, &mut rng);
        assert_eq!(pool.count('O'), 1);
        assert_eq!(pool.count('S'), 1);
        assert_eq!(pool.len(), 5);
    }

    #[test]
    fn every_word_can_be_spelled() {
        let mut rng = StdRng::seed_from_u64(7);
        let list = words(&["CARRERA", "PERRO", "ARROZ"]);
        let pool = LetterPool::build(&list, 1, &mut rng);
        for w in &list {
            assert!(pool.can_spell(w), "{w} cannot be spelled from {:?}", pool.letters());
        }
    }

    #[test]
    fn distractors_are_new_letters() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let list = words(&["CASA", "SAL"]);
            let pool = LetterPool::build(&list, 2, &mut rng);
            // C, A, A, S, L
            assert_eq!(pool.len(), 5 + 2);
            assert_eq!(pool.count('A'), 2);
            let extra: Vec<char> = pool
                .letters()
                .iter()
                .filter(|c| !"CASL".contains(**c))
                .copied()
                .collect();
            assert_eq!(extra.len(), 2);
            assert_ne!(extra[0], extra[1]);
        }
    }

    #[test]
    fn distractors_stop_when_alphabet_is_exhausted() {
        let mut rng = StdRng::seed_from_u64(3);
        let list = words(&["ABCDEFGHIJKLMNÑOPQRSTUVWXYZ"]);
        let pool = LetterPool::build(&list, 3, &mut rng);
        assert_eq!(pool.len(), 27);
    }

    #[test]
    fn same_seed_same_pool() {
        let list = words(&["CAMINO", "MANO"]);
        let a = LetterPool::build(&list, 1, &mut StdRng::seed_from_u64(42));
        let b = LetterPool::build(&list, 1, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert_eq!(serde_json::to_value(&a).unwrap().as_array().unwrap().len(), 7);
    }
}

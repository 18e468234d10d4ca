/*
combination.rs

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

//! Choose the words of a puzzle from the words of a unit.
//!
//! A combination is grown from a random seed word by repeatedly adding a word that shares at
//! least one letter with the words already selected, so that the combination can be laid out as
//! a crossword. Several combinations are built, and the one with the highest (or the lowest)
//! overlap score is kept: combinations with many shared letters give easier puzzles.

use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::HashSet;

use super::word::Word;

/// The next word is chosen at random among this number of best candidates.
const TOP_CANDIDATES: usize = 3;

/// [`CombinationSelector`] object.
pub struct CombinationSelector<'a> {
    /// Eligible words.
    pool: &'a [Word],

    /// Number of combinations built for each selection.
    attempts: usize,
}

impl<'a> CombinationSelector<'a> {
    /// Create the object.
    pub fn new(pool: &'a [Word], attempts: usize) -> Self {
        Self { pool, attempts }
    }

    /// Select `size` distinct words.
    ///
    /// When `prefer_overlap` is `true`, the combination with the highest overlap score is
    /// returned, otherwise the one with the lowest score.
    /// The words are sorted by decreasing length, and then alphabetically.
    ///
    /// Return `None` if the pool has fewer than `size` words, or if no combination of words
    /// sharing letters could be built.
    pub fn select<R: Rng + ?Sized>(
        &self,
        size: usize,
        prefer_overlap: bool,
        rng: &mut R,
    ) -> Option<Vec<Word>> {
        if size == 0 || self.pool.len() < size {
            return None;
        }

        let mut best: Option<(usize, Vec<&Word>)> = None;
        for _ in 0..self.attempts {
            let Some(combination) = self.grow(size, rng) else {
                continue;
            };
            let score: usize = pair_overlap(&combination);
            let better: bool = match &best {
                None => true,
                Some((s, _)) if prefer_overlap => score > *s,
                Some((s, _)) => score < *s,
            };
            if better {
                best = Some((score, combination));
            }
        }

        best.map(|(_, mut combination)| {
            combination.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
            combination.into_iter().cloned().collect()
        })
    }

    /// Grow a combination from a random seed word.
    fn grow<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Option<Vec<&'a Word>> {
        let seed: &Word = self.pool.choose(rng)?;
        let mut selected: Vec<&Word> = Vec::with_capacity(size);
        let mut letters: HashSet<char> = seed.letter_set();
        selected.push(seed);

        while selected.len() < size {
            let mut candidates: Vec<(usize, &Word)> = self
                .pool
                .iter()
                .filter(|w| !selected.contains(w))
                .map(|w| (w.letter_set().intersection(&letters).count(), w))
                .filter(|(overlap, _)| *overlap > 0)
                .collect();
            if candidates.is_empty() {
                return None;
            }

            // Most shared letters first, then shortest
            candidates.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.len().cmp(&b.1.len())));
            candidates.truncate(TOP_CANDIDATES);
            let &(_, next) = candidates.choose(rng)?;
            letters.extend(next.letters());
            selected.push(next);
        }
        Some(selected)
    }
}

/// Sum over all the pairs of words of the number of letters the two words share.
pub fn overlap_score(words: &[Word]) -> usize {
    pair_overlap(&words.iter().collect::<Vec<&Word>>())
}

fn pair_overlap(words: &[&Word]) -> usize {
    let mut score: usize = 0;
    for (i, a) in words.iter().enumerate() {
        for b in &words[i + 1..] {
            score += a.shared_letters(b);
        }
    }
    score
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
    fn pool_too_small() {
        let pool = words(&["CASA", "SAL"]);
        let selector = CombinationSelector::new(&pool, 10);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(selector.select(3, true, &mut rng).is_none());
        assert!(selector.select(0, true, &mut rng).is_none());
    }

    #[test]
    fn no_shared_letters() {
        let pool = words(&["CASA", "TREN", "LUZ"]);
        let selector = CombinationSelector::new(&pool, 10);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(selector.select(2, true, &mut rng).is_none());
    }

    #[test]
    fn combination_words_share_letters() {
        let pool = words(&[
            "CASA", "SAL", "MESA", "TREN", "LUZ", "PERRO", "GATO", "RATON", "MANO", "PIE",
        ]);
        let selector = CombinationSelector::new(&pool, 25);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let combination = selector.select(3, seed % 2 == 0, &mut rng).unwrap();
            assert_eq!(combination.len(), 3);
            let distinct: HashSet<&Word> = combination.iter().collect();
            assert_eq!(distinct.len(), 3);
            for w in &combination {
                assert!(
                    combination
                        .iter()
                        .any(|other| other != w && w.shared_letters(other) > 0)
                );
            }
            assert!(combination.windows(2).all(|p| p[0].len() >= p[1].len()));
        }
    }

    #[test]
    fn overlap_preference() {
        let pool = words(&["ROMA", "AMOR", "LUNA", "SOL"]);
        let selector = CombinationSelector::new(&pool, 200);
        let mut rng = StdRng::seed_from_u64(3);

        let high = selector.select(2, true, &mut rng).unwrap();
        assert_eq!(high, words(&["AMOR", "ROMA"]));
        assert_eq!(overlap_score(&high), 4);

        let low = selector.select(2, false, &mut rng).unwrap();
        assert_eq!(overlap_score(&low), 1);
    }

    #[test]
    fn overlap_score_sums_pairs() {
        assert_eq!(overlap_score(&words(&["CASA", "SAL", "SOL"])), 2 + 1 + 2);
        assert_eq!(overlap_score(&words(&["CASA"])), 0);
    }
}

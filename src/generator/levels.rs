/*
levels.rs

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

//! Assemble the levels of a unit.
//!
//! The [`LevelAssembler`] repeatedly asks the [`CombinationSelector`] for words, lays them out
//! with a [`Layout`] object, and builds the [`LetterPool`] of each successful layout.
//! Early levels use fewer words that share many letters; later levels use more words that share
//! fewer letters.
//!
//! The resulting levels are ranked from the easiest to the hardest and numbered in that order.

use log::{debug, info, warn};
use rand::Rng;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

use super::combination::{self, CombinationSelector};
use super::layout::{Layout, LayoutError};
use super::letter_pool::LetterPool;
use super::placement::Placement;
use super::word::Word;
use crate::config::GeneratorConfig;

/// After this number of consecutive failed attempts, the assembler tries one word less.
const STALL_LIMIT: usize = 10;

/// Playable level.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Level {
    /// Words the player must find.
    pub solution_words: Vec<Word>,

    /// Position of the words in the crossword.
    pub grid_layout: Vec<Placement>,

    /// Letters offered to the player.
    pub letter_pool: LetterPool,

    /// Level identifier, in the format `u<unit>_l<number>`.
    pub level_id: String,
}

impl Level {
    /// Overlap score of the solution words.
    pub fn overlap_score(&self) -> usize {
        combination::overlap_score(&self.solution_words)
    }

    /// Length of the longest solution word.
    pub fn max_word_len(&self) -> usize {
        self.solution_words.iter().map(Word::len).max().unwrap_or(0)
    }

    /// Number of distinct letters in the solution words.
    pub fn letter_diversity(&self) -> usize {
        self.solution_words
            .iter()
            .flat_map(|w| w.letters().iter().copied())
            .collect::<HashSet<char>>()
            .len()
    }

    /// Order levels from the easiest to the hardest: fewer words, then more shared letters,
    /// then shorter words, then fewer distinct letters.
    pub fn difficulty_cmp(&self, other: &Self) -> Ordering {
        self.solution_words
            .len()
            .cmp(&other.solution_words.len())
            .then(other.overlap_score().cmp(&self.overlap_score()))
            .then(self.max_word_len().cmp(&other.max_word_len()))
            .then(self.letter_diversity().cmp(&other.letter_diversity()))
    }

    /// Solution words in a canonical order, to detect duplicated levels.
    fn key(&self) -> Vec<Word> {
        let mut key: Vec<Word> = self.solution_words.clone();
        key.sort();
        key
    }
}

/// Levels generated for a unit, and the effort it took.
#[derive(Debug)]
pub struct LevelBatch {
    /// Ranked levels.
    pub levels: Vec<Level>,

    /// Number of levels requested.
    pub requested: usize,

    /// Number of attempts used.
    pub attempts: usize,
}

impl LevelBatch {
    /// Whether all the requested levels have been generated.
    pub fn is_complete(&self) -> bool {
        self.levels.len() >= self.requested
    }
}

/// Levels of all the units, in unit order.
///
/// Serialized as a JSON object mapping the unit key to its list of levels.
#[derive(Debug, Default)]
pub struct LevelSet {
    units: Vec<(String, Vec<Level>)>,
}

impl LevelSet {
    /// Create an empty [`LevelSet`] object.
    pub fn new() -> Self {
        Self { units: Vec::new() }
    }

    /// Add the levels of a unit.
    pub fn push(&mut self, unit_key: String, levels: Vec<Level>) {
        self.units.push((unit_key, levels));
    }

    /// Number of units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Total number of levels over all the units.
    pub fn total_levels(&self) -> usize {
        self.units.iter().map(|(_, levels)| levels.len()).sum()
    }
}

/// Serialize a [`LevelSet`] object as a map, keeping the unit order.
impl Serialize for LevelSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.units.len()))?;
        for (unit_key, levels) in &self.units {
            map.serialize_entry(unit_key, levels)?;
        }
        map.end()
    }
}

/// [`LevelAssembler`] object.
pub struct LevelAssembler<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> LevelAssembler<'a> {
    /// Create the object.
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Number of words for the next level.
    ///
    /// The number grows from `min_words` to `max_words` as the batch fills up, and never
    /// exceeds the number of words in the pool.
    pub fn word_count(&self, produced: usize, pool_len: usize) -> usize {
        let min: usize = self.config.min_words;
        let max: usize = self.config.max_words.max(min);
        let progress: f64 = produced as f64 / self.config.levels_per_unit.max(1) as f64;
        let span: f64 = (max - min + 1) as f64;
        let count: usize = min + (progress * span).floor() as usize;
        count.min(max).min(pool_len)
    }

    /// Generate the levels for a unit.
    ///
    /// If the attempt budget runs out before all the levels are generated, the returned batch
    /// holds fewer levels than requested.
    pub fn assemble<R: Rng + ?Sized>(
        &self,
        unit: &str,
        pool: &[Word],
        rng: &mut R,
    ) -> LevelBatch {
        let requested: usize = self.config.levels_per_unit;
        let max_attempts: usize = requested * self.config.attempt_factor;
        let selector: CombinationSelector =
            CombinationSelector::new(pool, self.config.selector_attempts);
        let mut layout: Layout = Layout::new(self.config.strategy);
        let mut seen: HashSet<Vec<Word>> = HashSet::with_capacity(requested);
        let mut levels: Vec<Level> = Vec::with_capacity(requested);
        let mut attempts: usize = 0;
        let mut failures: usize = 0;

        let floor: usize = self.config.min_words.min(pool.len());
        while levels.len() < requested && attempts < max_attempts {
            attempts += 1;

            let count: usize = self
                .word_count(levels.len(), pool.len())
                .saturating_sub(failures / STALL_LIMIT)
                .max(floor);
            let prefer_overlap: bool = levels.len() * 2 < requested;

            let Some(words) = selector.select(count, prefer_overlap, rng) else {
                debug!("Attempt {attempts}: no combination of {count} words");
                failures += 1;
                continue;
            };

            let mut key: Vec<Word> = words.clone();
            key.sort();
            if seen.contains(&key) {
                debug!("Attempt {attempts}: duplicated combination");
                failures += 1;
                continue;
            }

            let grid_layout: Vec<Placement> = match layout.generate(&words, rng) {
                Ok(p) => p,
                Err(e) => {
                    if let LayoutError::DuplicateWord(w) = &e {
                        warn!("Duplicated word {w} in combination");
                    }
                    debug!("Attempt {attempts}: layout failed: {e:?}");
                    failures += 1;
                    continue;
                }
            };
            let letter_pool: LetterPool =
                LetterPool::build(&words, self.config.distractors, rng);
            debug_assert!(words.iter().all(|w| letter_pool.can_spell(w)));
            debug!("  Letter pool: {:?}", letter_pool.letters());
            seen.insert(key);
            failures = 0;

            info!(
                "  Level {}/{} - Words: {} ({} letters)",
                levels.len() + 1,
                requested,
                words
                    .iter()
                    .map(Word::as_str)
                    .collect::<Vec<&str>>()
                    .join(", "),
                letter_pool.len()
            );
            levels.push(Level {
                solution_words: words,
                grid_layout,
                letter_pool,
                level_id: String::new(),
            });
        }

        levels.sort_by(Level::difficulty_cmp);
        levels.truncate(requested);
        for (i, level) in levels.iter_mut().enumerate() {
            level.level_id = format!("u{unit}_l{}", i + 1);
        }
        debug_assert_eq!(
            levels.iter().map(Level::key).collect::<HashSet<Vec<Word>>>().len(),
            levels.len()
        );

        if levels.len() < requested {
            warn!(
                "  Only generated {} levels out of {} for unit {unit} (attempted {attempts} times)",
                levels.len(),
                requested
            );
        }
        LevelBatch {
            levels,
            requested,
            attempts,
        }
    }
}

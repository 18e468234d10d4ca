/*
config.rs

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

//! Generator configuration.

use crate::errors::GeneratorError;
use crate::generator::layout::LayoutStrategy;

pub const COPYRIGHT_NOTICE: &str = "Copyright 2025 Hervé Quatremain
License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>.
This is free software: you are free to change and redistribute it.
There is NO WARRANTY, to the extent permitted by law.";

/// Glossary used when none is given on the command line.
pub const DEFAULT_GLOSSARY: &str = "span10011002.json";

pub const DEFAULT_LEVELS_PER_UNIT: usize = 40;
pub const DEFAULT_MIN_WORDS: usize = 2;
pub const DEFAULT_MAX_WORDS: usize = 4;
pub const DEFAULT_DISTRACTORS: usize = 1;

/// Attempts per requested level before the assembler gives up on a unit.
pub const DEFAULT_ATTEMPT_FACTOR: usize = 30;

/// Combinations built by the selector for each attempt.
pub const DEFAULT_SELECTOR_ATTEMPTS: usize = 25;

/// Generator parameters.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of levels to generate for each unit.
    pub levels_per_unit: usize,

    /// Number of words in the first levels.
    pub min_words: usize,

    /// Number of words in the last levels.
    pub max_words: usize,

    /// Number of letters added to the letter pool that are not in any solution word.
    pub distractors: usize,

    pub strategy: LayoutStrategy,

    /// The assembler stops after `levels_per_unit * attempt_factor` attempts.
    pub attempt_factor: usize,

    pub selector_attempts: usize,

    /// Seed for the random number generator. Use system entropy if `None`.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            levels_per_unit: DEFAULT_LEVELS_PER_UNIT,
            min_words: DEFAULT_MIN_WORDS,
            max_words: DEFAULT_MAX_WORDS,
            distractors: DEFAULT_DISTRACTORS,
            strategy: LayoutStrategy::default(),
            attempt_factor: DEFAULT_ATTEMPT_FACTOR,
            selector_attempts: DEFAULT_SELECTOR_ATTEMPTS,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Create a [`GeneratorConfig`] object for the given number of levels per unit.
    ///
    /// # Errors
    ///
    /// The method returns an error if the number of levels is not positive.
    pub fn with_levels(levels: i64) -> Result<Self, GeneratorError> {
        let levels_per_unit: usize = usize::try_from(levels)
            .ok()
            .filter(|l| *l > 0)
            .ok_or(GeneratorError::InvalidLevelCount(levels))?;
        Ok(Self {
            levels_per_unit,
            ..Self::default()
        })
    }

    /// Verify the parameters.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.levels_per_unit == 0 {
            return Err(GeneratorError::InvalidLevelCount(0));
        }
        if self.min_words == 0 || self.min_words > self.max_words {
            return Err(GeneratorError::InvalidWordRange {
                min: self.min_words,
                max: self.max_words,
            });
        }
        Ok(())
    }
}

/*
placement.rs

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

//! Position of a word on the puzzle grid.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use super::word::Word;

/// Grid coordinate, as `(x, y)`.
pub type Coord = (i32, i32);

/// Orientation of a placed word.
#[derive(Serialize, Deserialize, Display, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Horizontal,
    Vertical,
}

impl Direction {
    /// Return the other direction.
    pub fn perpendicular(self) -> Self {
        match self {
            Direction::Horizontal => Direction::Vertical,
            Direction::Vertical => Direction::Horizontal,
        }
    }

    /// Step between two consecutive letters.
    fn step(self) -> Coord {
        match self {
            Direction::Horizontal => (1, 0),
            Direction::Vertical => (0, 1),
        }
    }
}

/// A word, its starting cell, and its direction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Placement {
    pub word: Word,
    pub start_x: i32,
    pub start_y: i32,
    pub direction: Direction,
}

impl Placement {
    /// Create a [`Placement`] object.
    pub fn new(word: Word, start_x: i32, start_y: i32, direction: Direction) -> Self {
        Self {
            word,
            start_x,
            start_y,
            direction,
        }
    }

    /// Create the placement that puts the letter at `index` in `word` on the `cross` cell.
    pub fn crossing(word: Word, index: usize, cross: Coord, direction: Direction) -> Self {
        let (dx, dy) = direction.step();
        let offset: i32 = index as i32;
        Self::new(word, cross.0 - dx * offset, cross.1 - dy * offset, direction)
    }

    /// Coordinate of the letter at the given index.
    pub fn cell(&self, index: usize) -> Coord {
        let (dx, dy) = self.direction.step();
        let offset: i32 = index as i32;
        (self.start_x + dx * offset, self.start_y + dy * offset)
    }

    /// Iterate over the cells of the word with their letter.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, char)> + '_ {
        self.word
            .letters()
            .iter()
            .enumerate()
            .map(|(i, letter)| (self.cell(i), *letter))
    }
}

/// Shift the placements so that the smallest `x` and the smallest `y` are both `0`.
pub fn normalize_origin(placements: &mut [Placement]) {
    let min_x: i32 = placements.iter().map(|p| p.start_x).min().unwrap_or(0);
    let min_y: i32 = placements.iter().map(|p| p.start_y).min().unwrap_or(0);
    for p in placements.iter_mut() {
        p.start_x -= min_x;
        p.start_y -= min_y;
    }
}

/// Width and height of the rectangle that encloses all the placements.
pub fn bounding_box(placements: &[Placement]) -> (i32, i32) {
    let mut min: Coord = (i32::MAX, i32::MAX);
    let mut max: Coord = (i32::MIN, i32::MIN);
    for (c, _) in placements.iter().flat_map(|p| p.cells()) {
        min = (min.0.min(c.0), min.1.min(c.1));
        max = (max.0.max(c.0), max.1.max(c.1));
    }
    if placements.is_empty() {
        (0, 0)
    } else {
        (max.0 - min.0 + 1, max.1 - min.1 + 1)
    }
}

/*
grid.rs

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

//! Sparse letter grid used while searching for a layout.
//!
//! Each occupied cell stores its letter and the placements that use it. Placing a word adds an
//! owner to each of its cells, and removing the word drops that owner again; a cell disappears
//! when its last owner is removed. The search can then undo a placement without rebuilding the
//! grid.

use std::collections::HashMap;

use super::placement::{Coord, Direction, Placement};

/// Occupied cell.
#[derive(Debug, Clone)]
struct Cell {
    letter: char,

    /// Placement IDs and directions of the words using the cell.
    owners: Vec<(usize, Direction)>,
}

/// Grid of letters indexed by coordinate.
#[derive(Debug, Default, Clone)]
pub struct Grid {
    cells: HashMap<Coord, Cell>,
}

impl Grid {
    /// Create an empty [`Grid`] object.
    pub fn new() -> Self {
        Self {
            cells: HashMap::new(),
        }
    }

    /// Build a grid from a list of placements.
    ///
    /// Return `None` if two placements disagree on the letter of a cell, or if a placement,
    /// other than the first one, does not cross any of the placements before it.
    pub fn from_placements(placements: &[Placement]) -> Option<Self> {
        let mut grid: Grid = Grid::new();
        for (id, p) in placements.iter().enumerate() {
            let crossings: usize = grid.crossings(p)?;
            if id > 0 && crossings == 0 {
                return None;
            }
            grid.place(p, id);
        }
        Some(grid)
    }

    /// Number of occupied cells the placement would share with the grid.
    ///
    /// Return `None` if one of these cells holds a different letter.
    pub fn crossings(&self, placement: &Placement) -> Option<usize> {
        let mut count: usize = 0;
        for (coord, letter) in placement.cells() {
            if let Some(cell) = self.cells.get(&coord) {
                if cell.letter != letter {
                    return None;
                }
                count += 1;
            }
        }
        Some(count)
    }

    /// Whether one of the cells of the placement is already used by a word going in the same
    /// direction.
    pub fn overlaps_parallel(&self, placement: &Placement) -> bool {
        placement.cells().any(|(coord, _)| {
            self.cells.get(&coord).is_some_and(|cell| {
                cell.owners
                    .iter()
                    .any(|(_, direction)| *direction == placement.direction)
            })
        })
    }

    /// Add the placement to the grid under the given ID.
    pub fn place(&mut self, placement: &Placement, id: usize) {
        for (coord, letter) in placement.cells() {
            self.cells
                .entry(coord)
                .or_insert(Cell {
                    letter,
                    owners: Vec::with_capacity(2),
                })
                .owners
                .push((id, placement.direction));
        }
    }

    /// Remove the placement with the given ID from the grid.
    pub fn remove(&mut self, placement: &Placement, id: usize) {
        for (coord, _) in placement.cells() {
            if let Some(cell) = self.cells.get_mut(&coord) {
                cell.owners.retain(|(owner, _)| *owner != id);
                if cell.owners.is_empty() {
                    self.cells.remove(&coord);
                }
            }
        }
    }

    /// Coordinates of the cells shared by two words or more.
    pub fn crossing_cells(&self) -> Vec<Coord> {
        let mut cells: Vec<Coord> = self
            .cells
            .iter()
            .filter(|(_, cell)| cell.owners.len() > 1)
            .map(|(coord, _)| *coord)
            .collect();
        cells.sort_unstable();
        cells
    }

    /// Number of pairs of side-by-side cells that no word spans.
    ///
    /// Such pairs show letter sequences on the board that are not words of the puzzle.
    pub fn touching_pairs(&self) -> usize {
        self.cells
            .iter()
            .map(|(&(x, y), cell)| {
                [(x + 1, y), (x, y + 1)]
                    .iter()
                    .filter(|coord| {
                        self.cells.get(*coord).is_some_and(|other| {
                            !cell
                                .owners
                                .iter()
                                .any(|(id, _)| other.owners.iter().any(|(o, _)| o == id))
                        })
                    })
                    .count()
            })
            .sum()
    }
}

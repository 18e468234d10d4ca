/*
generator.rs

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

//! Build word-connect puzzles.
//!
//! A puzzle is a small crossword and the pool of letters used to spell its words.
//! Building the puzzles of a unit involves the following objects:
//!
//! * [`word::Word`] objects are the canonical, uppercase words of the unit.
//!   They are created from the raw glossary lemmas by [`word::Word::normalize`].
//!
//! * A [`combination::CombinationSelector`] object picks the words of a puzzle among the words of
//!   the unit, preferring words that share letters.
//!
//! * A [`layout::Layout`] object arranges these words on a grid, so that they cross at identical
//!   letters. It returns a list of [`placement::Placement`] objects, or an error if the words
//!   cannot be arranged. The [`grid::Grid`] object tracks the occupied cells during the search.
//!
//! * [`letter_pool::LetterPool::build`] computes the letters offered to the player.
//!
//! * A [`levels::LevelAssembler`] object runs the steps above in a loop until enough
//!   [`levels::Level`] objects are generated for the unit, or until it gives up.
//!
//! All the objects that make random choices take the random number generator as a parameter,
//! so that a seeded generator gives reproducible puzzles.

pub mod combination;
pub mod grid;
pub mod layout;
pub mod letter_pool;
pub mod levels;
pub mod placement;
pub mod word;

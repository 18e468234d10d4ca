/*
errors.rs

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

//! Errors that stop the generation.
//!
//! Only configuration, input, and output problems are reported this way. A combination of words
//! that cannot be laid out is not an error: the generator silently tries other words.

use std::io;
use thiserror::Error;

/// Type of errors.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("the number of levels per unit must be positive, got {0}")]
    InvalidLevelCount(i64),

    #[error("invalid number of words per puzzle: {min} to {max}")]
    InvalidWordRange { min: usize, max: usize },

    #[error("the {0} field name cannot be empty")]
    EmptyFieldName(&'static str),

    #[error("cannot read the glossary {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot fetch the glossary {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("the glossary is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot encode {what}: {source}")]
    Encode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

/*
glossary.rs

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

//! Load the vocabulary from a glossary file.
//!
//! The glossary is a JSON document, read from a local file or downloaded from an `http` or
//! `https` URL. It is either an array of entries, or an object with an `items` or `data` array.
//! Each entry provides the unit it belongs to and the Spanish lemma, under configurable field
//! names.
//!
//! Lemmas are converted with [`Word::normalize`], and entries that cannot be used in a puzzle are
//! silently dropped.

use log::{debug, info};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::time::Duration;

use crate::errors::GeneratorError;
use crate::generator::word::Word;

pub const DEFAULT_UNIT_KEY: &str = "_";
pub const DEFAULT_LEMMA_KEY: &str = "Unidad Léxica (Español)";

/// Fields tried, in order, when an entry has no lemma under the configured name.
const FALLBACK_LEMMA_KEYS: [&str; 3] = ["palabra", "entrada", "term"];

/// Unit of the entries that do not provide one.
const DEFAULT_UNIT: &str = "1";

/// Max duration for downloading the glossary.
const FETCH_TIMEOUT_SEC: u64 = 30;

/// Names of the entry fields to read.
#[derive(Debug, Clone)]
pub struct GlossaryFields {
    pub unit_key: String,
    pub lemma_key: String,
}

impl Default for GlossaryFields {
    fn default() -> Self {
        Self {
            unit_key: DEFAULT_UNIT_KEY.to_string(),
            lemma_key: DEFAULT_LEMMA_KEY.to_string(),
        }
    }
}

impl GlossaryFields {
    /// Verify that the field names are not empty.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.unit_key.trim().is_empty() {
            return Err(GeneratorError::EmptyFieldName("unit"));
        }
        if self.lemma_key.trim().is_empty() {
            return Err(GeneratorError::EmptyFieldName("lemma"));
        }
        Ok(())
    }
}

/// Words of a unit, in the order they appear in the glossary.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub name: String,
    pub words: Vec<Word>,
}

/// Vocabulary grouped by unit.
#[derive(Debug, Default)]
pub struct Glossary {
    /// Number of entries in the source document.
    pub entries: usize,

    /// Units, in the order they first appear in the glossary.
    pub units: Vec<Unit>,
}

impl Glossary {
    /// Read and parse the glossary from a file or a URL.
    pub fn load(source: &str, fields: &GlossaryFields) -> Result<Self, GeneratorError> {
        info!("Loading glossary from: {source}");
        let raw: String = read_source(source)?;
        let glossary: Glossary = Self::parse(&raw, fields)?;
        info!(
            "Filtered {} entries to {} simple lexical units across {} units",
            glossary.entries,
            glossary.word_count(),
            glossary.units.len()
        );
        Ok(glossary)
    }

    /// Parse the JSON glossary.
    pub fn parse(raw: &str, fields: &GlossaryFields) -> Result<Self, GeneratorError> {
        let json: Value = serde_json::from_str(raw)?;
        let items: &[Value] = match &json {
            Value::Array(a) => a.as_slice(),
            Value::Object(o) => o
                .get("items")
                .or_else(|| o.get("data"))
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default(),
            _ => &[],
        };

        let mut glossary: Glossary = Glossary {
            entries: items.len(),
            units: Vec::new(),
        };
        let mut unit_index: HashMap<String, usize> = HashMap::new();
        let mut unit_words: Vec<HashSet<Word>> = Vec::new();

        for item in items {
            let Some(word) = lemma(item, &fields.lemma_key).and_then(Word::normalize) else {
                continue;
            };
            let name: String = unit_name(item, &fields.unit_key);
            let index: usize = *unit_index.entry(name.clone()).or_insert_with(|| {
                glossary.units.push(Unit {
                    name,
                    words: Vec::new(),
                });
                unit_words.push(HashSet::new());
                glossary.units.len() - 1
            });
            if unit_words[index].insert(word.clone()) {
                glossary.units[index].words.push(word);
            }
        }
        Ok(glossary)
    }

    /// Number of words over all the units.
    pub fn word_count(&self) -> usize {
        self.units.iter().map(|u| u.words.len()).sum()
    }

    /// Sorted list of all the distinct words, in lowercase.
    pub fn dictionary(&self) -> Vec<String> {
        let mut words: Vec<String> = self
            .units
            .iter()
            .flat_map(|u| u.words.iter().map(Word::to_lowercase))
            .collect();
        words.sort();
        words.dedup();
        words
    }
}

/// Lemma of the entry.
fn lemma<'a>(item: &'a Value, lemma_key: &str) -> Option<&'a str> {
    std::iter::once(lemma_key)
        .chain(FALLBACK_LEMMA_KEYS)
        .filter_map(|key| item.get(key).and_then(Value::as_str))
        .find(|s| !s.trim().is_empty())
}

/// Unit of the entry. Units can be given as strings or numbers.
fn unit_name(item: &Value, unit_key: &str) -> String {
    match item.get(unit_key) {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => DEFAULT_UNIT.to_string(),
    }
}

/// Whether the source is a URL rather than a file path.
fn is_url(source: &str) -> bool {
    let lower: String = source.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Return the content of the file or URL.
fn read_source(source: &str) -> Result<String, GeneratorError> {
    if !is_url(source) {
        return fs::read_to_string(source).map_err(|e| GeneratorError::Read {
            path: source.to_string(),
            source: e,
        });
    }

    debug!("Downloading {source}");
    let fetch_error = |reason: String| GeneratorError::Fetch {
        url: source.to_string(),
        reason,
    };
    let agent: ureq::Agent = ureq::AgentBuilder::new()
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SEC))
        .build();
    agent
        .get(source)
        .call()
        .map_err(|e| fetch_error(e.to_string()))?
        .into_string()
        .map_err(|e| fetch_error(e.to_string()))
}

/*
cli_options.rs

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

//! Process command-line options and run the generator.
//!
//! # Examples
//!
//! Generate 40 levels for each unit of the local glossary:
//!
//! ```
//! $ cruzaletras --glossary span10011002.json --levels 40
//! ```
//!
//! Use a remote glossary with other field names, and reproducible puzzles:
//!
//! ```
//! $ cruzaletras -g https://example.org/glosario.json --unit-key unidad --lemma-key lema --seed 7
//! ```

use clap::Parser;
use env_logger::Env;
use log::{LevelFilter, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::{
    COPYRIGHT_NOTICE, DEFAULT_DISTRACTORS, DEFAULT_GLOSSARY, DEFAULT_LEVELS_PER_UNIT,
    DEFAULT_MAX_WORDS, DEFAULT_MIN_WORDS, GeneratorConfig,
};
use crate::errors::GeneratorError;
use crate::generator::layout::LayoutStrategy;
use crate::generator::levels::{LevelAssembler, LevelBatch, LevelSet};
use crate::glossary::{DEFAULT_LEMMA_KEY, DEFAULT_UNIT_KEY, Glossary, GlossaryFields};
use crate::saver::levels::SaverLevels;

/// Units need at least this number of words to produce a puzzle.
const MIN_UNIT_WORDS: usize = 2;

/// Generate word-connect puzzles from a Spanish glossary.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Glossary file or http(s) URL
    #[arg(short, long, default_value = DEFAULT_GLOSSARY)]
    glossary: String,

    /// Number of levels to generate for each unit
    #[arg(short, long, default_value_t = DEFAULT_LEVELS_PER_UNIT as i64, allow_negative_numbers = true)]
    levels: i64,

    /// Name of the entry field that holds the unit
    #[arg(long, alias = "unitKey", default_value = DEFAULT_UNIT_KEY)]
    unit_key: String,

    /// Name of the entry field that holds the Spanish lemma
    #[arg(long, alias = "lemmaKey", default_value = DEFAULT_LEMMA_KEY)]
    lemma_key: String,

    /// Number of words in the first levels of a unit
    #[arg(long, default_value_t = DEFAULT_MIN_WORDS)]
    min_words: usize,

    /// Number of words in the last levels of a unit
    #[arg(long, default_value_t = DEFAULT_MAX_WORDS)]
    max_words: usize,

    /// Number of extra letters that are not part of any solution word
    #[arg(long, default_value_t = DEFAULT_DISTRACTORS)]
    distractors: usize,

    /// Crossword layout strategy
    #[arg(value_enum, short, long, default_value_t = LayoutStrategy::General)]
    strategy: LayoutStrategy,

    /// Seed for reproducible puzzles
    #[arg(long)]
    seed: Option<u64>,

    /// Directory where the levels and dictionary files are written
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse the command-line options and generate the puzzles.
pub fn run() -> ExitCode {
    let args: Args = Args::parse();

    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    if args.debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();

    match generate(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error generating puzzles: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Build the configuration from the options.
fn build_config(args: &Args) -> Result<(GeneratorConfig, GlossaryFields), GeneratorError> {
    let config: GeneratorConfig = GeneratorConfig {
        min_words: args.min_words,
        max_words: args.max_words,
        distractors: args.distractors,
        strategy: args.strategy,
        seed: args.seed,
        ..GeneratorConfig::with_levels(args.levels)?
    };
    config.validate()?;

    let fields: GlossaryFields = GlossaryFields {
        unit_key: args.unit_key.clone(),
        lemma_key: args.lemma_key.clone(),
    };
    fields.validate()?;
    Ok((config, fields))
}

/// Load the glossary, generate the levels of every unit, and save the files.
fn generate(args: &Args) -> Result<(), GeneratorError> {
    let (config, fields) = build_config(args)?;

    info!("Glossary source: {}", args.glossary);
    info!("Levels per unit: {}", config.levels_per_unit);
    info!("Words per puzzle: {}-{}", config.min_words, config.max_words);
    info!("Distractor letters: {}", config.distractors);

    let glossary: Glossary = Glossary::load(&args.glossary, &fields)?;

    let mut rng: StdRng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let assembler: LevelAssembler = LevelAssembler::new(&config);
    let mut level_set: LevelSet = LevelSet::new();
    let mut incomplete: usize = 0;
    for unit in &glossary.units {
        if unit.words.len() < MIN_UNIT_WORDS {
            warn!("Unit {}: skipped, not enough words", unit.name);
            continue;
        }
        info!(
            "Generating {} puzzles for unit {} ({} words)...",
            config.levels_per_unit,
            unit.name,
            unit.words.len()
        );
        let batch: LevelBatch = assembler.assemble(&unit.name, &unit.words, &mut rng);
        info!(
            "Unit {}: {} levels in {} attempts",
            unit.name,
            batch.levels.len(),
            batch.attempts
        );
        if !batch.is_complete() {
            incomplete += 1;
        }
        level_set.push(format!("unit_{}", unit.name), batch.levels);
    }

    let dictionary: Vec<String> = glossary.dictionary();
    let saver: SaverLevels = SaverLevels::new(args.output_dir.clone());
    saver.save(&level_set, &dictionary)?;

    println!("Levels saved to: {}", saver.levels_file().display());
    println!(
        "Dictionary saved to: {} ({} words)",
        saver.dictionary_file().display(),
        dictionary.len()
    );
    println!("Total units: {}", level_set.len());
    println!("Total levels: {}", level_set.total_levels());
    if incomplete > 0 {
        println!("Units with fewer levels than requested: {incomplete}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("cruzaletras").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let args = parse(&[]);
        let (config, fields) = build_config(&args).unwrap();
        assert_eq!(config.levels_per_unit, DEFAULT_LEVELS_PER_UNIT);
        assert_eq!(config.strategy, LayoutStrategy::General);
        assert_eq!(fields.unit_key, "_");
        assert_eq!(args.glossary, DEFAULT_GLOSSARY);
    }

    #[test]
    fn invalid_options_are_fatal() {
        let args = parse(&["--levels", "-2"]);
        assert!(matches!(
            build_config(&args),
            Err(GeneratorError::InvalidLevelCount(-2))
        ));
        let args = parse(&["--levels", "0"]);
        assert!(build_config(&args).is_err());
        let args = parse(&["--min-words", "5", "--max-words", "3"]);
        assert!(build_config(&args).is_err());
        let args = parse(&["--lemmaKey", ""]);
        assert!(matches!(
            build_config(&args),
            Err(GeneratorError::EmptyFieldName("lemma"))
        ));
    }

    #[test]
    fn generate_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let glossary = dir.path().join("glossary.json");
        fs::write(
            &glossary,
            r#"[
                {"_": "1", "Unidad Léxica (Español)": "la casa"},
                {"_": "1", "Unidad Léxica (Español)": "la sal"},
                {"_": "1", "Unidad Léxica (Español)": "la mesa"},
                {"_": "1", "Unidad Léxica (Español)": "el mar"},
                {"_": "2", "Unidad Léxica (Español)": "el sol"}
            ]"#,
        )
        .unwrap();
        let args = parse(&[
            "--glossary",
            glossary.to_str().unwrap(),
            "--levels",
            "3",
            "--seed",
            "4",
            "--output-dir",
            dir.path().to_str().unwrap(),
        ]);
        generate(&args).unwrap();

        let levels: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(dir.path().join("levels_generated.json")).unwrap(),
        )
        .unwrap();
        let unit = levels["unit_1"].as_array().unwrap();
        assert!(!unit.is_empty());
        assert_eq!(unit[0]["level_id"], "u1_l1");
        // Unit 2 has a single word
        assert!(levels.get("unit_2").is_none());

        let dictionary: Vec<String> = serde_json::from_str(
            &fs::read_to_string(dir.path().join("dictionary.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(dictionary, vec!["casa", "mar", "mesa", "sal", "sol"]);
    }

    #[test]
    fn malformed_glossary_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let glossary = dir.path().join("glossary.json");
        fs::write(&glossary, "[{").unwrap();
        let args = parse(&[
            "--glossary",
            glossary.to_str().unwrap(),
            "--output-dir",
            dir.path().to_str().unwrap(),
        ]);
        assert!(matches!(generate(&args), Err(GeneratorError::Json(_))));
        assert!(!dir.path().join("levels_generated.json").exists());
        assert!(!dir.path().join("dictionary.json").exists());
    }
}

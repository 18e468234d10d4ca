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

//! Save the generated levels and the dictionary.
//!
//! Two JSON files are written to the output directory:
//!
//! * `levels_generated.json`, the serialization of the [`LevelSet`] object.
//! * `dictionary.json`, the sorted list of the valid words in lowercase. The game uses it to
//!   accept bonus words.
//!
//! Both documents are encoded before anything is written, and each file is first written under
//! a temporary name and then renamed. If the second rename fails, the first one is rolled back
//! and the previous levels file, if any, is restored. A failed save leaves the output directory
//! as it was.

use log::debug;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::errors::GeneratorError;
use crate::generator::levels::LevelSet;

pub const LEVELS_FILE: &str = "levels_generated.json";
pub const DICTIONARY_FILE: &str = "dictionary.json";

/// Object to save the generated files.
pub struct SaverLevels {
    /// Absolute path to the levels file.
    levels_file: PathBuf,

    /// Absolute path to the dictionary file.
    dictionary_file: PathBuf,
}

impl SaverLevels {
    /// Create a [`SaverLevels`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the files must be saved.
    pub fn new(output_dir: PathBuf) -> Self {
        let levels_file: PathBuf = output_dir.join(LEVELS_FILE);
        let dictionary_file: PathBuf = output_dir.join(DICTIONARY_FILE);
        debug!("Levels file: {levels_file:?}  Dictionary file: {dictionary_file:?}");
        Self {
            levels_file,
            dictionary_file,
        }
    }

    /// Path to the levels file.
    pub fn levels_file(&self) -> &Path {
        &self.levels_file
    }

    /// Path to the dictionary file.
    pub fn dictionary_file(&self) -> &Path {
        &self.dictionary_file
    }

    /// Save the levels and the dictionary.
    pub fn save(&self, levels: &LevelSet, dictionary: &[String]) -> Result<(), GeneratorError> {
        let levels_json: String =
            serde_json::to_string_pretty(levels).map_err(|e| GeneratorError::Encode {
                what: "levels",
                source: e,
            })?;
        let dictionary_json: String =
            serde_json::to_string_pretty(dictionary).map_err(|e| GeneratorError::Encode {
                what: "dictionary",
                source: e,
            })?;

        let levels_tmp: PathBuf = write_temporary(&self.levels_file, &levels_json)?;
        let dictionary_tmp: PathBuf = match write_temporary(&self.dictionary_file, &dictionary_json)
        {
            Ok(p) => p,
            Err(e) => {
                let _ = fs::remove_file(&levels_tmp);
                return Err(e);
            }
        };

        let result: Result<(), GeneratorError> = self.commit(&levels_tmp, &dictionary_tmp);
        if result.is_err() {
            let _ = fs::remove_file(&levels_tmp);
            let _ = fs::remove_file(&dictionary_tmp);
        }
        result
    }

    /// Move the temporary files into place.
    ///
    /// The current levels file is kept aside until the dictionary is in place, so that it can be
    /// restored when the dictionary cannot be renamed.
    fn commit(&self, levels_tmp: &Path, dictionary_tmp: &Path) -> Result<(), GeneratorError> {
        let backup: Option<PathBuf> = if self.levels_file.exists() {
            let mut backup: PathBuf = self.levels_file.clone();
            backup.set_extension("json.bak");
            rename(&self.levels_file, &backup)?;
            Some(backup)
        } else {
            None
        };
        let restore = |backup: &Option<PathBuf>| {
            if let Some(b) = backup {
                let _ = fs::rename(b, &self.levels_file);
            }
        };

        if let Err(e) = rename(levels_tmp, &self.levels_file) {
            restore(&backup);
            return Err(e);
        }
        if let Err(e) = rename(dictionary_tmp, &self.dictionary_file) {
            debug!("Rolling back {:?}", self.levels_file);
            let _ = fs::remove_file(&self.levels_file);
            restore(&backup);
            return Err(e);
        }
        if let Some(b) = &backup {
            let _ = fs::remove_file(b);
        }
        Ok(())
    }
}

/// Write the content next to the destination file, under a temporary name.
fn write_temporary(destination: &Path, content: &str) -> Result<PathBuf, GeneratorError> {
    let mut tmp: PathBuf = destination.to_path_buf();
    tmp.set_extension("json.tmp");
    let write_error = |e| GeneratorError::Write {
        path: tmp.display().to_string(),
        source: e,
    };

    let file: File = File::create(&tmp).map_err(write_error)?;
    if let Err(e) = write_content(BufWriter::new(file), content) {
        let _ = fs::remove_file(&tmp);
        return Err(write_error(e));
    }
    Ok(tmp)
}

fn write_content(mut writer: BufWriter<File>, content: &str) -> io::Result<()> {
    writer.write_all(content.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()
}

fn rename(from: &Path, to: &Path) -> Result<(), GeneratorError> {
    fs::rename(from, to).map_err(|e| GeneratorError::Write {
        path: to.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_are_written() {
        let dir = tempfile::tempdir().unwrap();
        let saver = SaverLevels::new(dir.path().to_path_buf());
        let mut set = LevelSet::new();
        set.push("unit_1".to_string(), Vec::new());
        let dictionary = vec!["casa".to_string(), "sol".to_string()];

        saver.save(&set, &dictionary).unwrap();

        let levels: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(saver.levels_file()).unwrap()).unwrap();
        assert_eq!(levels["unit_1"], serde_json::json!([]));
        let words: Vec<String> =
            serde_json::from_str(&fs::read_to_string(saver.dictionary_file()).unwrap()).unwrap();
        assert_eq!(words, dictionary);

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn missing_directory_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let saver = SaverLevels::new(missing.clone());
        let result = saver.save(&LevelSet::new(), &[]);
        assert!(matches!(result, Err(GeneratorError::Write { .. })));
        assert!(!missing.exists());
    }

    fn leftovers(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                let name = p.to_string_lossy();
                name.ends_with(".tmp") || name.ends_with(".bak")
            })
            .collect()
    }

    #[test]
    fn failed_dictionary_rename_restores_previous_levels() {
        let dir = tempfile::tempdir().unwrap();
        let saver = SaverLevels::new(dir.path().to_path_buf());
        fs::write(saver.levels_file(), "{\"unit_1\": []}\n").unwrap();

        // A non-empty directory cannot be replaced by a file
        fs::create_dir(saver.dictionary_file()).unwrap();
        fs::write(saver.dictionary_file().join("keep"), "x").unwrap();

        let mut set = LevelSet::new();
        set.push("unit_2".to_string(), Vec::new());
        let result = saver.save(&set, &["sol".to_string()]);
        assert!(matches!(result, Err(GeneratorError::Write { .. })));

        assert_eq!(
            fs::read_to_string(saver.levels_file()).unwrap(),
            "{\"unit_1\": []}\n"
        );
        assert!(saver.dictionary_file().is_dir());
        assert!(leftovers(dir.path()).is_empty());
    }

    #[test]
    fn failed_dictionary_rename_removes_new_levels() {
        let dir = tempfile::tempdir().unwrap();
        let saver = SaverLevels::new(dir.path().to_path_buf());
        fs::create_dir(saver.dictionary_file()).unwrap();
        fs::write(saver.dictionary_file().join("keep"), "x").unwrap();

        let result = saver.save(&LevelSet::new(), &[]);
        assert!(result.is_err());
        assert!(!saver.levels_file().exists());
        assert!(leftovers(dir.path()).is_empty());
    }
}

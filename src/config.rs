/*
config.rs

Copyright 2025 Hervé Quatremain

This file is part of Cacapalavras.

Cacapalavras is free software: you can redistribute it and/or modify it under
the terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Cacapalavras is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Cacapalavras. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Engine configuration.
//!
//! The configuration is a JSON document deserialized with [`serde`].
//! All the fields are optional; missing fields get their default value.
//!
//! ```json
//! {
//!     "points": { "by_length": { "3": 10, "4": 20 }, "extra_letter_points": 10 },
//!     "challenge_bonus": 25,
//!     "hints_per_level": 2
//! }
//! ```

use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;
use std::time::Duration;

use crate::scoring::PointsTable;

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file cannot be read or written.
    Io(std::io::Error),

    /// The configuration file is not valid JSON or has wrong field types.
    Parse(serde_json::Error),

    /// A longer word would score less than a shorter word.
    NonMonotonicPoints,

    /// A field has a value out of its range.
    OutOfRange(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot access the configuration file: {e}"),
            ConfigError::Parse(e) => write!(f, "cannot parse the configuration file: {e}"),
            ConfigError::NonMonotonicPoints => {
                write!(f, "the points table must not decrease with the word length")
            }
            ConfigError::OutOfRange(field) => write!(f, "the {field} value is out of range"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Engine parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Points per word length.
    pub points: PointsTable,

    /// Points added to the level score when the challenge word is found without the player
    /// asking for it as a hint.
    pub challenge_bonus: u32,

    /// Number of hints the player can use per level.
    pub hints_per_level: usize,

    /// Time budget for a level, in seconds.
    pub level_time_secs: u64,

    /// Maximum time to wait for the word supplier, in milliseconds.
    pub supplier_timeout_ms: u64,

    /// How long a supplied word list stays in the cache, in seconds.
    pub cache_ttl_secs: u64,

    /// Number of random tries to place a word before dropping it.
    pub placement_attempts: usize,

    /// Minimum percentage of the requested words that must be placed for the board to be
    /// valid.
    pub min_placed_percent: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            points: PointsTable::default(),
            challenge_bonus: 0,
            hints_per_level: 3,
            level_time_secs: 180,
            supplier_timeout_ms: 3000,
            cache_ttl_secs: 600,
            placement_attempts: 200,
            min_placed_percent: 80,
        }
    }
}

impl EngineConfig {
    /// Level time budget.
    pub fn level_time(&self) -> Duration {
        Duration::from_secs(self.level_time_secs)
    }

    /// Word supplier timeout.
    pub fn supplier_timeout(&self) -> Duration {
        Duration::from_millis(self.supplier_timeout_ms)
    }

    /// Cache time-to-live.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Verify that the parameters are consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.points.is_monotonic() {
            return Err(ConfigError::NonMonotonicPoints);
        }
        if self.placement_attempts == 0 {
            return Err(ConfigError::OutOfRange("placement_attempts"));
        }
        if self.min_placed_percent > 100 {
            return Err(ConfigError::OutOfRange("min_placed_percent"));
        }
        if self.level_time_secs == 0 {
            return Err(ConfigError::OutOfRange("level_time_secs"));
        }
        Ok(())
    }

    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read the configuration file.
    ///
    /// Return the [`EngineConfig`] object or None if the file does not exist.
    pub fn from_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        debug!("Configuration file: {path:?}");
        let file: File = match File::open(path) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(ConfigError::Io(error)),
            },
        };
        let reader: BufReader<File> = BufReader::new(file);
        let config: EngineConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(Some(config))
    }

    /// Save the configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let file: File = File::create(path)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}

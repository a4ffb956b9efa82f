/*
supplier.rs

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

//! Interface with the external word supplier.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

use crate::difficulty::{self, Difficulty};

/// What the engine asks the supplier for.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WordConstraints {
    /// Number of words.
    pub count: usize,

    /// Minimum number of letters per word.
    pub min_len: usize,

    /// Maximum number of letters per word.
    pub max_len: usize,

    /// Words that should not be used, such as the words of the previous level.
    pub exclude: Vec<String>,
}

impl WordConstraints {
    /// Return the constraints for the given level.
    pub fn for_level(level: u32, exclude: Vec<String>) -> Self {
        let lengths = Difficulty::for_level(level).word_lengths();
        Self {
            count: difficulty::word_count(level),
            min_len: *lengths.start(),
            max_len: *lengths.end(),
            exclude,
        }
    }

    /// Whether the word has an acceptable length and is not excluded.
    pub fn accepts(&self, word: &str) -> bool {
        let len: usize = word.chars().count();
        len >= self.min_len && len <= self.max_len && !self.exclude.iter().any(|w| w == word)
    }
}

/// Type of errors.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum SupplyError {
    /// The supplier reported a failure.
    Unavailable(String),

    /// The supplier did not answer in time.
    Timeout,

    /// The supplier stopped before answering.
    Disconnected,

    /// The supplier returned no words.
    Empty,

    /// The supplier returned fewer usable words than needed.
    Undersized { got: usize, needed: usize },
}

impl fmt::Display for SupplyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SupplyError::Unavailable(msg) => write!(f, "word supplier unavailable: {msg}"),
            SupplyError::Timeout => write!(f, "word supplier timed out"),
            SupplyError::Disconnected => write!(f, "word supplier stopped before answering"),
            SupplyError::Empty => write!(f, "word supplier returned no words"),
            SupplyError::Undersized { got, needed } => {
                write!(f, "word supplier returned {got} usable words, {needed} needed")
            }
        }
    }
}

impl Error for SupplyError {}

/// Source of target words.
///
/// Implementations own their retry and exclusion policies. They are called from a worker
/// thread and can block.
pub trait WordSupplier: Send + Sync {
    /// Return an ordered list of words for the level. The last word is the hardest one.
    fn get_words(&self, level: u32, constraints: &WordConstraints) -> Result<Vec<String>, SupplyError>;
}

/// Supplier that always returns the same list.
#[derive(Debug, Clone)]
pub struct FixedSupplier {
    words: Vec<String>,
}

impl FixedSupplier {
    /// Create a [`FixedSupplier`] object.
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }
}

impl WordSupplier for FixedSupplier {
    fn get_words(&self, _level: u32, _constraints: &WordConstraints) -> Result<Vec<String>, SupplyError> {
        Ok(self.words.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraints_follow_the_level() {
        let c: WordConstraints = WordConstraints::for_level(1, Vec::new());
        assert_eq!((c.count, c.min_len, c.max_len), (3, 3, 5));
        let c: WordConstraints = WordConstraints::for_level(9, vec![String::from("BORBOLETA")]);
        assert_eq!((c.count, c.min_len, c.max_len), (7, 5, 10));
        assert!(!c.accepts("BORBOLETA"));
        assert!(c.accepts("ELEFANTE"));
        assert!(!c.accepts("SOL"));
    }
}

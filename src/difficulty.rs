/*
difficulty.rs

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

//! Difficulty tiers.
//!
//! The tier is derived from the level number and controls the length of the words that the
//! word supplier is asked for.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use strum_macros::FromRepr;

/// Maximum number of words in a level.
pub const MAX_WORDS: usize = 10;

/// Difficulty tier.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialOrd,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    FromRepr,
    Default,
)]
#[repr(usize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl Difficulty {
    /// Return the tier of the given level.
    pub fn for_level(level: u32) -> Self {
        match level {
            0..=3 => Difficulty::Easy,
            4..=7 => Difficulty::Medium,
            _ => Difficulty::Hard,
        }
    }

    /// Return all the tiers, from the easiest to the hardest.
    pub fn all() -> Vec<Difficulty> {
        (0..).map_while(Difficulty::from_repr).collect()
    }

    /// Range of word lengths for the tier.
    pub fn word_lengths(&self) -> RangeInclusive<usize> {
        match self {
            Difficulty::Easy => 3..=5,
            Difficulty::Medium => 4..=7,
            Difficulty::Hard => 5..=10,
        }
    }
}

/// Number of words requested for the given level.
///
/// Level 1 and 2 have three words, and one word is added every two levels, up to
/// [`MAX_WORDS`].
pub fn word_count(level: u32) -> usize {
    let level: usize = level.max(1) as usize;
    (3 + (level - 1) / 2).min(MAX_WORDS)
}

/*
scoring.rs

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

//! Points awarded for a found word.
//!
//! The table is provided by the configuration so that the administrators can tune it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Points per word length.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PointsTable {
    /// Points for a word of the given number of letters.
    ///
    /// A length between two entries uses the entry of the shorter length.
    pub by_length: BTreeMap<usize, u32>,

    /// Points added for each letter above the longest length of [`PointsTable::by_length`].
    pub extra_letter_points: u32,
}

impl Default for PointsTable {
    fn default() -> Self {
        Self {
            by_length: BTreeMap::from([(3, 10), (4, 20), (5, 30), (6, 40), (7, 50)]),
            extra_letter_points: 10,
        }
    }
}

impl PointsTable {
    /// Return the number of points for the word.
    pub fn points(&self, word: &str) -> u32 {
        let len: usize = word.chars().count();
        let (max_len, max_points) = match self.by_length.last_key_value() {
            Some((l, p)) => (*l, *p),
            None => return 0,
        };

        if len > max_len {
            let extra: u32 = (len - max_len) as u32;
            return max_points.saturating_add(self.extra_letter_points.saturating_mul(extra));
        }
        match self.by_length.range(..=len).next_back() {
            Some((_, p)) => *p,
            None => 0,
        }
    }

    /// Whether longer words never score less than shorter words.
    pub fn is_monotonic(&self) -> bool {
        let values: Vec<u32> = self.by_length.values().copied().collect();
        values.windows(2).all(|w| w[0] <= w[1])
    }
}

/// Return the number of points for the word with the given table.
pub fn points(word: &str, table: &PointsTable) -> u32 {
    table.points(word)
}

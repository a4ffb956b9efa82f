/*
normalize.rs

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

//! Clean the target word list before placement.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Minimum number of letters in a target word.
pub const MIN_WORD_LEN: usize = 3;

/// Why a word is not part of the board.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// The word contains characters that are not letters.
    Invalid,

    /// The word has less than [`MIN_WORD_LEN`] letters.
    TooShort,

    /// The word does not fit in the grid.
    TooLong,

    /// The word is already in the list.
    Duplicate,

    /// No free spot was found for the word.
    NotPlaced,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DropReason::Invalid => write!(f, "invalid characters"),
            DropReason::TooShort => write!(f, "too short"),
            DropReason::TooLong => write!(f, "too long for the grid"),
            DropReason::Duplicate => write!(f, "duplicated"),
            DropReason::NotPlaced => write!(f, "no room in the grid"),
        }
    }
}

/// A word from the requested list that is not on the board.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DroppedWord {
    /// The word as provided by the caller.
    pub word: String,

    /// Why the word was dropped.
    pub reason: DropReason,
}

/// Remove the diacritics used in Portuguese from an uppercase letter.
fn fold(c: char) -> char {
    match c {
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'Ç' => 'C',
        'Ñ' => 'N',
        _ => c,
    }
}

/// Return the word in uppercase without diacritics, or None if it contains characters that
/// cannot be placed in the grid.
pub fn normalize_word(raw: &str) -> Option<String> {
    let word: String = raw.trim().to_uppercase().chars().map(fold).collect();
    if word.is_empty() || !word.chars().all(|c| c.is_ascii_uppercase()) {
        return None;
    }
    Some(word)
}

/// Normalize the list of words for a grid of the given size.
///
/// Return the usable words, in the same order as the input, and the dropped words.
pub fn normalize_words(raw: &[String], grid_size: usize) -> (Vec<String>, Vec<DroppedWord>) {
    let mut words: Vec<String> = Vec::with_capacity(raw.len());
    let mut dropped: Vec<DroppedWord> = Vec::new();
    let mut seen: HashSet<String> = HashSet::with_capacity(raw.len());

    for r in raw {
        let reason: Option<DropReason> = match normalize_word(r) {
            None => Some(DropReason::Invalid),
            Some(w) if w.len() < MIN_WORD_LEN => Some(DropReason::TooShort),
            Some(w) if w.len() > grid_size => Some(DropReason::TooLong),
            Some(w) => {
                if seen.insert(w.clone()) {
                    words.push(w);
                    None
                } else {
                    Some(DropReason::Duplicate)
                }
            }
        };
        if let Some(reason) = reason {
            debug!("Dropping word {r:?}: {reason}");
            dropped.push(DroppedWord {
                word: r.clone(),
                reason,
            });
        }
    }
    (words, dropped)
}

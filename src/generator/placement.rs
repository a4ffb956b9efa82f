/*
placement.rs

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

//! Place the target words in a grid and fill the remaining cells.

use log::{Level, debug, log_enabled};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::time::Instant;

use super::normalize::{self, DropReason, DroppedWord, MIN_WORD_LEN};
use super::scan;
use crate::config::EngineConfig;
use crate::grid::{self, Direction, Grid, Position};

/// Letters used to fill the cells that are not part of a word.
pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Minimum number of words on a board.
pub const MIN_LEVEL_WORDS: usize = 3;

/// Number of times the noise cells that form an extra copy of a word are drawn again.
const NOISE_REROLLS: usize = 10;

/// Type of errors.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// The word list has no usable word.
    NoWords,

    /// Not enough words could be placed (the attempt can be retried).
    TooFewPlaced { placed: usize, requested: usize },

    /// The grid does not contain a word where its placement record says it is. This is a bug.
    Unsound(String),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GenerationError::NoWords => write!(f, "no usable word in the list"),
            GenerationError::TooFewPlaced { placed, requested } => {
                write!(f, "only {placed} of {requested} words could be placed")
            }
            GenerationError::Unsound(word) => {
                write!(f, "the word {word} is not where it was placed")
            }
        }
    }
}

impl Error for GenerationError {}

/// Where a target word is hidden in the grid.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PlacedWord {
    /// Normalized word.
    pub word: String,

    /// Cells of the word, from the first letter to the last one.
    pub positions: Vec<Position>,

    /// Direction from the first letter to the last one.
    pub direction: Direction,
}

impl PlacedWord {
    /// Whether the path covers exactly the cells of the word, in reading order or in reverse.
    pub fn matches_path(&self, path: &[Position]) -> bool {
        path.len() == self.positions.len()
            && (path == self.positions.as_slice() || path.iter().rev().eq(self.positions.iter()))
    }
}

/// A generated board.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Board {
    /// Level the board was generated for.
    pub level: u32,

    /// Letter grid.
    pub grid: Grid,

    /// Words hidden in the grid, in the order of the requested list.
    pub placed_words: Vec<PlacedWord>,

    /// Words of the requested list that are not on the board.
    pub dropped_words: Vec<DroppedWord>,
}

impl Board {
    /// Return the challenge word, which is the last word of the list.
    pub fn challenge_word(&self) -> Option<&PlacedWord> {
        self.placed_words.last()
    }

    /// Return the placed words.
    pub fn words(&self) -> Vec<&str> {
        self.placed_words.iter().map(|p| p.word.as_str()).collect()
    }

    /// Return the placement record of the given word.
    pub fn find(&self, word: &str) -> Option<&PlacedWord> {
        self.placed_words.iter().find(|p| p.word == word)
    }
}

/// [`BoardGenerator`] object.
#[derive(Debug, Clone)]
pub struct BoardGenerator {
    /// Number of random tries for a word before it is dropped.
    pub placement_attempts: usize,

    /// Minimum percentage of the requested words that must be placed.
    pub min_placed_percent: u8,

    /// Number of placement tries during the last generation.
    pub attempts: usize,

    /// Duration in seconds of the last generation.
    pub duration: f32,
}

impl Default for BoardGenerator {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl BoardGenerator {
    /// Create the object.
    pub fn new(placement_attempts: usize, min_placed_percent: u8) -> Self {
        Self {
            placement_attempts: placement_attempts.max(1),
            min_placed_percent: min_placed_percent.min(100),
            attempts: 0,
            duration: 0.0,
        }
    }

    /// Create the object from the engine configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.placement_attempts, config.min_placed_percent)
    }

    /// Generate a board for the given words and level.
    ///
    /// # Errors
    ///
    /// The method returns an error if the list has no usable word, or if too many words cannot
    /// be placed. In that later case, the method can be retried.
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        level_words: &[String],
        level: u32,
        rng: &mut R,
    ) -> Result<Board, GenerationError> {
        let start: Instant = Instant::now();
        self.attempts = 0;
        self.duration = 0.0;

        let size: usize = grid::grid_size(level);
        let (words, mut dropped) = normalize::normalize_words(level_words, size);
        if words.is_empty() {
            return Err(GenerationError::NoWords);
        }
        debug!("Level {level}: grid {size}x{size}, words {words:?}");

        // Place the longest words first: they have the fewest possible spots
        let mut order: Vec<usize> = (0..words.len()).collect();
        order.sort_by_key(|i| std::cmp::Reverse(words[*i].len()));

        let mut grid: Grid = Grid::new(size);
        let mut slots: Vec<Option<PlacedWord>> = vec![None; words.len()];
        for i in order {
            slots[i] = self.place(&mut grid, &words[i], rng);
        }

        let mut placed_words: Vec<PlacedWord> = Vec::with_capacity(words.len());
        for (word, slot) in words.iter().zip(slots) {
            match slot {
                Some(p) => placed_words.push(p),
                None => {
                    debug!("Word {word} dropped after {} tries", self.placement_attempts);
                    dropped.push(DroppedWord {
                        word: word.clone(),
                        reason: DropReason::NotPlaced,
                    });
                }
            }
        }

        // Words dropped by the normalization do not count as placement failures
        let requested: usize = words.len();
        let placed: usize = placed_words.len();
        if placed < MIN_LEVEL_WORDS.min(requested)
            || placed * 100 < requested * self.min_placed_percent as usize
        {
            self.duration = start.elapsed().as_secs_f32();
            return Err(GenerationError::TooFewPlaced { placed, requested });
        }

        let noise: Vec<Position> = grid.positions().filter(|p| grid.get(*p).is_none()).collect();
        fill(&mut grid, &noise, rng);
        reroll_duplicates(&mut grid, &placed_words, &noise, rng);

        let board: Board = Board {
            level,
            grid,
            placed_words,
            dropped_words: dropped,
        };
        verify(&board)?;

        self.duration = start.elapsed().as_secs_f32();
        debug!(
            "Attempts = {}  Duration = {}  Dropped = {}",
            self.attempts,
            self.duration,
            board.dropped_words.len()
        );
        if log_enabled!(Level::Debug) {
            for p in &board.placed_words {
                debug!("    {} at {} going {:?}", p.word, p.positions[0], p.direction);
            }
        }
        Ok(board)
    }

    /// Try random spots for the word. Write the word in the grid and return its placement, or
    /// return None if no spot was found within the allowed number of tries.
    fn place<R: Rng + ?Sized>(&mut self, grid: &mut Grid, word: &str, rng: &mut R) -> Option<PlacedWord> {
        let size: usize = grid.size();
        for _ in 0..self.placement_attempts {
            self.attempts += 1;
            let start: Position = Position::new(rng.random_range(0..size), rng.random_range(0..size));
            let direction: Direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];

            if let Some(positions) = fits(grid, word, start, direction) {
                for (pos, letter) in positions.iter().zip(word.chars()) {
                    grid.set(*pos, letter);
                }
                return Some(PlacedWord {
                    word: word.to_string(),
                    positions,
                    direction,
                });
            }
        }
        None
    }
}

/// Return the cells of the word if it can be written from `start` in `direction`: the word must
/// stay in the grid, and each cell must be empty or already hold the same letter.
fn fits(grid: &Grid, word: &str, start: Position, direction: Direction) -> Option<Vec<Position>> {
    let mut positions: Vec<Position> = Vec::with_capacity(word.len());
    for (i, letter) in word.chars().enumerate() {
        let pos: Position = start.step(direction, i, grid.size())?;
        match grid.get(pos) {
            Some(c) if c != letter => return None,
            _ => positions.push(pos),
        }
    }
    Some(positions)
}

/// Write random letters in the given cells.
fn fill<R: Rng + ?Sized>(grid: &mut Grid, cells: &[Position], rng: &mut R) {
    for pos in cells {
        let letter: char = ALPHABET[rng.random_range(0..ALPHABET.len())] as char;
        grid.set(*pos, letter);
    }
}

/// Draw again the noise cells that accidentally spell a target word a second time.
///
/// Copies made only of letters from other words cannot be removed and are kept; the path
/// validator only accepts the recorded placement anyway.
fn reroll_duplicates<R: Rng + ?Sized>(
    grid: &mut Grid,
    placed_words: &[PlacedWord],
    noise: &[Position],
    rng: &mut R,
) {
    for round in 0..NOISE_REROLLS {
        let mut cells: Vec<Position> = Vec::new();
        for p in placed_words {
            for occurrence in scan::find_occurrences(grid, &p.word) {
                if scan::same_cells(&occurrence, &p.positions) {
                    continue;
                }
                cells.extend(occurrence.iter().filter(|c| noise.contains(c)));
            }
        }
        if cells.is_empty() {
            return;
        }
        debug!("Round {round}: drawing {} noise cells again", cells.len());
        cells.sort_unstable();
        cells.dedup();
        fill(grid, &cells, rng);
    }
    debug!("Some words still appear more than once after {NOISE_REROLLS} rounds");
}

/// Verify that the brute-force scan of the grid finds each word where it was placed.
fn verify(board: &Board) -> Result<(), GenerationError> {
    if !board.grid.is_full() {
        return Err(GenerationError::Unsound(String::from("<empty cell>")));
    }
    for p in &board.placed_words {
        if p.word.len() < MIN_WORD_LEN || board.grid.read(&p.positions) != p.word {
            return Err(GenerationError::Unsound(p.word.clone()));
        }
        let found: bool = scan::find_occurrences(&board.grid, &p.word)
            .iter()
            .any(|occurrence| *occurrence == p.positions);
        if !found {
            return Err(GenerationError::Unsound(p.word.clone()));
        }
    }
    Ok(())
}

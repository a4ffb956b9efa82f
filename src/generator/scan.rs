/*
scan.rs

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

//! Brute-force word search in a grid.
//!
//! The scan only uses the word and the grid letters. The board generator relies on it to verify
//! its own placement records.

use crate::grid::{Direction, Grid, Position};

/// Return the positions of the word when it starts at `start` and follows `direction`, or None
/// if the letters differ or the word leaves the grid.
pub fn read_at(grid: &Grid, word: &str, start: Position, direction: Direction) -> Option<Vec<Position>> {
    let mut positions: Vec<Position> = Vec::with_capacity(word.len());
    for (i, letter) in word.chars().enumerate() {
        let pos: Position = start.step(direction, i, grid.size())?;
        if grid.get(pos) != Some(letter) {
            return None;
        }
        positions.push(pos);
    }
    Some(positions)
}

/// Find all the occurrences of the word in the grid, in the eight directions.
///
/// A palindrome such as "OVO" is reported twice for the same cells, once per reading
/// direction.
pub fn find_occurrences(grid: &Grid, word: &str) -> Vec<Vec<Position>> {
    let mut found: Vec<Vec<Position>> = Vec::new();
    let first: char = match word.chars().next() {
        Some(c) => c,
        None => return found,
    };

    for start in grid.positions() {
        if grid.get(start) != Some(first) {
            continue;
        }
        for direction in Direction::ALL {
            if let Some(positions) = read_at(grid, word, start, direction) {
                found.push(positions);
            }
        }
    }
    found
}

/// Whether two occurrences cover the same cells, whatever the reading direction.
pub fn same_cells(a: &[Position], b: &[Position]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a == b || a.iter().rev().eq(b.iter())
}

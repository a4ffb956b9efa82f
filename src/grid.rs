/*
grid.rs

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

//! Letter grid, cell positions, and the eight line directions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest grid, reached at level 11.
pub const MAX_GRID_SIZE: usize = 20;

/// Return the size of the square grid for the given level.
///
/// Level 1 gives a 10x10 grid, and the grid grows by one cell per level up to
/// [`MAX_GRID_SIZE`]. Level 0 is treated as level 1.
pub fn grid_size(level: u32) -> usize {
    let level: usize = level.max(1) as usize;
    if level <= 11 { 9 + level } else { MAX_GRID_SIZE }
}

/// Cell coordinate in the grid.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Create a [`Position`] object.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Return the position `distance` steps away in the given direction, or None if the
    /// position would leave a grid of the given size.
    pub fn step(&self, direction: Direction, distance: usize, size: usize) -> Option<Position> {
        let (dr, dc) = direction.delta();
        let row: isize = self.row as isize + dr * distance as isize;
        let col: isize = self.col as isize + dc * distance as isize;
        if row < 0 || col < 0 || row >= size as isize || col >= size as isize {
            None
        } else {
            Some(Position::new(row as usize, col as usize))
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The eight directions a word can follow in the grid.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    West,
    East,
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Direction {
    /// All the directions.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    /// Return the (row, column) step of the direction.
    pub const fn delta(&self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
            Direction::East => (0, 1),
            Direction::NorthWest => (-1, -1),
            Direction::NorthEast => (-1, 1),
            Direction::SouthWest => (1, -1),
            Direction::SouthEast => (1, 1),
        }
    }

    /// Return the direction for the given step, or None if the step is not a unit step along
    /// one of the eight lines.
    pub fn from_delta(dr: isize, dc: isize) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| d.delta() == (dr, dc))
    }

    /// Return the direction that goes from `from` to `to` when both cells are on the same line,
    /// or None otherwise (including when the cells are identical).
    pub fn between(from: Position, to: Position) -> Option<Direction> {
        let dr: isize = to.row as isize - from.row as isize;
        let dc: isize = to.col as isize - from.col as isize;
        if (dr, dc) == (0, 0) {
            return None;
        }
        if dr != 0 && dc != 0 && dr.abs() != dc.abs() {
            return None;
        }
        Direction::from_delta(dr.signum(), dc.signum())
    }

    /// Return the opposite direction.
    pub const fn reverse(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
            Direction::NorthWest => Direction::SouthEast,
            Direction::NorthEast => Direction::SouthWest,
            Direction::SouthWest => Direction::NorthEast,
            Direction::SouthEast => Direction::NorthWest,
        }
    }
}

/// Square matrix of uppercase letters.
///
/// Cells are `None` while the board generator places the words, and are all filled once the
/// generation completes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<char>>,
}

impl Grid {
    /// Create an empty [`Grid`] object of `size` x `size` cells.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Create a [`Grid`] object from rows of letters. All rows must have the same length as the
    /// number of rows.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let size: usize = rows.len();
        let mut grid: Grid = Grid::new(size);
        for (row, line) in rows.iter().enumerate() {
            let letters: Vec<char> = line.chars().collect();
            if letters.len() != size {
                return None;
            }
            for (col, letter) in letters.into_iter().enumerate() {
                grid.set(Position::new(row, col), letter.to_ascii_uppercase());
            }
        }
        Some(grid)
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the position is inside the grid.
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    fn index(&self, pos: Position) -> usize {
        pos.row * self.size + pos.col
    }

    /// Return the letter at the given position, or None if the cell is empty or outside the
    /// grid.
    pub fn get(&self, pos: Position) -> Option<char> {
        if self.contains(pos) {
            self.cells[self.index(pos)]
        } else {
            None
        }
    }

    /// Set the letter of a cell. Positions outside the grid are ignored.
    pub fn set(&mut self, pos: Position, letter: char) {
        if self.contains(pos) {
            let i: usize = self.index(pos);
            self.cells[i] = Some(letter);
        }
    }

    /// Empty a cell.
    pub fn clear_cell(&mut self, pos: Position) {
        if self.contains(pos) {
            let i: usize = self.index(pos);
            self.cells[i] = None;
        }
    }

    /// Whether all the cells have a letter.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Return the letters along the given positions. A position that is empty or outside the
    /// grid ends the word early, so the caller can compare lengths.
    pub fn read(&self, positions: &[Position]) -> String {
        positions.iter().map_while(|p| self.get(*p)).collect()
    }

    /// Iterate over all the positions of the grid, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.size).flat_map(move |row| (0..self.size).map(move |col| Position::new(row, col)))
    }

    /// Return the grid rows as strings. Empty cells are represented by a dot.
    pub fn rows(&self) -> Vec<String> {
        (0..self.size)
            .map(|row| {
                (0..self.size)
                    .map(|col| self.get(Position::new(row, col)).unwrap_or('.'))
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.rows() {
            let spaced: Vec<String> = row.chars().map(String::from).collect();
            writeln!(f, "{}", spaced.join(" "))?;
        }
        Ok(())
    }
}

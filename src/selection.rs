/*
selection.rs

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

//! Track the cells that the player drags over.
//!
//! The tracker is forgiving: when the pointer is not exactly on one of the eight lines from the
//! first cell, the line closest to the pointer is used. The resulting path is only a preview;
//! the path validator decides whether it spells a word.

use crate::grid::{Direction, Position};

/// Gesture state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Selecting,
}

/// [`SelectionTracker`] object.
#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    /// Grid size, used to clip the path.
    size: usize,

    state: SelectionState,

    /// Current path. Empty when idle.
    path: Vec<Position>,
}

impl SelectionTracker {
    /// Create a [`SelectionTracker`] object for a grid of the given size.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            state: SelectionState::Idle,
            path: Vec::with_capacity(size),
        }
    }

    /// Return the gesture state.
    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Return the path being previewed.
    pub fn preview(&self) -> &[Position] {
        &self.path
    }

    /// Whether the cell is part of the preview.
    pub fn contains(&self, pos: Position) -> bool {
        self.path.contains(&pos)
    }

    fn inside(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Start a gesture on the given cell.
    ///
    /// When a gesture is already in progress, it is ended first and its path is returned.
    /// Cells outside the grid are ignored.
    pub fn start(&mut self, pos: Position) -> Option<Vec<Position>> {
        if !self.inside(pos) {
            return None;
        }
        let interrupted: Option<Vec<Position>> = self.end();
        self.path.push(pos);
        self.state = SelectionState::Selecting;
        interrupted
    }

    /// Extend the gesture to the given cell and return whether the preview changed.
    pub fn move_to(&mut self, pos: Position) -> bool {
        if self.state != SelectionState::Selecting || !self.inside(pos) {
            return false;
        }
        let first: Position = match self.path.first() {
            Some(p) => *p,
            None => return false,
        };
        let path: Vec<Position> = line(first, pos, self.size);
        if path == self.path {
            return false;
        }
        self.path = path;
        true
    }

    /// End the gesture and return its path, or None if no gesture is in progress.
    pub fn end(&mut self) -> Option<Vec<Position>> {
        if self.state != SelectionState::Selecting {
            return None;
        }
        self.state = SelectionState::Idle;
        Some(std::mem::take(&mut self.path))
    }

    /// Drop the gesture without returning its path.
    pub fn cancel(&mut self) {
        self.state = SelectionState::Idle;
        self.path.clear();
    }
}

/// Return the direction of the line closest to the (dr, dc) vector.
///
/// Each direction covers an angle of 45 degrees; a component smaller than about 0.41 times the
/// other one is ignored.
fn snap(dr: isize, dc: isize) -> Option<Direction> {
    let (adr, adc) = (dr.abs(), dc.abs());
    if adr == 0 && adc == 0 {
        return None;
    }
    if adc * 12 < adr * 5 {
        Direction::from_delta(dr.signum(), 0)
    } else if adr * 12 < adc * 5 {
        Direction::from_delta(0, dc.signum())
    } else {
        Direction::from_delta(dr.signum(), dc.signum())
    }
}

/// Return the straight path from `from` toward `to`, clipped to the grid.
pub fn line(from: Position, to: Position, size: usize) -> Vec<Position> {
    let dr: isize = to.row as isize - from.row as isize;
    let dc: isize = to.col as isize - from.col as isize;
    let direction: Direction = match snap(dr, dc) {
        Some(d) => d,
        None => return vec![from],
    };
    let steps: usize = dr.unsigned_abs().max(dc.unsigned_abs());

    let mut path: Vec<Position> = Vec::with_capacity(steps + 1);
    path.push(from);
    for i in 1..=steps {
        match from.step(direction, i, size) {
            Some(p) => path.push(p),
            None => break,
        }
    }
    path
}

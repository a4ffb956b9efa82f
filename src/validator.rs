/*
validator.rs

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

//! Decide whether a selected path is one of the hidden words.

use std::collections::HashSet;

use crate::generator::normalize::MIN_WORD_LEN;
use crate::generator::placement::PlacedWord;
use crate::grid::{Direction, Grid, Position};

/// A path that matches a hidden word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Index of the word in the placed word list.
    pub index: usize,

    /// The word.
    pub word: String,

    /// Cells of the word, in reading order, whatever the direction of the selection.
    pub positions: Vec<Position>,
}

/// Whether the path is a straight line of adjacent cells.
pub fn is_straight(path: &[Position]) -> bool {
    let direction: Direction = match path {
        [] | [_] => return true,
        [a, b, ..] => match Direction::between(*a, *b) {
            Some(d) => d,
            None => return false,
        },
    };
    path.windows(2).all(|w| {
        Direction::between(w[0], w[1]) == Some(direction)
            && w[0].row.abs_diff(w[1].row) <= 1
            && w[0].col.abs_diff(w[1].col) <= 1
    })
}

/// Return the word that the path spells, or None.
///
/// The letters of the path must spell a word that is not found yet, forward or backward, and
/// the path must cover exactly the cells where the word was placed. When several words match,
/// the first one in the list wins.
pub fn validate(
    path: &[Position],
    grid: &Grid,
    placed_words: &[PlacedWord],
    found: &HashSet<String>,
) -> Option<Match> {
    if path.len() < MIN_WORD_LEN || !is_straight(path) {
        return None;
    }
    let letters: String = grid.read(path);
    if letters.chars().count() != path.len() {
        return None;
    }
    let reversed: String = letters.chars().rev().collect();

    placed_words
        .iter()
        .enumerate()
        .filter(|(_, p)| !found.contains(&p.word))
        .find(|(_, p)| (p.word == letters || p.word == reversed) && p.matches_path(path))
        .map(|(index, p)| Match {
            index,
            word: p.word.clone(),
            positions: p.positions.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    // S O L X
    // A X X X
    // C A S A
    // X X X X
    fn setup() -> (Grid, Vec<PlacedWord>) {
        let grid: Grid = Grid::from_rows(&["SOLX", "AXXX", "CASA", "XXXX"]).unwrap();
        let placed: Vec<PlacedWord> = vec![
            PlacedWord {
                word: String::from("SOL"),
                positions: vec![p(0, 0), p(0, 1), p(0, 2)],
                direction: Direction::East,
            },
            PlacedWord {
                word: String::from("CASA"),
                positions: vec![p(2, 0), p(2, 1), p(2, 2), p(2, 3)],
                direction: Direction::East,
            },
        ];
        (grid, placed)
    }

    #[test]
    fn forward_and_reverse_selection() {
        let (grid, placed) = setup();
        let found: HashSet<String> = HashSet::new();
        let m: Match = validate(&[p(0, 2), p(0, 1), p(0, 0)], &grid, &placed, &found).unwrap();
        assert_eq!(m.word, "SOL");
        assert_eq!(m.positions, vec![p(0, 0), p(0, 1), p(0, 2)]);
        let m: Match = validate(&[p(2, 0), p(2, 1), p(2, 2), p(2, 3)], &grid, &placed, &found).unwrap();
        assert_eq!(m.index, 1);
    }

    #[test]
    fn coincidental_letters_do_not_match() {
        let (grid, placed) = setup();
        let found: HashSet<String> = HashSet::new();
        // "SAC" read upward in column 0 is not a word, "CAS" is only a prefix
        assert_eq!(validate(&[p(2, 0), p(1, 0), p(0, 0)], &grid, &placed, &found), None);
        assert_eq!(validate(&[p(2, 0), p(2, 1), p(2, 2)], &grid, &placed, &found), None);
    }

    #[test]
    fn found_and_short_paths_are_rejected() {
        let (grid, placed) = setup();
        let mut found: HashSet<String> = HashSet::new();
        found.insert(String::from("SOL"));
        assert_eq!(validate(&[p(0, 0), p(0, 1), p(0, 2)], &grid, &placed, &found), None);
        assert_eq!(validate(&[p(0, 0), p(0, 1)], &grid, &placed, &HashSet::new()), None);
    }

    #[test]
    fn broken_lines_are_rejected() {
        assert!(is_straight(&[p(0, 0), p(1, 1), p(2, 2)]));
        assert!(!is_straight(&[p(0, 0), p(0, 1), p(1, 1)]));
        assert!(!is_straight(&[p(0, 0), p(0, 2), p(0, 4)]));
    }

    #[test]
    fn first_word_in_list_wins() {
        let grid: Grid = Grid::from_rows(&["AMOR", "XXXX", "XXXX", "XXXX"]).unwrap();
        let cells: Vec<Position> = vec![p(0, 0), p(0, 1), p(0, 2), p(0, 3)];
        let placed: Vec<PlacedWord> = vec![
            PlacedWord {
                word: String::from("ROMA"),
                positions: cells.iter().rev().copied().collect(),
                direction: Direction::West,
            },
            PlacedWord {
                word: String::from("AMOR"),
                positions: cells.clone(),
                direction: Direction::East,
            },
        ];
        let mut found: HashSet<String> = HashSet::new();
        let m: Match = validate(&cells, &grid, &placed, &found).unwrap();
        assert_eq!(m.word, "ROMA");
        found.insert(m.word);
        assert_eq!(validate(&cells, &grid, &placed, &found).unwrap().word, "AMOR");
    }
}

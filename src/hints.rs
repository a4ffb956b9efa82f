/*
hints.rs

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

//! Choose the word to reveal when the player asks for a hint.
//!
//! The challenge word is never revealed.

use std::collections::HashSet;

use crate::generator::placement::PlacedWord;
use crate::grid::Position;

/// Result of a hint request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintOutcome {
    /// The cells of the word must be highlighted.
    Revealed {
        word: String,
        positions: Vec<Position>,
    },

    /// The request targets the challenge word, or the challenge word is the only word left.
    Blocked,

    /// The player used all the hints of the level.
    Exhausted,

    /// There is nothing to reveal: the word is unknown or already found, or the level is not
    /// in progress.
    Unavailable,
}

/// Return the hint for the given state of the level.
///
/// When `target` is None, the first word of the list that is not found yet is revealed.
/// A blocked request does not count against the budget, so the caller only has to increment
/// its hint counter on [`HintOutcome::Revealed`].
pub fn request_hint(
    placed_words: &[PlacedWord],
    found: &HashSet<String>,
    challenge: Option<&str>,
    target: Option<&str>,
    hints_used: usize,
    budget: usize,
) -> HintOutcome {
    if let Some(t) = target {
        if challenge == Some(t) {
            return HintOutcome::Blocked;
        }
        if found.contains(t) || !placed_words.iter().any(|p| p.word == t) {
            return HintOutcome::Unavailable;
        }
    }
    if hints_used >= budget {
        return HintOutcome::Exhausted;
    }

    let mut unfound = placed_words.iter().filter(|p| !found.contains(&p.word));
    let chosen: Option<&PlacedWord> = match target {
        Some(t) => unfound.find(|p| p.word == t),
        None => {
            let remaining: Vec<&PlacedWord> = unfound.collect();
            if remaining.is_empty() {
                return HintOutcome::Unavailable;
            }
            match remaining.iter().find(|p| Some(p.word.as_str()) != challenge) {
                Some(p) => Some(*p),
                // Only the challenge word is left
                None => return HintOutcome::Blocked,
            }
        }
    };
    match chosen {
        Some(p) => HintOutcome::Revealed {
            word: p.word.clone(),
            positions: p.positions.clone(),
        },
        None => HintOutcome::Unavailable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction;

    fn placed(word: &str, row: usize) -> PlacedWord {
        PlacedWord {
            word: word.to_string(),
            positions: (0..word.len()).map(|c| Position::new(row, c)).collect(),
            direction: Direction::East,
        }
    }

    fn words() -> Vec<PlacedWord> {
        vec![placed("SOL", 0), placed("GATO", 1), placed("CAVALO", 2)]
    }

    #[test]
    fn first_unfound_word_is_revealed() {
        let mut found: HashSet<String> = HashSet::new();
        found.insert(String::from("SOL"));
        let outcome: HintOutcome = request_hint(&words(), &found, Some("CAVALO"), None, 0, 3);
        assert_eq!(
            outcome,
            HintOutcome::Revealed {
                word: String::from("GATO"),
                positions: placed("GATO", 1).positions,
            }
        );
    }

    #[test]
    fn challenge_word_is_blocked() {
        let found: HashSet<String> = HashSet::new();
        assert_eq!(
            request_hint(&words(), &found, Some("CAVALO"), Some("CAVALO"), 0, 3),
            HintOutcome::Blocked
        );
        // Blocked even when the budget is used up
        assert_eq!(
            request_hint(&words(), &found, Some("CAVALO"), Some("CAVALO"), 3, 3),
            HintOutcome::Blocked
        );
    }

    #[test]
    fn only_the_challenge_word_is_left() {
        let found: HashSet<String> = ["SOL", "GATO"].iter().map(|w| w.to_string()).collect();
        assert_eq!(
            request_hint(&words(), &found, Some("CAVALO"), None, 0, 3),
            HintOutcome::Blocked
        );
    }

    #[test]
    fn budget_and_unknown_targets() {
        let found: HashSet<String> = ["SOL"].iter().map(|w| w.to_string()).collect();
        assert_eq!(
            request_hint(&words(), &found, Some("CAVALO"), None, 3, 3),
            HintOutcome::Exhausted
        );
        assert_eq!(
            request_hint(&words(), &found, Some("CAVALO"), Some("SOL"), 0, 3),
            HintOutcome::Unavailable
        );
        assert_eq!(
            request_hint(&words(), &found, Some("CAVALO"), Some("PATO"), 0, 3),
            HintOutcome::Unavailable
        );
        assert!(matches!(
            request_hint(&words(), &found, Some("CAVALO"), Some("GATO"), 2, 3),
            HintOutcome::Revealed { .. }
        ));
    }

    #[test]
    fn nothing_left_to_reveal() {
        let found: HashSet<String> = ["SOL", "GATO", "CAVALO"].iter().map(|w| w.to_string()).collect();
        assert_eq!(
            request_hint(&words(), &found, Some("CAVALO"), None, 0, 3),
            HintOutcome::Unavailable
        );
    }
}

/*
game.rs

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

//! Manage the status of the level in progress.

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;

use crate::config::EngineConfig;
use crate::events::{EventSink, GameEvent, HintEvent};
use crate::generator::normalize::normalize_word;
use crate::generator::placement::{Board, PlacedWord};
use crate::grid::{Grid, Position};
use crate::hints::{self, HintOutcome};
use crate::scoring::{self, PointsTable};
use crate::selection::SelectionTracker;
use crate::validator::{self, Match};

/// Status of the level.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LevelStatus {
    #[default]
    NotStarted,
    InProgress,
    Paused,
    LevelComplete,
    GameOver,
}

/// How a cell must be drawn.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CellMark {
    Plain,

    /// The cell is part of the selection in progress.
    Selected,

    /// The cell is part of the word revealed by a hint.
    Hinted,

    /// The cell is part of a found word.
    Found,
}

/// A word that the player found.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FoundWord {
    pub word: String,

    /// Cells of the word, in reading order.
    pub positions: Vec<Position>,

    /// Points awarded for the word.
    pub points: u32,

    pub found_at: DateTime<Utc>,
}

/// Snapshot of the level progress.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub current_level: u32,
    pub found_words: Vec<FoundWord>,
    pub hints_used: usize,
    pub level_score: u32,
    pub is_level_completed: bool,
}

/// Result of a pointer event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerResult {
    /// The event was not used: no level in progress, cell out of the grid, or no change.
    Ignored,

    /// The selection preview changed.
    Preview,

    /// The released selection is not a word to find.
    NoMatch,

    /// The released selection is a word to find.
    Found(FoundWord),
}

/// Decide whether the player gets extra time when the time budget is exhausted.
///
/// The host implements the trait, for example to show an advertisement or to spend a game
/// currency before granting the extra time.
pub trait Reviver {
    /// Return the extra time for the level, or None to refuse.
    fn grant(&self, level: u32) -> Option<Duration>;
}

/// [`Reviver`] that never grants extra time.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRevive;

impl Reviver for NoRevive {
    fn grant(&self, _level: u32) -> Option<Duration> {
        None
    }
}

/// Word revealed by a hint.
#[derive(Debug, Clone)]
struct Hint {
    word: String,
    positions: Vec<Position>,
}

/// Manage the status of the level in progress.
pub struct Game {
    board: Board,
    points: PointsTable,
    challenge_bonus: u32,
    hints_per_level: usize,
    level_time: Duration,

    status: LevelStatus,

    /// Gesture in progress.
    selection: SelectionTracker,

    /// Found words, in the order the player found them.
    found_words: Vec<FoundWord>,
    found: HashSet<String>,

    hints_used: usize,
    hint: Option<Hint>,

    /// Whether the player asked for the challenge word as a hint. In that case, there is no
    /// bonus when the level is completed.
    challenge_hinted: bool,

    level_score: u32,

    /// Time left before the level expires.
    remaining: Duration,

    /// Play time, pauses excluded.
    played: Duration,

    events: EventSink,
    reviver: Rc<dyn Reviver>,
}

impl Game {
    /// Create a [`Game`] object for the given board.
    pub fn new(board: Board, config: &EngineConfig, events: EventSink) -> Self {
        let size: usize = board.grid.size();
        Self {
            board,
            points: config.points.clone(),
            challenge_bonus: config.challenge_bonus,
            hints_per_level: config.hints_per_level,
            level_time: config.level_time(),
            status: LevelStatus::NotStarted,
            selection: SelectionTracker::new(size),
            found_words: Vec::new(),
            found: HashSet::new(),
            hints_used: 0,
            hint: None,
            challenge_hinted: false,
            level_score: 0,
            remaining: config.level_time(),
            played: Duration::ZERO,
            events,
            reviver: Rc::new(NoRevive),
        }
    }

    /// Use the given object to decide on extra time.
    pub fn with_reviver(mut self, reviver: Rc<dyn Reviver>) -> Self {
        self.reviver = reviver;
        self
    }

    /// Start the level. Return false if the level was already started.
    pub fn start(&mut self) -> bool {
        if self.status != LevelStatus::NotStarted {
            return false;
        }
        self.status = LevelStatus::InProgress;
        self.remaining = self.level_time;
        info!(
            "Level {} started: {} words, {}s",
            self.board.level,
            self.board.placed_words.len(),
            self.level_time.as_secs()
        );
        true
    }

    /// The player pressed the pointer on a cell.
    ///
    /// Pressing during a gesture ends the previous gesture first, which is then checked like a
    /// release.
    pub fn pointer_down(&mut self, pos: Position) -> PointerResult {
        if self.status != LevelStatus::InProgress || !self.board.grid.contains(pos) {
            return PointerResult::Ignored;
        }
        match self.selection.start(pos) {
            Some(path) => self.submit(&path),
            None => PointerResult::Preview,
        }
    }

    /// The player dragged the pointer over a cell.
    pub fn pointer_move(&mut self, pos: Position) -> PointerResult {
        if self.status == LevelStatus::InProgress && self.selection.move_to(pos) {
            PointerResult::Preview
        } else {
            PointerResult::Ignored
        }
    }

    /// The player released the pointer.
    pub fn pointer_up(&mut self) -> PointerResult {
        if self.status != LevelStatus::InProgress {
            return PointerResult::Ignored;
        }
        match self.selection.end() {
            Some(path) => self.submit(&path),
            None => PointerResult::Ignored,
        }
    }

    /// Drop the gesture in progress without checking it.
    pub fn cancel_selection(&mut self) {
        self.selection.cancel();
    }

    /// Check the path against the words to find.
    fn submit(&mut self, path: &[Position]) -> PointerResult {
        let board: &Board = &self.board;
        let m: Match = match validator::validate(path, &board.grid, &board.placed_words, &self.found) {
            Some(m) => m,
            None => {
                debug!("No word at {:?}", path);
                return PointerResult::NoMatch;
            }
        };

        let points: u32 = scoring::points(&m.word, &self.points);
        let found_word: FoundWord = FoundWord {
            word: m.word.clone(),
            positions: m.positions,
            points,
            found_at: Utc::now(),
        };
        self.found.insert(m.word.clone());
        self.found_words.push(found_word.clone());
        self.level_score = self.level_score.saturating_add(points);
        info!("Found {} for {points} points", m.word);
        self.events.emit(GameEvent::WordFound {
            word: m.word.clone(),
            points,
        });

        if self.hint.as_ref().is_some_and(|h| h.word == m.word) {
            self.hint = None;
        }
        if self.found.len() == self.board.placed_words.len() {
            self.complete();
        }
        PointerResult::Found(found_word)
    }

    /// All the words are found.
    fn complete(&mut self) {
        let challenge_found: bool = self
            .board
            .challenge_word()
            .is_some_and(|c| self.found.contains(&c.word));
        if challenge_found && !self.challenge_hinted && self.challenge_bonus > 0 {
            debug!("Challenge bonus: {}", self.challenge_bonus);
            self.level_score = self.level_score.saturating_add(self.challenge_bonus);
        }
        self.status = LevelStatus::LevelComplete;
        self.selection.cancel();
        self.hint = None;
        info!(
            "Level {} complete in {}s: {} points",
            self.board.level,
            self.played.as_secs(),
            self.level_score
        );
        self.events.emit(GameEvent::LevelComplete {
            total_score: self.level_score,
        });
    }

    /// Ask for a hint. When `target` is None, the engine chooses the word.
    pub fn request_hint(&mut self, target: Option<&str>) -> HintOutcome {
        if self.status != LevelStatus::InProgress {
            return HintOutcome::Unavailable;
        }
        let target: Option<String> = match target {
            Some(t) => match normalize_word(t) {
                Some(w) => Some(w),
                None => return HintOutcome::Unavailable,
            },
            None => None,
        };
        let challenge: Option<&str> = self.board.challenge_word().map(|c| c.word.as_str());
        let outcome: HintOutcome = hints::request_hint(
            &self.board.placed_words,
            &self.found,
            challenge,
            target.as_deref(),
            self.hints_used,
            self.hints_per_level,
        );

        match &outcome {
            HintOutcome::Revealed { word, positions } => {
                self.hints_used += 1;
                self.hint = Some(Hint {
                    word: word.clone(),
                    positions: positions.clone(),
                });
                self.events
                    .emit(GameEvent::HintUsed(HintEvent::Revealed(word.clone())));
            }
            HintOutcome::Blocked => {
                self.challenge_hinted = true;
                self.events.emit(GameEvent::HintUsed(HintEvent::Blocked));
            }
            HintOutcome::Exhausted | HintOutcome::Unavailable => {
                debug!("Hint request {target:?}: {outcome:?}");
            }
        }
        outcome
    }

    /// Remove the hint highlight.
    pub fn clear_hint(&mut self) {
        self.hint = None;
    }

    /// Return the cells of the word revealed by the hint.
    pub fn hint_cells(&self) -> &[Position] {
        match &self.hint {
            Some(h) => &h.positions,
            None => &[],
        }
    }

    /// Return how the cell must be drawn.
    pub fn cell_mark(&self, pos: Position) -> CellMark {
        if self.found_words.iter().any(|f| f.positions.contains(&pos)) {
            CellMark::Found
        } else if self.hint_cells().contains(&pos) {
            CellMark::Hinted
        } else if self.selection.contains(pos) {
            CellMark::Selected
        } else {
            CellMark::Plain
        }
    }

    /// The host timer fired. The time only runs while the level is in progress.
    pub fn tick(&mut self, elapsed: Duration) {
        if self.status != LevelStatus::InProgress {
            return;
        }
        self.played += elapsed;
        self.remaining = self.remaining.saturating_sub(elapsed);
        if self.remaining.is_zero() {
            self.expire();
        }
    }

    /// The time budget is exhausted. The level continues if the reviver grants extra time.
    pub fn expire(&mut self) -> LevelStatus {
        if self.status != LevelStatus::InProgress && self.status != LevelStatus::Paused {
            return self.status;
        }
        if let Some(extra) = self.reviver.grant(self.board.level) {
            info!("Level {}: {}s granted", self.board.level, extra.as_secs());
            self.remaining = extra;
            self.status = LevelStatus::InProgress;
            return self.status;
        }
        self.remaining = Duration::ZERO;
        self.status = LevelStatus::GameOver;
        self.selection.cancel();
        info!("Level {}: time is up", self.board.level);
        self.events.emit(GameEvent::TimeUp);
        self.status
    }

    /// Continue a lost level if the reviver grants extra time. The found words are kept.
    pub fn revive(&mut self) -> bool {
        if self.status != LevelStatus::GameOver {
            return false;
        }
        match self.reviver.grant(self.board.level) {
            Some(extra) => {
                info!("Level {} revived with {}s", self.board.level, extra.as_secs());
                self.remaining = extra;
                self.status = LevelStatus::InProgress;
                true
            }
            None => false,
        }
    }

    /// Pause the level. The selection in progress is dropped.
    pub fn pause(&mut self) {
        if self.status == LevelStatus::InProgress {
            self.selection.cancel();
            self.status = LevelStatus::Paused;
        }
    }

    /// Resume the level.
    pub fn resume(&mut self) {
        if self.status == LevelStatus::Paused {
            self.status = LevelStatus::InProgress;
        }
    }

    pub fn status(&self) -> LevelStatus {
        self.status
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn grid(&self) -> &Grid {
        &self.board.grid
    }

    pub fn level(&self) -> u32 {
        self.board.level
    }

    /// Return the challenge word.
    pub fn challenge_word(&self) -> Option<&PlacedWord> {
        self.board.challenge_word()
    }

    /// Return the selection preview.
    pub fn selection(&self) -> &[Position] {
        self.selection.preview()
    }

    pub fn found_words(&self) -> &[FoundWord] {
        &self.found_words
    }

    /// Whether the word is found.
    pub fn is_found(&self, word: &str) -> bool {
        self.found.contains(word)
    }

    /// Return the words that are not found yet, in list order.
    pub fn remaining_words(&self) -> Vec<&str> {
        self.board
            .placed_words
            .iter()
            .filter(|p| !self.found.contains(&p.word))
            .map(|p| p.word.as_str())
            .collect()
    }

    pub fn hints_used(&self) -> usize {
        self.hints_used
    }

    /// Return the number of hints the player can still use.
    pub fn hints_left(&self) -> usize {
        self.hints_per_level.saturating_sub(self.hints_used)
    }

    pub fn level_score(&self) -> u32 {
        self.level_score
    }

    pub fn is_level_completed(&self) -> bool {
        self.status == LevelStatus::LevelComplete
    }

    /// Return the time left.
    pub fn remaining_time(&self) -> Duration {
        self.remaining
    }

    /// Return the play time in hours, minutes, and seconds.
    pub fn played_hms(&self) -> (u64, u64, u64) {
        let secs: u64 = self.played.as_secs();
        (secs / 3600, (secs % 3600) / 60, secs % 60)
    }

    /// Return a snapshot of the level progress.
    pub fn state(&self) -> GameState {
        GameState {
            current_level: self.board.level,
            found_words: self.found_words.clone(),
            hints_used: self.hints_used,
            level_score: self.level_score,
            is_level_completed: self.is_level_completed(),
        }
    }
}

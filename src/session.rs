/*
session.rs

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

//! Chain the levels of a playing session.
//!
//! A level is loaded in two steps: [`Session::load_level`] asks for the words, and
//! [`Session::poll`], called from the host event loop, builds the board once the words are
//! there.

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::rc::Rc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::config::EngineConfig;
use crate::events::{EventSink, GameEvent};
use crate::game::{Game, LevelStatus, NoRevive, Reviver};
use crate::generator::normalize::DroppedWord;
use crate::generator::placement::{Board, BoardGenerator, GenerationError};
use crate::words::cache::WordCache;
use crate::words::fetch::{WordFetcher, WordSource, WordSupply};
use crate::words::supplier::{WordConstraints, WordSupplier};

/// Number of times the board generation is tried before giving up.
pub const GENERATION_RETRIES: usize = 3;

/// Delay between two polls in [`Session::wait`].
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Result of loading a level.
#[derive(Debug, Clone, PartialEq)]
pub enum LevelLoad {
    /// The level is ready to start.
    Ready {
        level: u32,
        source: WordSource,
        dropped: Vec<DroppedWord>,
    },

    /// No board could be generated.
    Failed(GenerationError),
}

/// [`Session`] object.
pub struct Session {
    config: EngineConfig,
    fetcher: WordFetcher,
    generator: BoardGenerator,
    rng: StdRng,
    events: EventSink,
    reviver: Rc<dyn Reviver>,

    /// Level being played or loaded. 0 before the first level.
    level: u32,
    game: Option<Game>,

    /// Score of the completed levels.
    total_score: u32,

    /// Words of the level being played, and of the level before.
    current_words: Vec<String>,
    previous_words: Vec<String>,
}

impl Session {
    /// Create a [`Session`] object.
    pub fn new(config: EngineConfig, supplier: Arc<dyn WordSupplier>, events: EventSink) -> Self {
        let fetcher: WordFetcher = WordFetcher::new(
            supplier,
            WordCache::new(config.cache_ttl()),
            config.supplier_timeout(),
        )
        .with_events(events.clone());
        let generator: BoardGenerator = BoardGenerator::from_config(&config);
        Self {
            config,
            fetcher,
            generator,
            rng: StdRng::from_os_rng(),
            events,
            reviver: Rc::new(NoRevive),
            level: 0,
            game: None,
            total_score: 0,
            current_words: Vec::new(),
            previous_words: Vec::new(),
        }
    }

    /// Use a seeded random generator, for reproducible boards.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.fetcher.reseed(seed);
        self
    }

    /// Start from the score of a previous session.
    pub fn with_total_score(mut self, total_score: u32) -> Self {
        self.total_score = total_score;
        self
    }

    /// Use the given object to decide on extra time.
    pub fn with_reviver(mut self, reviver: Rc<dyn Reviver>) -> Self {
        self.reviver = reviver;
        self
    }

    /// Use the given word cache.
    pub fn with_cache(mut self, cache: WordCache) -> Self {
        *self.fetcher.cache_mut() = cache;
        self
    }

    /// Drop the current level and ask for the words of the given level.
    /// Return the identifier of the word request.
    pub fn load_level(&mut self, level: u32, now: Instant) -> u64 {
        let level: u32 = level.max(1);
        if level != self.level {
            self.previous_words = std::mem::take(&mut self.current_words);
        }
        self.level = level;
        self.game = None;
        let constraints: WordConstraints = WordConstraints::for_level(level, self.previous_words.clone());
        debug!("Loading level {level}");
        self.fetcher.request(level, constraints, now)
    }

    /// Whether the words of a level are awaited.
    pub fn is_loading(&self) -> bool {
        self.fetcher.is_pending()
    }

    /// Build the board once the words are there. Return None while the words are awaited, or
    /// when no level is being loaded.
    pub fn poll(&mut self, now: Instant) -> Option<LevelLoad> {
        let supply: WordSupply = self.fetcher.poll(now)?;
        Some(self.build(supply))
    }

    /// Wait for the level being loaded.
    pub fn wait(&mut self) -> Option<LevelLoad> {
        while self.fetcher.is_pending() {
            if let Some(load) = self.poll(Instant::now()) {
                return Some(load);
            }
            thread::sleep(POLL_INTERVAL);
        }
        None
    }

    /// Load the level and wait for it.
    pub fn load_level_blocking(&mut self, level: u32) -> LevelLoad {
        self.load_level(level, Instant::now());
        match self.wait() {
            Some(load) => load,
            None => LevelLoad::Failed(GenerationError::NoWords),
        }
    }

    /// Generate the board from the supplied words.
    fn build(&mut self, supply: WordSupply) -> LevelLoad {
        let level: u32 = supply.level;
        let mut error: GenerationError = GenerationError::NoWords;
        for attempt in 1..=GENERATION_RETRIES {
            match self.generator.generate(&supply.words, level, &mut self.rng) {
                Ok(board) => return self.ready(board, supply.source),
                Err(e) => {
                    warn!("Level {level}: generation attempt {attempt} failed: {e}");
                    let retry: bool = matches!(e, GenerationError::TooFewPlaced { .. });
                    error = e;
                    if !retry {
                        break;
                    }
                }
            }
        }
        self.events.emit(GameEvent::GenerationFailed {
            reason: error.to_string(),
        });
        LevelLoad::Failed(error)
    }

    fn ready(&mut self, board: Board, source: WordSource) -> LevelLoad {
        let level: u32 = board.level;
        let dropped: Vec<DroppedWord> = board.dropped_words.clone();
        self.current_words = board.words().into_iter().map(String::from).collect();
        info!(
            "Level {level} ready: {} words from the {source}, {} dropped",
            self.current_words.len(),
            dropped.len()
        );
        self.game = Some(
            Game::new(board, &self.config, self.events.clone()).with_reviver(Rc::clone(&self.reviver)),
        );
        LevelLoad::Ready {
            level,
            source,
            dropped,
        }
    }

    /// Bank the score of the completed level and load the next level.
    /// Return None if the current level is not complete.
    pub fn advance(&mut self, now: Instant) -> Option<u64> {
        let score: u32 = match &self.game {
            Some(g) if g.status() == LevelStatus::LevelComplete => g.level_score(),
            _ => return None,
        };
        self.total_score = self.total_score.saturating_add(score);
        info!("Total score: {}", self.total_score);
        Some(self.load_level(self.level + 1, now))
    }

    /// Load the current level again, with a new board and a fresh state.
    pub fn retry(&mut self, now: Instant) -> u64 {
        self.load_level(self.level, now)
    }

    /// Stop the session and return the total score.
    pub fn exit(&mut self) -> u32 {
        self.fetcher.cancel();
        self.game = None;
        self.level = 0;
        self.current_words.clear();
        self.previous_words.clear();
        info!("Session ended with {} points", self.total_score);
        std::mem::take(&mut self.total_score)
    }

    /// Return the level in progress.
    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    pub fn game_mut(&mut self) -> Option<&mut Game> {
        self.game.as_mut()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Return the score of the completed levels.
    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Return the generator, for its statistics.
    pub fn generator(&self) -> &BoardGenerator {
        &self.generator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::supplier::FixedSupplier;

    fn session(words: &[&str]) -> Session {
        let supplier = FixedSupplier::new(words.iter().map(|s| s.to_string()).collect());
        Session::new(EngineConfig::default(), Arc::new(supplier), EventSink::disabled()).with_seed(7)
    }

    #[test]
    fn level_is_loaded_from_the_supplier() {
        let mut s: Session = session(&["GATO", "CASA", "SOL"]);
        match s.load_level_blocking(1) {
            LevelLoad::Ready { level, source, dropped } => {
                assert_eq!(level, 1);
                assert_eq!(source, WordSource::Supplier);
                assert!(dropped.is_empty());
            }
            l => panic!("unexpected load {l:?}"),
        }
        let game: &Game = s.game().unwrap();
        assert_eq!(game.status(), LevelStatus::NotStarted);
        assert_eq!(game.board().words(), vec!["GATO", "CASA", "SOL"]);
    }

    #[test]
    fn advance_needs_a_complete_level() {
        let mut s: Session = session(&["GATO", "CASA", "SOL"]).with_total_score(100);
        s.load_level_blocking(1);
        assert_eq!(s.advance(Instant::now()), None);
        assert_eq!(s.exit(), 100);
        assert!(s.game().is_none());
        assert_eq!(s.total_score(), 0);
    }

    #[test]
    fn duplicated_supply_words_are_dropped() {
        let mut s: Session = session(&["GATO", "gato", "CASA", "SOL"]);
        match s.load_level_blocking(1) {
            LevelLoad::Ready { source, dropped, .. } => {
                assert_eq!(source, WordSource::Supplier);
                assert_eq!(dropped.len(), 1);
                assert_eq!(dropped[0].word, "gato");
            }
            l => panic!("unexpected load {l:?}"),
        }
        assert_eq!(s.game().unwrap().board().words(), vec!["GATO", "CASA", "SOL"]);
    }

    #[test]
    fn total_score_stops_at_the_maximum() {
        let mut s: Session = session(&["GATO", "CASA", "SOL"]).with_total_score(u32::MAX - 5);
        s.load_level_blocking(1);
        let game: &mut Game = s.game_mut().unwrap();
        game.start();
        let placed = game.board().placed_words.clone();
        for p in placed {
            game.pointer_down(p.positions[0]);
            game.pointer_move(p.positions[p.positions.len() - 1]);
            game.pointer_up();
        }
        assert!(game.is_level_completed());
        assert!(s.advance(Instant::now()).is_some());
        assert_eq!(s.total_score(), u32::MAX);
    }

    #[test]
    fn seeded_sessions_pick_the_same_bundled_words() {
        let load = |seed: u64| {
            let supplier = FixedSupplier::new(Vec::new());
            let mut s: Session =
                Session::new(EngineConfig::default(), Arc::new(supplier), EventSink::disabled()).with_seed(seed);
            assert!(matches!(
                s.load_level_blocking(4),
                LevelLoad::Ready {
                    source: WordSource::Bundled,
                    ..
                }
            ));
            let board: &Board = s.game().unwrap().board();
            (board.words().into_iter().map(String::from).collect::<Vec<String>>(), board.grid.clone())
        };
        assert_eq!(load(21), load(21));
    }

    #[test]
    fn undersized_supply_uses_the_bundled_words() {
        let (sink, receiver) = EventSink::channel();
        let supplier = FixedSupplier::new(vec![String::from("AB"), String::from("12")]);
        let mut s: Session = Session::new(EngineConfig::default(), Arc::new(supplier), sink);
        // The supplier answer is undersized, so the bundled words are used
        assert!(matches!(
            s.load_level_blocking(1),
            LevelLoad::Ready {
                source: WordSource::Bundled,
                ..
            }
        ));
        assert!(matches!(
            receiver.try_recv(),
            Ok(GameEvent::WordSupplyFallback { .. })
        ));
    }

    #[test]
    fn words_too_long_for_the_grid_fail_the_level() {
        let (sink, receiver) = EventSink::channel();
        let words: Vec<String> = ["ABCDEFGHIJKL", "BCDEFGHIJKLM", "CDEFGHIJKLMN"]
            .iter()
            .map(|w| w.to_string())
            .collect();
        let supplier = FixedSupplier::new(words);
        let mut s: Session = Session::new(EngineConfig::default(), Arc::new(supplier), sink);
        assert_eq!(s.load_level_blocking(1), LevelLoad::Failed(GenerationError::NoWords));
        assert!(s.game().is_none());
        assert_eq!(
            receiver.try_recv(),
            Ok(GameEvent::GenerationFailed {
                reason: GenerationError::NoWords.to_string()
            })
        );
    }
}

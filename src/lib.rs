/*
lib.rs

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

//! Word search puzzle engine.
//!
//! The engine hides words in a letter grid, follows the player gestures over the cells, and
//! scores the words that the player finds.
//! A [`Session`] chains the levels: it asks a [`WordSupplier`] for the words of each level and
//! builds a [`Game`] from the generated [`Board`].

pub mod cli_options;
pub mod config;
pub mod difficulty;
pub mod events;
pub mod game;
pub mod generator;
pub mod grid;
pub mod hints;
pub mod scoring;
pub mod selection;
pub mod session;
pub mod validator;
pub mod words;

pub use config::{ConfigError, EngineConfig};
pub use difficulty::Difficulty;
pub use events::{EventSink, GameEvent, HintEvent};
pub use game::{CellMark, FoundWord, Game, GameState, LevelStatus, NoRevive, PointerResult, Reviver};
pub use generator::placement::{Board, BoardGenerator, GenerationError, PlacedWord};
pub use grid::{Direction, Grid, Position};
pub use hints::HintOutcome;
pub use session::{LevelLoad, Session};
pub use words::fetch::{WordFetcher, WordSource, WordSupply};
pub use words::supplier::{SupplyError, WordConstraints, WordSupplier};

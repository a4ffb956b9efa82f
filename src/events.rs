/*
events.rs

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

//! Events sent to the host.
//!
//! The host (session recorder, user interface) receives the events from the
//! [`async_channel::Receiver`] returned by [`EventSink::channel`].
//! The engine never waits for the host: when the receiver is gone, the events are dropped.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::words::fetch::WordSource;

/// Result of a hint request, as reported to the host.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum HintEvent {
    /// The cells of the word are highlighted.
    Revealed(String),

    /// The request was for the challenge word.
    Blocked,
}

/// Facts emitted by the engine.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The player found a word.
    WordFound { word: String, points: u32 },

    /// All the words of the level are found.
    LevelComplete { total_score: u32 },

    /// The time budget is exhausted and no extra time was granted.
    TimeUp,

    /// The player asked for a hint.
    HintUsed(HintEvent),

    /// No board could be built for the level.
    GenerationFailed { reason: String },

    /// The words do not come from the supplier.
    WordSupplyFallback {
        level: u32,
        source: WordSource,
        reason: String,
    },
}

/// Sending side of the event channel.
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    sender: Option<async_channel::Sender<GameEvent>>,
}

impl EventSink {
    /// Create an event channel.
    pub fn channel() -> (Self, async_channel::Receiver<GameEvent>) {
        let (sender, receiver) = async_channel::unbounded::<GameEvent>();
        (
            Self {
                sender: Some(sender),
            },
            receiver,
        )
    }

    /// Create a sink that drops all the events.
    pub fn disabled() -> Self {
        Self { sender: None }
    }

    /// Send an event to the host.
    pub fn emit(&self, event: GameEvent) {
        debug!("Event: {event:?}");
        if let Some(sender) = &self.sender
            && sender.try_send(event).is_err()
        {
            debug!("Event dropped: the receiver is closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_reach_the_receiver() {
        let (sink, receiver) = EventSink::channel();
        sink.emit(GameEvent::TimeUp);
        sink.emit(GameEvent::HintUsed(HintEvent::Blocked));
        assert_eq!(receiver.try_recv(), Ok(GameEvent::TimeUp));
        assert_eq!(receiver.try_recv(), Ok(GameEvent::HintUsed(HintEvent::Blocked)));
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn closed_receiver_is_not_an_error() {
        let (sink, receiver) = EventSink::channel();
        drop(receiver);
        sink.emit(GameEvent::TimeUp);
        EventSink::disabled().emit(GameEvent::TimeUp);
    }
}

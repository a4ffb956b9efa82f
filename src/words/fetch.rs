/*
fetch.rs

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

//! Call the word supplier with a timeout and a fallback chain.
//!
//! [`WordFetcher::request`] starts the supplier call in a worker thread, which sends its answer
//! through an [`async_channel`] channel.
//! The event loop then calls [`WordFetcher::poll`] until it returns the words.
//! Only one request is active: a new request supersedes the previous one, and the answer of a
//! superseded request is ignored when it arrives.

use async_channel::{Receiver, TryRecvError};
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use super::bundled;
use super::cache::WordCache;
use super::supplier::{SupplyError, WordConstraints, WordSupplier};
use crate::events::{EventSink, GameEvent};
use crate::generator::normalize::{MIN_WORD_LEN, normalize_word};
use crate::generator::placement::MIN_LEVEL_WORDS;

/// Delay between two polls in [`WordFetcher::fetch_blocking`].
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Where the words of a level come from.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum WordSource {
    Supplier,
    Cache,
    Bundled,
    Emergency,
}

impl fmt::Display for WordSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WordSource::Supplier => write!(f, "supplier"),
            WordSource::Cache => write!(f, "cache"),
            WordSource::Bundled => write!(f, "bundled list"),
            WordSource::Emergency => write!(f, "emergency list"),
        }
    }
}

/// Words for a level.
#[derive(Debug, Clone, PartialEq)]
pub struct WordSupply {
    /// Level the words are for.
    pub level: u32,

    /// Identifier of the request.
    pub request: u64,

    /// Ordered word list.
    pub words: Vec<String>,

    /// Where the words come from.
    pub source: WordSource,

    /// Why the supplier answer was not used, when [`WordSupply::source`] is not
    /// [`WordSource::Supplier`].
    pub fallback_reason: Option<SupplyError>,
}

/// Answer from the worker thread.
type FetchResult = (u64, Result<Vec<String>, SupplyError>);

/// Request in progress.
struct PendingFetch {
    request: u64,
    level: u32,
    constraints: WordConstraints,
    deadline: Instant,
    receiver: Receiver<FetchResult>,
}

/// [`WordFetcher`] object.
pub struct WordFetcher {
    supplier: Arc<dyn WordSupplier>,
    cache: WordCache,
    timeout: Duration,
    next_request: u64,
    pending: Option<PendingFetch>,
    events: EventSink,

    /// Random generator for picking the bundled words.
    rng: StdRng,
}

impl WordFetcher {
    /// Create the object.
    pub fn new(supplier: Arc<dyn WordSupplier>, cache: WordCache, timeout: Duration) -> Self {
        Self {
            supplier,
            cache,
            timeout,
            next_request: 0,
            pending: None,
            events: EventSink::disabled(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Use a seeded random generator, for reproducible fallbacks.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.reseed(seed);
        self
    }

    /// Restart the random generator from the given seed.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Report the fallbacks to the given sink.
    pub fn with_events(mut self, events: EventSink) -> Self {
        self.events = events;
        self
    }

    /// Return the cache.
    pub fn cache(&self) -> &WordCache {
        &self.cache
    }

    /// Return the cache for modification, to invalidate entries for example.
    pub fn cache_mut(&mut self) -> &mut WordCache {
        &mut self.cache
    }

    /// Whether a request is waiting for an answer.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Return the level of the request in progress.
    pub fn pending_level(&self) -> Option<u32> {
        self.pending.as_ref().map(|p| p.level)
    }

    /// Forget the request in progress. Its answer is ignored.
    pub fn cancel(&mut self) {
        if let Some(p) = self.pending.take() {
            debug!("Request {} for level {} cancelled", p.request, p.level);
        }
    }

    /// Ask the supplier for the words of the level and return the request identifier.
    ///
    /// The request supersedes any request in progress.
    pub fn request(&mut self, level: u32, constraints: WordConstraints, now: Instant) -> u64 {
        self.cancel();
        self.next_request += 1;
        let request: u64 = self.next_request;

        let (sender, receiver) = async_channel::bounded::<FetchResult>(1);
        let supplier: Arc<dyn WordSupplier> = Arc::clone(&self.supplier);
        let worker_constraints: WordConstraints = constraints.clone();
        let spawned = thread::Builder::new()
            .name(format!("word-supplier-{request}"))
            .spawn(move || {
                let res: Result<Vec<String>, SupplyError> =
                    supplier.get_words(level, &worker_constraints);
                if sender.send_blocking((request, res)).is_err() {
                    debug!("Answer for request {request} ignored: the request was superseded");
                }
            });
        if let Err(e) = spawned {
            // The sender is dropped with the closure, so the next poll falls back
            warn!("Cannot start the word supplier thread: {e}");
        }

        debug!("Request {request} for level {level}: {constraints:?}");
        self.pending = Some(PendingFetch {
            request,
            level,
            constraints,
            deadline: now + self.timeout,
            receiver,
        });
        request
    }

    /// Return the words once the supplier answered or the timeout expired, or None while the
    /// request is still in progress (or when there is no request).
    pub fn poll(&mut self, now: Instant) -> Option<WordSupply> {
        let pending: &PendingFetch = self.pending.as_ref()?;
        let outcome: Result<Vec<String>, SupplyError> = match pending.receiver.try_recv() {
            Ok((request, res)) if request == pending.request => res,
            Ok((request, _)) => {
                debug!("Ignoring the answer of request {request}");
                return None;
            }
            Err(TryRecvError::Empty) => {
                if now < pending.deadline {
                    return None;
                }
                Err(SupplyError::Timeout)
            }
            Err(TryRecvError::Closed) => Err(SupplyError::Disconnected),
        };
        let pending: PendingFetch = self.pending.take()?;
        Some(self.resolve(pending, outcome, now))
    }

    /// Request the words and wait for them.
    pub fn fetch_blocking(&mut self, level: u32, constraints: WordConstraints) -> WordSupply {
        self.request(level, constraints, Instant::now());
        loop {
            if let Some(supply) = self.poll(Instant::now()) {
                return supply;
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Use the supplier answer, or go through the fallback chain.
    fn resolve(
        &mut self,
        pending: PendingFetch,
        outcome: Result<Vec<String>, SupplyError>,
        now: Instant,
    ) -> WordSupply {
        let level: u32 = pending.level;
        let reason: SupplyError = match outcome.and_then(check) {
            Ok(words) => {
                info!("Level {level}: {} words from the supplier", words.len());
                self.cache.insert(level, words.clone(), now);
                return WordSupply {
                    level,
                    request: pending.request,
                    words,
                    source: WordSource::Supplier,
                    fallback_reason: None,
                };
            }
            Err(e) => e,
        };

        let (source, words) = match self.cache.get(level, now) {
            Some(words) => (WordSource::Cache, words.to_vec()),
            None => {
                let words: Vec<String> =
                    bundled::pick(level, &pending.constraints, &mut self.rng);
                if words.len() >= MIN_LEVEL_WORDS {
                    (WordSource::Bundled, words)
                } else {
                    (WordSource::Emergency, bundled::emergency_words())
                }
            }
        };
        warn!("Level {level}: {reason}; using the {source}");
        self.events.emit(GameEvent::WordSupplyFallback {
            level,
            source,
            reason: reason.to_string(),
        });
        WordSupply {
            level,
            request: pending.request,
            words,
            source,
            fallback_reason: Some(reason),
        }
    }
}

/// Reject empty or undersized lists. Words that are the same once normalized count once.
fn check(words: Vec<String>) -> Result<Vec<String>, SupplyError> {
    if words.is_empty() {
        return Err(SupplyError::Empty);
    }
    let usable: usize = words
        .iter()
        .filter_map(|w| normalize_word(w))
        .filter(|w| w.len() >= MIN_WORD_LEN)
        .collect::<HashSet<String>>()
        .len();
    if usable < MIN_LEVEL_WORDS {
        return Err(SupplyError::Undersized {
            got: usable,
            needed: MIN_LEVEL_WORDS,
        });
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::supplier::FixedSupplier;

    fn fetcher(words: &[&str]) -> WordFetcher {
        let supplier = FixedSupplier::new(words.iter().map(|s| s.to_string()).collect());
        WordFetcher::new(
            Arc::new(supplier),
            WordCache::new(Duration::from_secs(60)),
            Duration::from_secs(5),
        )
    }

    #[test]
    fn supplier_answer_is_cached() {
        let mut f: WordFetcher = fetcher(&["GATO", "CASA", "SOL"]);
        let supply: WordSupply = f.fetch_blocking(1, WordConstraints::for_level(1, Vec::new()));
        assert_eq!(supply.source, WordSource::Supplier);
        assert_eq!(supply.words, vec!["GATO", "CASA", "SOL"]);
        assert!(f.cache().get(1, Instant::now()).is_some());
        assert!(!f.is_pending());
    }

    #[test]
    fn undersized_answer_falls_back_to_bundled() {
        let (sink, receiver) = EventSink::channel();
        let mut f: WordFetcher = fetcher(&["GATO", "AB"]).with_events(sink);
        let supply: WordSupply = f.fetch_blocking(2, WordConstraints::for_level(2, Vec::new()));
        assert_eq!(supply.source, WordSource::Bundled);
        assert_eq!(
            supply.fallback_reason,
            Some(SupplyError::Undersized { got: 1, needed: 3 })
        );
        assert_eq!(supply.words.len(), 3);
        assert!(matches!(
            receiver.try_recv(),
            Ok(GameEvent::WordSupplyFallback {
                level: 2,
                source: WordSource::Bundled,
                ..
            })
        ));
    }

    #[test]
    fn case_duplicates_count_once() {
        let mut f: WordFetcher = fetcher(&["GATO", "gato", "Gató", "SOL"]);
        let supply: WordSupply = f.fetch_blocking(1, WordConstraints::for_level(1, Vec::new()));
        assert_eq!(supply.source, WordSource::Bundled);
        assert_eq!(
            supply.fallback_reason,
            Some(SupplyError::Undersized { got: 2, needed: 3 })
        );

        let mut f: WordFetcher = fetcher(&["GATO", "gato", "CASA", "SOL"]);
        let supply: WordSupply = f.fetch_blocking(1, WordConstraints::for_level(1, Vec::new()));
        assert_eq!(supply.source, WordSource::Supplier);
    }

    #[test]
    fn seeded_fallback_is_reproducible() {
        let pick = |seed: u64| {
            let mut f: WordFetcher = fetcher(&[]).with_seed(seed);
            f.fetch_blocking(6, WordConstraints::for_level(6, Vec::new())).words
        };
        assert_eq!(pick(3), pick(3));
    }

    #[test]
    fn empty_answer_falls_back_to_cache() {
        let mut f: WordFetcher = fetcher(&[]);
        let now: Instant = Instant::now();
        let cached: Vec<String> = vec![String::from("PATO"), String::from("RATO"), String::from("GATO")];
        f.cache_mut().insert(1, cached.clone(), now);
        let supply: WordSupply = f.fetch_blocking(1, WordConstraints::for_level(1, Vec::new()));
        assert_eq!(supply.source, WordSource::Cache);
        assert_eq!(supply.fallback_reason, Some(SupplyError::Empty));
        assert_eq!(supply.words, cached);
    }

    #[test]
    fn poll_without_request() {
        let mut f: WordFetcher = fetcher(&["GATO", "CASA", "SOL"]);
        assert_eq!(f.poll(Instant::now()), None);
        f.request(1, WordConstraints::for_level(1, Vec::new()), Instant::now());
        assert_eq!(f.pending_level(), Some(1));
        f.cancel();
        assert_eq!(f.poll(Instant::now()), None);
    }
}

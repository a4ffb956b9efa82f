/*
cache.rs

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

//! Cache of the word lists received from the supplier.
//!
//! The current time is passed to each method so that the expiration is under the caller's
//! control.

use log::debug;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Cached list.
#[derive(Debug, Clone)]
struct CacheEntry {
    words: Vec<String>,
    stored_at: Instant,
}

/// Word lists indexed by level.
#[derive(Debug, Clone)]
pub struct WordCache {
    /// How long an entry stays valid.
    ttl: Duration,

    entries: HashMap<u32, CacheEntry>,
}

impl WordCache {
    /// Create a [`WordCache`] object.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Return the entry time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the list for the level, or None if there is no list or if it expired.
    pub fn get(&self, level: u32, now: Instant) -> Option<&[String]> {
        let entry: &CacheEntry = self.entries.get(&level)?;
        if now.saturating_duration_since(entry.stored_at) >= self.ttl {
            debug!("Cached words for level {level} expired");
            return None;
        }
        Some(&entry.words)
    }

    /// Store the list for the level, replacing the previous one.
    pub fn insert(&mut self, level: u32, words: Vec<String>, now: Instant) {
        self.entries.insert(
            level,
            CacheEntry {
                words,
                stored_at: now,
            },
        );
    }

    /// Remove the list of the level.
    pub fn invalidate(&mut self, level: u32) {
        self.entries.remove(&level);
    }

    /// Remove the expired lists.
    pub fn purge_expired(&mut self, now: Instant) {
        let ttl: Duration = self.ttl;
        self.entries
            .retain(|_, e| now.saturating_duration_since(e.stored_at) < ttl);
    }

    /// Remove all the lists.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored lists, including expired ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> Vec<String> {
        vec![String::from("SOL"), String::from("MAR")]
    }

    #[test]
    fn entries_expire() {
        let now: Instant = Instant::now();
        let mut cache: WordCache = WordCache::new(Duration::from_secs(60));
        cache.insert(1, list(), now);
        assert_eq!(cache.get(1, now + Duration::from_secs(59)), Some(list().as_slice()));
        assert_eq!(cache.get(1, now + Duration::from_secs(60)), None);
        assert_eq!(cache.get(2, now), None);

        cache.purge_expired(now + Duration::from_secs(61));
        assert!(cache.is_empty());
    }

    #[test]
    fn invalidate_one_level() {
        let now: Instant = Instant::now();
        let mut cache: WordCache = WordCache::new(Duration::from_secs(60));
        cache.insert(1, list(), now);
        cache.insert(2, list(), now);
        cache.invalidate(1);
        assert_eq!(cache.get(1, now), None);
        assert!(cache.get(2, now).is_some());
        cache.clear();
        assert_eq!(cache.len(), 0);
    }
}

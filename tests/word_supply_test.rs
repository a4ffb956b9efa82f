//! Tests for the word fetcher: timeout, fallbacks, stale answers, and cache.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use cacapalavras::words::cache::WordCache;
use cacapalavras::{SupplyError, WordConstraints, WordFetcher, WordSource, WordSupplier, WordSupply};

/// Supplier that is slow for level 1 only.
struct LevelSupplier;

impl WordSupplier for LevelSupplier {
    fn get_words(&self, level: u32, _constraints: &WordConstraints) -> Result<Vec<String>, SupplyError> {
        if level == 1 {
            thread::sleep(Duration::from_millis(200));
            Ok(vec![String::from("SOL"), String::from("MAR"), String::from("LUA")])
        } else {
            Ok(vec![String::from("GATO"), String::from("CASA"), String::from("PATO")])
        }
    }
}

/// Supplier that always fails.
struct BrokenSupplier;

impl WordSupplier for BrokenSupplier {
    fn get_words(&self, _level: u32, _constraints: &WordConstraints) -> Result<Vec<String>, SupplyError> {
        Err(SupplyError::Unavailable(String::from("no network")))
    }
}

fn wait(fetcher: &mut WordFetcher) -> WordSupply {
    loop {
        if let Some(supply) = fetcher.poll(Instant::now()) {
            return supply;
        }
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn test_superseded_answer_is_ignored() {
    let mut fetcher = WordFetcher::new(
        Arc::new(LevelSupplier),
        WordCache::new(Duration::from_secs(60)),
        Duration::from_secs(5),
    );
    let first: u64 = fetcher.request(1, WordConstraints::for_level(1, Vec::new()), Instant::now());
    let second: u64 = fetcher.request(2, WordConstraints::for_level(2, Vec::new()), Instant::now());
    assert_ne!(first, second);

    let supply: WordSupply = wait(&mut fetcher);
    assert_eq!(supply.request, second);
    assert_eq!(supply.level, 2);
    assert_eq!(supply.words, vec!["GATO", "CASA", "PATO"]);

    // The answer for level 1 arrives later and goes nowhere
    thread::sleep(Duration::from_millis(300));
    assert_eq!(fetcher.poll(Instant::now()), None);
    assert!(fetcher.cache().get(1, Instant::now()).is_none());
}

#[test]
fn test_timeout_is_measured_from_the_request() {
    let mut fetcher = WordFetcher::new(
        Arc::new(LevelSupplier),
        WordCache::new(Duration::from_secs(60)),
        Duration::from_millis(100),
    );
    let start: Instant = Instant::now();
    fetcher.request(1, WordConstraints::for_level(1, Vec::new()), start);
    assert_eq!(fetcher.poll(start + Duration::from_millis(50)), None);
    let supply: WordSupply = fetcher.poll(start + Duration::from_millis(150)).unwrap();
    assert_eq!(supply.source, WordSource::Bundled);
    assert_eq!(supply.fallback_reason, Some(SupplyError::Timeout));
}

#[test]
fn test_failure_uses_the_cached_words_until_they_expire() {
    let mut fetcher = WordFetcher::new(
        Arc::new(BrokenSupplier),
        WordCache::new(Duration::from_secs(10)),
        Duration::from_secs(5),
    );
    let now: Instant = Instant::now();
    let cached: Vec<String> = vec![String::from("FOGO"), String::from("AGUA"), String::from("PEDRA")];
    fetcher.cache_mut().insert(5, cached.clone(), now);

    fetcher.request(5, WordConstraints::for_level(5, Vec::new()), now);
    let supply: WordSupply = wait(&mut fetcher);
    assert_eq!(supply.source, WordSource::Cache);
    assert_eq!(supply.words, cached);
    assert_eq!(
        supply.fallback_reason,
        Some(SupplyError::Unavailable(String::from("no network")))
    );

    // Once the entry expired, the bundled words are used
    let later: Instant = now + Duration::from_secs(11);
    assert!(fetcher.cache().get(5, later).is_none());
    fetcher.request(5, WordConstraints::for_level(5, Vec::new()), later);
    let supply: WordSupply = loop {
        if let Some(s) = fetcher.poll(later) {
            break s;
        }
        thread::sleep(Duration::from_millis(5));
    };
    assert_eq!(supply.source, WordSource::Bundled);
    assert_eq!(supply.words.len(), WordConstraints::for_level(5, Vec::new()).count);
}

#[test]
fn test_cache_invalidation() {
    let mut cache = WordCache::new(Duration::from_secs(60));
    let now: Instant = Instant::now();
    cache.insert(1, vec![String::from("SOL")], now);
    cache.insert(2, vec![String::from("MAR")], now);
    cache.invalidate(1);
    assert!(cache.get(1, now).is_none());
    assert_eq!(cache.get(2, now), Some(&[String::from("MAR")][..]));
    cache.clear();
    assert!(cache.is_empty());
}

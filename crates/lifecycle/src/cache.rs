//! Expiring store for resolved pairs.

use std::{
    collections::HashMap,
    sync::Mutex,
    time::{Duration, Instant},
};

use crate::pair::Pair;

/// Key the handler stores its resolved pairs under.
pub const PAIRS_KEY: &str = "Pairs";

/// Key/value store whose entries expire.
///
/// Supplied to the handler at construction so tests and hosts can bring
/// their own.
pub trait PairCache: Send + Sync {
    /// Entry for `key`, or `None` when absent or expired.
    fn get(&self, key: &str) -> Option<Vec<Pair>>;

    fn insert(&self, key: &str, pairs: Vec<Pair>, ttl: Duration);

    fn remove(&self, key: &str);
}

struct Entry {
    pairs: Vec<Pair>,
    /// `None` when the ttl runs past what `Instant` can represent.
    expires_at: Option<Instant>,
}

/// Process-local [`PairCache`].
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PairCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Vec<Pair>> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if entries.get(key).is_some_and(|e| e.expires_at.is_some_and(|at| at <= Instant::now())) {
            entries.remove(key);
        }
        entries.get(key).map(|e| e.pairs.clone())
    }

    fn insert(&self, key: &str, pairs: Vec<Pair>, ttl: Duration) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), Entry {
            pairs,
            expires_at: Instant::now().checked_add(ttl),
        });
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
    }
}

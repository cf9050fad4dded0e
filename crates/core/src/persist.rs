//! Persistence adapter over a string key-value store.
//!
//! Three blobs are kept, each JSON-encoded under a fixed key:
//!
//! | Key | Value | Default |
//! |-----|-------|---------|
//! | `darkMode` | `true` / `false` | `false` |
//! | `gameStats` | [`AggregateStats`] | zeroed |
//! | `highScores` | [`HighScores`] | empty map |
//!
//! Reads never fail: absent or malformed data yields the default and a
//! warning in the log.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::scoring::{AggregateStats, HighScores};

pub const DARK_MODE_KEY: &str = "darkMode";
pub const STATS_KEY: &str = "gameStats";
pub const HIGH_SCORES_KEY: &str = "highScores";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("invalid store key {0:?}")]
    InvalidKey(String),
}

/// String blob storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-process store, used by tests and when no data dir is available.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// Typed load/save of preferences, stats and records.
#[derive(Debug, Clone, Default)]
pub struct Persistence<S> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load_dark_mode(&self) -> bool {
        self.load_or_default(DARK_MODE_KEY)
    }

    pub fn save_dark_mode(&mut self, enabled: bool) -> Result<(), StoreError> {
        self.save(DARK_MODE_KEY, &enabled)
    }

    pub fn load_stats(&self) -> AggregateStats {
        self.load_or_default(STATS_KEY)
    }

    pub fn save_stats(&mut self, stats: &AggregateStats) -> Result<(), StoreError> {
        self.save(STATS_KEY, stats)
    }

    pub fn load_high_scores(&self) -> HighScores {
        self.load_or_default(HIGH_SCORES_KEY)
    }

    pub fn save_high_scores(&mut self, scores: &HighScores) -> Result<(), StoreError> {
        self.save(HIGH_SCORES_KEY, scores)
    }

    fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let Some(raw) = self.store.get(key) else {
            return T::default();
        };
        match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(key, error = %e, "ignoring malformed persisted value");
                T::default()
            }
        }
    }

    fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(value)?;
        self.store.set(key, &encoded)?;
        tracing::debug!(key, "persisted");
        Ok(())
    }
}

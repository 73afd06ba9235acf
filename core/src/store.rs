use alloc::string::{String, ToString};
use hashbrown::HashMap;

use crate::*;

/// The one key the best score is persisted under.
pub const BEST_SCORE_KEY: &str = "pexeso:best-score";

/// Where the best score outlives a session.
pub trait ScoreStore {
    /// Missing or unusable data loads as `None`.
    fn load(&self) -> Option<MoveCount>;
    fn save(&mut self, score: MoveCount);
}

/// Textual key-value backend, e.g. the browser's local storage.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> core::result::Result<Option<String>, StoreError>;
    fn write(&mut self, key: &str, value: &str) -> core::result::Result<(), StoreError>;
}

/// In-memory backend.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> core::result::Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> core::result::Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Keeps the best score as decimal text under [`BEST_SCORE_KEY`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BestScoreStore<K> {
    backend: K,
}

impl<K: KeyValueStore> BestScoreStore<K> {
    pub fn new(backend: K) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &K {
        &self.backend
    }

    pub fn parse(raw: &str) -> Option<MoveCount> {
        raw.trim().parse().ok()
    }
}

impl<K: KeyValueStore> ScoreStore for BestScoreStore<K> {
    fn load(&self) -> Option<MoveCount> {
        match self.backend.read(BEST_SCORE_KEY) {
            Ok(Some(raw)) => {
                let score = Self::parse(&raw);
                if score.is_none() {
                    log::warn!("Ignoring malformed best score: {:?}", raw);
                }
                score
            }
            Ok(None) => None,
            Err(err) => {
                log::warn!("Could not read best score: {}", err);
                None
            }
        }
    }

    fn save(&mut self, score: MoveCount) {
        if let Err(err) = self.backend.write(BEST_SCORE_KEY, &score.to_string()) {
            log::error!("Could not save best score: {}", err);
        }
    }
}

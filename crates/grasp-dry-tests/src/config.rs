// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory config store fake for testing without filesystem I/O.

use grasp_app_core::config::{ConfigError, ConfigStore};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// In-memory [`ConfigStore`] that records how it was used.
///
/// Clones share state, so a test can hand one clone to a
/// [`ConfigService`](grasp_app_core::config::ConfigService) and inspect the
/// other.
///
/// ```
/// use grasp_app_core::config::ConfigService;
/// use grasp_dry_tests::InMemoryConfigStore;
///
/// let store = InMemoryConfigStore::new();
/// let service = ConfigService::new(store.clone());
/// service.save("transformer", &serde_json::json!({ "kind": "free" })).unwrap();
/// assert_eq!(store.saves(), 1);
/// assert!(store.contains_key("transformer"));
/// ```
#[derive(Clone, Default)]
pub struct InMemoryConfigStore {
    state: Arc<Mutex<StoreState>>,
}

#[derive(Default)]
struct StoreState {
    blobs: BTreeMap<String, Vec<u8>>,
    loads: usize,
    saves: usize,
    fail_loads: bool,
    fail_saves: bool,
}

impl InMemoryConfigStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding one pre-seeded blob.
    pub fn with_blob(key: &str, data: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        store.state().blobs.insert(key.to_owned(), data.into());
        store
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Make every subsequent `load_raw` fail with [`ConfigError::Other`].
    pub fn fail_loads(&self, fail: bool) {
        self.state().fail_loads = fail;
    }

    /// Make every subsequent `save_raw` fail with [`ConfigError::Other`].
    pub fn fail_saves(&self, fail: bool) {
        self.state().fail_saves = fail;
    }

    /// `load_raw` calls attempted, including failed ones.
    pub fn loads(&self) -> usize {
        self.state().loads
    }

    /// `save_raw` calls attempted, including failed ones.
    pub fn saves(&self) -> usize {
        self.state().saves
    }

    /// Stored keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.state().blobs.keys().cloned().collect()
    }

    /// Whether `key` holds a blob.
    pub fn contains_key(&self, key: &str) -> bool {
        self.state().blobs.contains_key(key)
    }

    /// Raw blob for `key`, bypassing the counters.
    pub fn blob(&self, key: &str) -> Option<Vec<u8>> {
        self.state().blobs.get(key).cloned()
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        let mut state = self.state();
        state.loads += 1;
        if state.fail_loads {
            return Err(ConfigError::Other("simulated load failure".into()));
        }
        state.blobs.get(key).cloned().ok_or(ConfigError::NotFound)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let mut state = self.state();
        state.saves += 1;
        if state.fail_saves {
            return Err(ConfigError::Other("simulated save failure".into()));
        }
        state.blobs.insert(key.to_owned(), data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_counts_both() {
        let store = InMemoryConfigStore::new();
        store.save_raw("k", b"v").unwrap();
        assert_eq!(store.load_raw("k").unwrap(), b"v");
        assert_eq!((store.saves(), store.loads()), (1, 1));
    }

    #[test]
    fn missing_key_is_not_found() {
        let store = InMemoryConfigStore::new();
        assert!(matches!(store.load_raw("k"), Err(ConfigError::NotFound)));
    }

    #[test]
    fn failed_calls_still_count_and_store_nothing() {
        let store = InMemoryConfigStore::new();
        store.fail_saves(true);
        store.fail_loads(true);
        assert!(matches!(store.save_raw("k", b"v"), Err(ConfigError::Other(_))));
        assert!(matches!(store.load_raw("k"), Err(ConfigError::Other(_))));
        assert_eq!((store.saves(), store.loads()), (1, 1));
        assert!(store.keys().is_empty());
    }

    #[test]
    fn clones_share_state() {
        let a = InMemoryConfigStore::with_blob("seed", "x");
        let b = a.clone();
        b.save_raw("other", b"y").unwrap();
        assert_eq!(a.keys(), vec!["other".to_owned(), "seed".to_owned()]);
        assert_eq!(a.blob("seed").as_deref(), Some(&b"x"[..]));
        assert_eq!(a.saves(), 1);
    }
}

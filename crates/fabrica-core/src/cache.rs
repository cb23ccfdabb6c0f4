//! # Shared Cache
//!
//! The shared key-value resource guarded by the process-wide singleton.
//!
//! All operations go through one shared mapping instance, not per-call
//! state. Concurrent `set`/`get`/`clear` calls are serialized by a mutex;
//! there is no atomicity across multiple calls (no multi-key
//! transactions).

use crate::SingletonCell;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

// =============================================================================
// SHARED CACHE
// =============================================================================

/// A small shared key-value cache.
///
/// Methods take `&self`; the cache is meant to be shared behind an `Arc`
/// handed out by [`shared_cache`]. The mapping is a `BTreeMap` so
/// `entries()` snapshots are deterministically ordered.
#[derive(Debug, Default)]
pub struct SharedCache {
    entries: Mutex<BTreeMap<String, String>>,
}

impl SharedCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value under a key, replacing any previous value.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.lock_entries().insert(key.into(), value.into());
    }

    /// The last value stored under the key, or `None` if absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.lock_entries().get(key).cloned()
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.lock_entries().clear();
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock_entries().is_empty()
    }

    /// Snapshot of all entries in key order.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, String)> {
        self.lock_entries()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    // The map cannot be left logically torn by a panicking writer; recover
    // the inner value on poison.
    fn lock_entries(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// PROCESS-WIDE ACCESSOR
// =============================================================================

static CACHE: SingletonCell<SharedCache> = SingletonCell::new();

/// The process-wide shared cache instance.
///
/// First call constructs the cache; every call returns the identical
/// instance. All returned handles operate on the same underlying mapping.
#[must_use]
pub fn shared_cache() -> Arc<SharedCache> {
    CACHE.get_or_init(SharedCache::new)
}

// =============================================================================
// TESTS
// =============================================================================

//! In-memory store.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{KeyValueStore, StoreError, check_quota};

/// An in-memory [`KeyValueStore`].
///
/// Clones share the same entries, so two carts built over clones of one
/// `MemoryStore` behave like two browser tabs over the same origin.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    entries: BTreeMap<String, String>,
    quota: Option<usize>,
    disabled: bool,
}

impl MemoryStore {
    /// Create an empty store with no size limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that rejects writes beyond `bytes` in total.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        let store = Self::new();
        store.lock_or_recover().quota = Some(bytes);
        store
    }

    /// Seed a value without going through quota or disabled checks.
    #[must_use]
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.lock_or_recover()
            .entries
            .insert(key.to_owned(), value.to_owned());
        self
    }

    /// Make every subsequent read and write fail, as when storage is blocked.
    pub fn set_disabled(&self, disabled: bool) {
        self.lock_or_recover().disabled = disabled;
    }

    fn lock_or_recover(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        let inner = self.lock_or_recover();
        if inner.disabled {
            return Err(StoreError::Unavailable("storage is disabled".to_string()));
        }
        Ok(inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        check_quota(&inner.entries, key, value, inner.quota)?;
        inner.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.lock()?.entries.remove(key);
        Ok(())
    }
}

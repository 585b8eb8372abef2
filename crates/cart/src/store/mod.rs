//! Durable key-value storage.
//!
//! The cart persists through a small string-keyed, string-valued capability
//! modelled on browser local storage: whole values are read and replaced,
//! with no transactions and no schema. Two implementations are provided:
//!
//! - [`MemoryStore`] - in-process map, shared between clones; used in tests
//!   and to simulate quota and disabled-storage failures
//! - [`FileStore`] - a JSON document on disk that survives restarts

mod error;
mod file;
mod memory;

use std::collections::BTreeMap;
use std::sync::Arc;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "canteen_cart";

/// A string-keyed, string-valued durable store.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write is rejected. A rejected write leaves the
    /// previous value in place.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete the value stored under `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// Bytes used by a set of entries, counting keys and values.
fn used_bytes(entries: &BTreeMap<String, String>) -> usize {
    entries.iter().map(|(k, v)| k.len() + v.len()).sum()
}

/// Check that replacing `key` with `value` keeps `entries` within `quota`.
fn check_quota(
    entries: &BTreeMap<String, String>,
    key: &str,
    value: &str,
    quota: Option<usize>,
) -> Result<(), StoreError> {
    let Some(limit) = quota else {
        return Ok(());
    };
    let current = entries.get(key).map_or(0, |old| key.len() + old.len());
    let needed = used_bytes(entries) - current + key.len() + value.len();
    if needed > limit {
        return Err(StoreError::QuotaExceeded { needed, limit });
    }
    Ok(())
}

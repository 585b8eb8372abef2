//! Storage errors.

use thiserror::Error;

/// Errors raised by a [`super::KeyValueStore`].
///
/// The cart engine never surfaces these to its consumers; they are logged and
/// the in-memory cart stays authoritative.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The write would take the store over its size limit.
    #[error("storage quota exceeded: {needed} bytes needed, {limit} allowed")]
    QuotaExceeded {
        /// Bytes the store would hold after the write.
        needed: usize,
        /// Maximum bytes the store may hold.
        limit: usize,
    },

    /// Storage is disabled or otherwise unreachable.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Underlying file I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file exists but is not a valid key-value document.
    #[error("storage file is corrupt: {0}")]
    Corrupt(String),
}

//! Integration tests for Canteen.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p canteen-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart reloads, corrupt storage, and storage failures
//!   against both the in-memory and the file-backed store
//! - `role_routing` - Display role and landing page resolution

use std::path::PathBuf;

/// A fresh storage file path under the OS temp directory.
///
/// The parent directory is unique per call and is not created.
#[must_use]
pub fn temp_store_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("canteen-it-{}", uuid::Uuid::new_v4()))
        .join("storage.json")
}

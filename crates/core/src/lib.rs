//! Canteen Core - Shared domain types.
//!
//! This crate provides common types used across all Canteen components:
//! - `cart` - Persisted order cart engine backing student ordering and POS screens
//! - `cli` - Terminal front end for the cart and role routing
//!
//! # Architecture
//!
//! The core crate contains only types and pure policy - no I/O, no storage,
//! no logging. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for item IDs, prices, quantities, and roles
//! - [`routing`] - Role priority and landing path resolution

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod routing;
pub mod types;

pub use types::*;

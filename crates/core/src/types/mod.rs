//! Core types for Canteen.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod quantity;
pub mod role;

pub use id::{ItemId, ItemIdError};
pub use price::{Price, PriceError};
pub use quantity::Quantity;
pub use role::Role;

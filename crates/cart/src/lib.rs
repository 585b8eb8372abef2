//! Canteen Cart - Persisted order cart.
//!
//! The cart backs checkout on both the student ordering screens and the
//! point-of-sale counter. It is a small, mergeable collection of line items
//! that survives reloads by writing itself to a durable key-value store after
//! every change.
//!
//! # Guarantees
//!
//! - Each item id appears on at most one line; adding an item again merges
//!   into its existing line.
//! - Every quantity is a whole number of at least one.
//! - `item_count` and `subtotal` are always derived from the current lines.
//! - The stored value always decodes back to the in-memory cart. A failed
//!   write is logged, never surfaced, and leaves the previous value alone.
//!
//! # Example
//!
//! ```
//! use canteen_cart::{Cart, CartItem, MemoryStore};
//!
//! let mut cart = Cart::load(MemoryStore::new());
//! cart.add_item(CartItem::parse("a", "Rice", "4.5").unwrap());
//! cart.add_item_with_quantity(CartItem::parse("a", "Rice", "4.5").unwrap(), 2);
//!
//! assert_eq!(cart.item_count(), 3);
//! assert_eq!(cart.subtotal().display(), "$13.50");
//! ```
//!
//! # Modules
//!
//! - [`engine`] - The [`Cart`] itself
//! - [`item`] - Catalog items and cart lines
//! - [`snapshot`] - Immutable views published to observers
//! - [`codec`] - Stored JSON representation
//! - [`store`] - Key-value storage capability and implementations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod codec;
pub mod engine;
pub mod item;
pub mod snapshot;
pub mod store;

pub use engine::Cart;
pub use item::{CartItem, CartItemError, CartLine};
pub use snapshot::CartSnapshot;
pub use store::{CART_STORAGE_KEY, FileStore, KeyValueStore, MemoryStore, StoreError};

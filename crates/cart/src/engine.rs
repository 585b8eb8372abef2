//! The cart engine.
//!
//! [`Cart`] is the single owner and sole mutator of the order cart for one
//! browser context (or one terminal session). Every mutation is applied in
//! memory, written through to the [`KeyValueStore`], and published to
//! observers, in that order.
//!
//! Nothing here returns an error to the caller. Storage failures are logged
//! and the in-memory cart remains authoritative; the next mutation writes the
//! full cart again. Quantities are normalized rather than rejected, and
//! operations on ids that are not in the cart do nothing.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use canteen_core::{Price, Quantity};

use crate::codec;
use crate::item::{CartItem, CartLine};
use crate::snapshot::{self, CartSnapshot};
use crate::store::{CART_STORAGE_KEY, KeyValueStore};

/// A persisted, mergeable order cart.
///
/// Lines are kept in insertion order and no two lines share an item id.
/// Totals are derived from the lines on every read.
#[derive(Debug)]
pub struct Cart<S: KeyValueStore> {
    lines: Arc<Vec<CartLine>>,
    store: S,
    observers: watch::Sender<CartSnapshot>,
}

impl<S: KeyValueStore> Cart<S> {
    /// Load the cart from `store`.
    ///
    /// An absent value gives an empty cart. An unreadable value also gives an
    /// empty cart and is removed from the store; a store that cannot be read
    /// gives an empty cart and is left alone. Malformed records are
    /// dropped individually, and duplicate ids are merged into their first
    /// occurrence.
    #[instrument(skip_all)]
    pub fn load(store: S) -> Self {
        let lines = match store.get(CART_STORAGE_KEY) {
            Ok(Some(raw)) => match codec::decode(&raw) {
                Ok(decoded) => {
                    info!(
                        lines = decoded.lines.len(),
                        dropped = decoded.dropped,
                        merged = decoded.merged,
                        "Loaded stored cart"
                    );
                    decoded.lines
                }
                Err(e) => {
                    warn!(error = %e, "Discarding unreadable stored cart");
                    if let Err(e) = store.remove(CART_STORAGE_KEY) {
                        warn!(error = %e, "Failed to remove unreadable stored cart");
                    }
                    Vec::new()
                }
            },
            Ok(None) => {
                debug!("No stored cart, starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "Failed to read stored cart, starting empty");
                Vec::new()
            }
        };

        let lines = Arc::new(lines);
        let (observers, _) = watch::channel(CartSnapshot::new(Arc::clone(&lines)));
        Self {
            lines,
            store,
            observers,
        }
    }

    /// Add one unit of `item`.
    pub fn add_item(&mut self, item: CartItem) {
        self.add_item_with_quantity(item, Quantity::ONE);
    }

    /// Add `quantity` units of `item`.
    ///
    /// The quantity is floored and clamped to at least one. If a line for the
    /// item already exists its quantity is increased; the stored name, price
    /// and other display fields are left as they were. Otherwise a new line is
    /// appended.
    ///
    /// A line holds at most `u32::MAX` units. Adding past that leaves the line
    /// at `u32::MAX` and logs a warning.
    pub fn add_item_with_quantity(&mut self, item: CartItem, quantity: impl Into<Quantity>) {
        let quantity = quantity.into();
        let existing = self.position(item.id().as_str());
        let lines = Arc::make_mut(&mut self.lines);

        match existing.and_then(|index| lines.get_mut(index)) {
            Some(line) => {
                line.merge(quantity);
                debug!(item_id = %item.id(), added = %quantity, total = %line.quantity(), "Merged into cart line");
            }
            None => {
                debug!(item_id = %item.id(), %quantity, "Appended cart line");
                lines.push(CartLine::new(item, quantity));
            }
        }

        self.commit();
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let Some(index) = self.position(id) else {
            debug!(item_id = id, "Remove ignored, item not in cart");
            return false;
        };

        Arc::make_mut(&mut self.lines).remove(index);
        debug!(item_id = id, "Removed cart line");
        self.commit();
        true
    }

    /// Set the quantity of the line for `id`. Returns whether a line exists.
    ///
    /// The quantity is floored and clamped to at least one, so this never
    /// removes a line; call [`Cart::remove_item`] for that.
    pub fn set_quantity(&mut self, id: &str, quantity: impl Into<Quantity>) -> bool {
        let quantity = quantity.into();
        let Some(index) = self.position(id) else {
            debug!(item_id = id, "Quantity change ignored, item not in cart");
            return false;
        };

        if let Some(line) = Arc::make_mut(&mut self.lines).get_mut(index) {
            line.set_quantity(quantity);
        }
        debug!(item_id = id, %quantity, "Set cart line quantity");
        self.commit();
        true
    }

    /// Empty the cart, e.g. after a confirmed payment.
    pub fn clear(&mut self) {
        self.lines = Arc::new(Vec::new());
        debug!("Cleared cart");
        self.commit();
    }

    /// Current lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a line by item id.
    #[must_use]
    pub fn line(&self, id: &str) -> Option<&CartLine> {
        snapshot::find_line(&self.lines, id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        snapshot::item_count(&self.lines)
    }

    /// Sum of `price × quantity` across all lines.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        snapshot::subtotal(&self.lines)
    }

    /// An immutable view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::new(Arc::clone(&self.lines))
    }

    /// Subscribe to cart changes.
    ///
    /// The receiver always holds the latest state. A slow observer may skip
    /// intermediate states but never sees a stale one after catching up.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.observers.subscribe()
    }

    /// The backing store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consume the cart and return its backing store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.id().as_str() == id)
    }

    fn commit(&self) {
        self.persist();
        self.observers.send_replace(self.snapshot());
    }

    fn persist(&self) {
        let raw = match codec::encode(&self.lines) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Failed to encode cart, keeping previous stored value");
                return;
            }
        };
        if let Err(e) = self.store.set(CART_STORAGE_KEY, &raw) {
            warn!(error = %e, "Failed to persist cart, continuing in memory");
        }
    }
}

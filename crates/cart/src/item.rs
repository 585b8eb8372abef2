//! Catalog items and cart lines.

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use canteen_core::{ItemId, ItemIdError, Price, PriceError, Quantity};

/// Errors that can occur when building a [`CartItem`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartItemError {
    #[error("invalid item id: {0}")]
    Id(#[from] ItemIdError),
    #[error("item name cannot be empty")]
    EmptyName,
    #[error("invalid price: {0}")]
    Price(#[from] PriceError),
}

/// A purchasable item as imported from the menu catalog.
///
/// Fields are private so that every `CartItem` in existence has a non-empty
/// id and name and a bounded non-negative price, which is exactly what the stored
/// encoding requires to load it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItem {
    id: ItemId,
    name: String,
    price: Price,
    image: Option<String>,
    description: Option<String>,
}

impl CartItem {
    /// Create an item with no image or description.
    ///
    /// # Errors
    ///
    /// Returns [`CartItemError::EmptyName`] if `name` is empty.
    pub fn new(id: ItemId, name: impl Into<String>, price: Price) -> Result<Self, CartItemError> {
        let name = name.into();
        if name.is_empty() {
            return Err(CartItemError::EmptyName);
        }
        Ok(Self {
            id,
            name,
            price,
            image: None,
            description: None,
        })
    }

    /// Parse an item from raw strings, as submitted by a form.
    ///
    /// # Errors
    ///
    /// Returns an error if the id or name is empty or the price is not a
    /// non-negative decimal.
    pub fn parse(id: &str, name: &str, price: &str) -> Result<Self, CartItemError> {
        Self::new(ItemId::parse(id)?, name, Price::parse(price)?)
    }

    /// Attach an image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn id(&self) -> &ItemId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// A cart line: an item together with how many of it are being ordered.
///
/// Lines are immutable snapshots. Changing a quantity goes through
/// [`crate::Cart`], which replaces the line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    #[serde(flatten)]
    item: CartItem,
    quantity: Quantity,
}

impl CartLine {
    /// Create a line for `item`.
    #[must_use]
    pub const fn new(item: CartItem, quantity: Quantity) -> Self {
        Self { item, quantity }
    }

    #[must_use]
    pub const fn item(&self) -> &CartItem {
        &self.item
    }

    #[must_use]
    pub const fn id(&self) -> &ItemId {
        self.item.id()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.item.name()
    }

    #[must_use]
    pub const fn price(&self) -> Price {
        self.item.price()
    }

    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.item.image()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.item.description()
    }

    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// `price × quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.item.price() * self.quantity
    }

    pub(crate) const fn set_quantity(&mut self, quantity: Quantity) {
        self.quantity = quantity;
    }

    /// Merge more of the same item into this line. Display fields are kept.
    ///
    /// The quantity stops at `u32::MAX`; a merge past it is logged.
    pub(crate) fn merge(&mut self, quantity: Quantity) {
        if self.quantity.get().checked_add(quantity.get()).is_none() {
            warn!(
                item_id = %self.id(),
                current = %self.quantity,
                added = %quantity,
                "Line quantity capped at maximum"
            );
        }
        self.quantity = self.quantity.saturating_add(quantity);
    }
}

//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! canteen cart show
//!
//! # Add two portions of rice
//! canteen cart add --id rice --name "Rice" --price 4.50 --quantity 2
//!
//! # Change or remove a line
//! canteen cart set rice 3
//! canteen cart remove rice
//!
//! # Print a receipt and empty the cart
//! canteen cart checkout
//! ```
//!
//! Every command loads the cart from the store, applies at most one change,
//! and renders the result. The store is written by the cart itself.

use canteen_cart::{Cart, CartItem, CartLine, CartSnapshot, KeyValueStore};

use super::CommandError;

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        let item = line.item();
        Self {
            id: item.id().to_string(),
            name: item.name().to_string(),
            quantity: line.quantity().get(),
            price: item.price().display(),
            line_price: line.line_total().display(),
        }
    }
}

impl From<&CartSnapshot> for CartView {
    fn from(cart: &CartSnapshot) -> Self {
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            subtotal: cart.subtotal().display(),
            item_count: cart.item_count(),
        }
    }
}

impl CartView {
    /// Render as a plain-text table.
    #[must_use]
    pub fn render(&self) -> String {
        if self.items.is_empty() {
            return "Cart is empty\n".to_string();
        }

        let mut out = String::new();
        for item in &self.items {
            out.push_str(&format!(
                "{:>4} x {:<24} {:>10} {:>10}  [{}]\n",
                item.quantity, item.name, item.price, item.line_price, item.id
            ));
        }
        let unit = if self.item_count == 1 { "item" } else { "items" };
        out.push_str(&format!(
            "{} {unit}, subtotal {}\n",
            self.item_count, self.subtotal
        ));
        out
    }
}

/// Fields of a catalog item entered on the command line.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub id: String,
    pub name: String,
    pub price: String,
    pub image: Option<String>,
    pub description: Option<String>,
}

impl TryFrom<NewItem> for CartItem {
    type Error = CommandError;

    fn try_from(new: NewItem) -> Result<Self, Self::Error> {
        let mut item = Self::parse(&new.id, &new.name, &new.price)?;
        if let Some(image) = new.image {
            item = item.with_image(image);
        }
        if let Some(description) = new.description {
            item = item.with_description(description);
        }
        Ok(item)
    }
}

/// Render the cart, as text or as JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn show<S: KeyValueStore>(cart: &Cart<S>, json: bool) -> Result<String, CommandError> {
    let snapshot = cart.snapshot();
    if json {
        let mut out = serde_json::to_string_pretty(&snapshot)?;
        out.push('\n');
        return Ok(out);
    }
    Ok(CartView::from(&snapshot).render())
}

/// Add an item. Fractional quantities are floored; anything below one adds one.
///
/// # Errors
///
/// Returns an error if the item fields are invalid.
pub fn add<S: KeyValueStore>(
    cart: &mut Cart<S>,
    item: NewItem,
    quantity: f64,
) -> Result<String, CommandError> {
    let item = CartItem::try_from(item)?;
    tracing::info!(item_id = %item.id(), quantity, "Adding item to cart");
    cart.add_item_with_quantity(item, quantity);
    Ok(CartView::from(&cart.snapshot()).render())
}

/// Remove a line. Removing an item that is not in the cart is not an error.
pub fn remove<S: KeyValueStore>(cart: &mut Cart<S>, id: &str) -> String {
    if !cart.remove_item(id) {
        tracing::info!(item_id = id, "Item not in cart");
    }
    CartView::from(&cart.snapshot()).render()
}

/// Set a line's quantity. Values below one set it to one.
pub fn set<S: KeyValueStore>(cart: &mut Cart<S>, id: &str, quantity: f64) -> String {
    if !cart.set_quantity(id, quantity) {
        tracing::info!(item_id = id, "Item not in cart");
    }
    CartView::from(&cart.snapshot()).render()
}

/// Empty the cart.
pub fn clear<S: KeyValueStore>(cart: &mut Cart<S>) -> String {
    cart.clear();
    CartView::from(&cart.snapshot()).render()
}

/// Print a receipt for the current cart and empty it.
///
/// This stands in for the payment confirmation signal: once the order is
/// confirmed the cart is cleared.
pub fn checkout<S: KeyValueStore>(cart: &mut Cart<S>) -> String {
    let snapshot = cart.snapshot();
    if snapshot.is_empty() {
        return "Nothing to check out\n".to_string();
    }

    let view = CartView::from(&snapshot);
    cart.clear();
    tracing::info!(
        items = view.item_count,
        subtotal = %view.subtotal,
        "Order confirmed, cart cleared"
    );
    format!("Order confirmed\n{}", view.render())
}

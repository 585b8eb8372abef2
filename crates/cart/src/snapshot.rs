//! Read-only views of the cart.

use std::sync::Arc;

use serde::Serialize;

use canteen_core::Price;

use crate::item::CartLine;

/// An immutable view of the cart at one point in time.
///
/// Snapshots share their line storage with the cart until the next mutation,
/// so publishing one to every observer is cheap. Totals are always derived
/// from the lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartSnapshot {
    lines: Arc<Vec<CartLine>>,
}

impl CartSnapshot {
    pub(crate) const fn new(lines: Arc<Vec<CartLine>>) -> Self {
        Self { lines }
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a line by item id.
    #[must_use]
    pub fn line(&self, id: &str) -> Option<&CartLine> {
        find_line(&self.lines, id)
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
        item_count(&self.lines)
    }

    /// Sum of `price × quantity` across all lines.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        subtotal(&self.lines)
    }
}

impl Serialize for CartSnapshot {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct View<'a> {
            lines: &'a [CartLine],
            item_count: u64,
            subtotal: Price,
        }

        View {
            lines: self.lines(),
            item_count: self.item_count(),
            subtotal: self.subtotal(),
        }
        .serialize(serializer)
    }
}

pub(crate) fn find_line<'a>(lines: &'a [CartLine], id: &str) -> Option<&'a CartLine> {
    lines.iter().find(|line| line.id().as_str() == id)
}

pub(crate) fn item_count(lines: &[CartLine]) -> u64 {
    lines.iter().map(|line| u64::from(line.quantity().get())).sum()
}

pub(crate) fn subtotal(lines: &[CartLine]) -> Price {
    lines.iter().map(CartLine::line_total).sum()
}

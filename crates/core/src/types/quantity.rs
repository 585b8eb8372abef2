//! Line-item quantities.
//!
//! Quantities are normalized at the boundary instead of rejected: any numeric
//! input is floored and clamped to a minimum of one. A [`Quantity`] therefore
//! always holds a positive integer, and there is no way to construct a zero.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A positive integer quantity (always `>= 1`).
///
/// ```
/// use canteen_core::Quantity;
///
/// assert_eq!(Quantity::coerce(2.7).get(), 2);
/// assert_eq!(Quantity::coerce(0.0).get(), 1);
/// assert_eq!(Quantity::coerce(-5.0).get(), 1);
/// assert_eq!(Quantity::from(3).get(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// The smallest valid quantity.
    pub const ONE: Self = Self(1);

    /// Normalize an arbitrary numeric input: floor, then clamp to `>= 1`.
    ///
    /// `NaN` and negative infinity normalize to one; values beyond `u32::MAX`
    /// saturate.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn coerce(raw: f64) -> Self {
        if raw.is_nan() {
            return Self::ONE;
        }
        // Float-to-int `as` casts saturate, so infinities and huge values are safe.
        Self((raw.floor() as u32).max(1))
    }

    /// Clamp an integer input to `>= 1`.
    #[must_use]
    pub const fn clamp(raw: u32) -> Self {
        if raw == 0 { Self::ONE } else { Self(raw) }
    }

    /// Returns the quantity as a `u32`.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Add two quantities, saturating at `u32::MAX`.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<f64> for Quantity {
    fn from(raw: f64) -> Self {
        Self::coerce(raw)
    }
}

impl From<u32> for Quantity {
    fn from(raw: u32) -> Self {
        Self::clamp(raw)
    }
}

impl From<i32> for Quantity {
    fn from(raw: i32) -> Self {
        Self::clamp(u32::try_from(raw).unwrap_or(0))
    }
}

impl From<i64> for Quantity {
    fn from(raw: i64) -> Self {
        if raw > i64::from(u32::MAX) {
            return Self(u32::MAX);
        }
        Self::clamp(u32::try_from(raw).unwrap_or(0))
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_floors_fractions() {
        assert_eq!(Quantity::coerce(2.7).get(), 2);
        assert_eq!(Quantity::coerce(2.9).get(), 2);
        assert_eq!(Quantity::coerce(5.0).get(), 5);
    }

    #[test]
    fn test_coerce_clamps_non_positive() {
        assert_eq!(Quantity::coerce(0.0).get(), 1);
        assert_eq!(Quantity::coerce(0.5).get(), 1);
        assert_eq!(Quantity::coerce(-5.0).get(), 1);
        assert_eq!(Quantity::coerce(f64::NEG_INFINITY).get(), 1);
    }

    #[test]
    fn test_coerce_nan_is_one() {
        assert_eq!(Quantity::coerce(f64::NAN), Quantity::ONE);
    }

    #[test]
    fn test_coerce_saturates() {
        assert_eq!(Quantity::coerce(1e20).get(), u32::MAX);
        assert_eq!(Quantity::coerce(f64::INFINITY).get(), u32::MAX);
    }

    #[test]
    fn test_from_integers() {
        assert_eq!(Quantity::from(0_u32).get(), 1);
        assert_eq!(Quantity::from(-3_i32).get(), 1);
        assert_eq!(Quantity::from(7_i64).get(), 7);
        assert_eq!(Quantity::from(i64::MAX).get(), u32::MAX);
    }

    #[test]
    fn test_saturating_add() {
        let big = Quantity::from(u32::MAX);
        assert_eq!(big.saturating_add(Quantity::ONE).get(), u32::MAX);
        assert_eq!(Quantity::from(2).saturating_add(Quantity::from(3)).get(), 5);
    }

    #[test]
    fn test_deserialize_clamps_zero() {
        let q: Quantity = serde_json::from_str("0").unwrap();
        assert_eq!(q, Quantity::ONE);
    }
}

//! Type-safe price representation using decimal arithmetic.
//!
//! The canteen trades in a single currency, so a [`Price`] is just a
//! non-negative decimal amount in the currency's standard unit (e.g. dollars,
//! not cents). Decimal arithmetic keeps subtotals exact: three items at `4.50`
//! are `13.50`, never `13.499999`.
//!
//! Unit prices are bounded: at most [`Price::MAX_SCALE`] decimal places and at
//! most [`Price::MAX`]. Within those bounds every price has at most eleven
//! significant digits, so it survives a trip through an `f64` (the stored
//! cart writes prices as JSON numbers) unchanged, and no line total or
//! subtotal a cart can hold comes near the limits of `Decimal`.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::quantity::Quantity;

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
    /// The input is not a finite decimal amount in range.
    #[error("price is not a valid decimal amount: {0}")]
    Invalid(String),
    /// The amount has more decimal places than the currency allows.
    #[error("price has more than two decimal places: {0}")]
    TooPrecise(Decimal),
    /// The amount is above [`Price::MAX`].
    #[error("price exceeds the maximum of 1000000000: {0}")]
    TooLarge(Decimal),
}

/// A non-negative monetary amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// The largest accepted unit price, one billion.
    pub const MAX: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

    /// The most decimal places a unit price may carry.
    pub const MAX_SCALE: u32 = 2;

    /// Create a price from a decimal amount.
    ///
    /// Trailing zeros do not count towards the scale, so `4.500` is accepted
    /// as `4.5`.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero,
    /// [`PriceError::TooPrecise`] if it has more than [`Price::MAX_SCALE`]
    /// decimal places, and [`PriceError::TooLarge`] if it exceeds
    /// [`Price::MAX`].
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        let amount = amount.normalize();
        if amount.scale() > Self::MAX_SCALE {
            return Err(PriceError::TooPrecise(amount));
        }
        if amount > Self::MAX {
            return Err(PriceError::TooLarge(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from an amount in the smallest currency unit.
    ///
    /// ```
    /// use canteen_core::Price;
    ///
    /// assert_eq!(Price::from_cents(450).display(), "$4.50");
    /// ```
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2).normalize())
    }

    /// Convert a floating point amount, as found in loosely-typed stored data.
    ///
    /// The shortest decimal representation of the float is used, so `1.2`
    /// becomes exactly `1.2`.
    ///
    /// # Errors
    ///
    /// Returns an error for `NaN`, infinities, negative amounts, or amounts
    /// outside the bounds accepted by [`Price::new`].
    pub fn from_f64(amount: f64) -> Result<Self, PriceError> {
        if !amount.is_finite() {
            return Err(PriceError::Invalid(amount.to_string()));
        }
        Self::parse(&amount.to_string())
    }

    /// Parse a price from a decimal string such as `"4.5"` or `"1e2"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a decimal number, or if the
    /// amount is rejected by [`Price::new`].
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let trimmed = s.trim();
        let amount = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| PriceError::Invalid(s.to_owned()))?;
        Self::new(amount)
    }

    /// Returns the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The amount as the nearest `f64`.
    ///
    /// Parsing the decimal text gives the correctly rounded float, and for a
    /// bounded unit price [`Price::from_f64`] of the result is the same price.
    /// Totals above [`Price::MAX`] may lose digits.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.0.to_string().parse().unwrap_or(f64::NAN)
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

// Sums and products are not re-checked against `MAX`: a line total is at
// most 10^9 * u32::MAX (about 4.3e18) and `Decimal` holds about 7.9e28, so
// saturation needs over ten billion maximal lines.
impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Mul<Quantity> for Price {
    type Output = Self;

    fn mul(self, rhs: Quantity) -> Self::Output {
        Self(self.0.saturating_mul(Decimal::from(rhs.get())))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_negative() {
        assert!(matches!(
            Price::new(Decimal::new(-1, 2)),
            Err(PriceError::Negative(_))
        ));
        assert!(Price::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_parse() {
        assert_eq!(Price::parse("4.5").unwrap().amount(), Decimal::new(45, 1));
        assert_eq!(Price::parse(" 12 ").unwrap().amount(), Decimal::from(12));
        assert_eq!(Price::parse("1e2").unwrap().amount(), Decimal::from(100));
        assert!(Price::parse("abc").is_err());
        assert!(Price::parse("-3").is_err());
    }

    #[test]
    fn test_from_f64_is_exact_for_short_decimals() {
        assert_eq!(Price::from_f64(1.2).unwrap(), Price::parse("1.2").unwrap());
        assert_eq!(Price::from_f64(4.5).unwrap(), Price::parse("4.50").unwrap());
    }

    #[test]
    fn test_from_f64_rejects_non_finite() {
        assert!(Price::from_f64(f64::NAN).is_err());
        assert!(Price::from_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn test_line_total_is_exact() {
        let price = Price::parse("4.5").unwrap();
        assert_eq!(price * Quantity::from(3), Price::parse("13.5").unwrap());
    }

    #[test]
    fn test_sum() {
        let total: Price = ["0.1", "0.2"].iter().map(|s| Price::parse(s).unwrap()).sum();
        assert_eq!(total, Price::parse("0.3").unwrap());
    }

    #[test]
    fn test_new_rejects_sub_cent_amounts() {
        assert!(matches!(
            Price::parse("0.12345678901234567891"),
            Err(PriceError::TooPrecise(_))
        ));
        assert!(matches!(Price::parse("4.505"), Err(PriceError::TooPrecise(_))));
        assert_eq!(Price::parse("4.500").unwrap(), Price::parse("4.5").unwrap());
    }

    #[test]
    fn test_new_rejects_amounts_above_max() {
        assert!(matches!(
            Price::parse("79228162514264337593543950335"),
            Err(PriceError::TooLarge(_))
        ));
        assert!(matches!(
            Price::parse("1000000000.01"),
            Err(PriceError::TooLarge(_))
        ));
        assert_eq!(Price::parse("1000000000").unwrap().amount(), Price::MAX);
    }

    #[test]
    fn test_f64_round_trip_at_bounds() {
        for raw in ["0", "0.01", "0.1", "0.29", "19.99", "999999999.99", "1000000000"] {
            let price = Price::parse(raw).unwrap();
            assert_eq!(Price::from_f64(price.to_f64()).unwrap(), price, "{raw}");
        }
    }

    #[test]
    fn test_max_line_totals_are_exact() {
        let max = Price::new(Price::MAX).unwrap();
        let line = max * Quantity::from(u32::MAX);
        assert_eq!(line.amount(), Price::MAX * Decimal::from(u32::MAX));

        let subtotal: Price = std::iter::repeat_n(line, 1000).sum();
        assert_eq!(
            subtotal.amount(),
            Price::MAX * Decimal::from(u32::MAX) * Decimal::from(1000)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::parse("13.5").unwrap().display(), "$13.50");
        assert_eq!(Price::ZERO.display(), "$0.00");
    }
}

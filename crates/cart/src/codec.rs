//! Wire format for the persisted cart.
//!
//! The cart is stored as a single JSON array under one key:
//!
//! ```json
//! [{"id":"a","name":"Rice","price":4.5,"quantity":2,"image":null,"description":null}]
//! ```
//!
//! Encoding is strict. Decoding is lenient per record: the stored value may
//! have been written by an older build, truncated, or edited by hand, so a
//! record that cannot be turned into a valid [`CartLine`] is dropped and the
//! rest of the array still loads. Only a value that is not a JSON array at all
//! fails as a whole.

use serde::Serialize;
use serde_json::{Map, Number, Value};
use thiserror::Error;
use tracing::warn;

use canteen_core::{ItemId, Price, Quantity};

use crate::item::{CartItem, CartLine};

/// Errors that can occur while encoding or decoding a stored cart.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The stored value is not valid JSON.
    #[error("stored cart is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    /// The stored value is JSON, but not an array.
    #[error("stored cart must be an array, found {0}")]
    NotASequence(&'static str),

    /// A price could not be represented as a JSON number.
    #[error("price {0} cannot be encoded as a number")]
    Price(Price),

    /// Serialization failed.
    #[error("failed to encode cart: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Why a single stored record was dropped.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RecordError {
    #[error("record is not an object")]
    NotAnObject,
    #[error("record has no non-empty string id")]
    InvalidId,
    #[error("record has no non-empty string name")]
    InvalidName,
    #[error("record price is not a finite non-negative number")]
    InvalidPrice,
    #[error("record quantity is not a finite number")]
    InvalidQuantity,
}

/// The result of decoding a stored cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoded {
    /// Valid lines, in stored order, with unique ids.
    pub lines: Vec<CartLine>,
    /// Records dropped because they were malformed.
    pub dropped: usize,
    /// Records folded into an earlier record with the same id.
    pub merged: usize,
}

#[derive(Serialize)]
struct StoredLine<'a> {
    id: &'a str,
    name: &'a str,
    price: Number,
    quantity: u32,
    image: Option<&'a str>,
    description: Option<&'a str>,
}

/// Encode cart lines into their stored representation.
///
/// # Errors
///
/// Returns an error only if a price cannot be expressed as a JSON number,
/// which does not happen for amounts a [`Price`] can hold.
pub fn encode(lines: &[CartLine]) -> Result<String, CodecError> {
    let stored = lines
        .iter()
        .map(|line| {
            let price = Number::from_f64(line.price().to_f64())
                .ok_or(CodecError::Price(line.price()))?;
            Ok(StoredLine {
                id: line.id().as_str(),
                name: line.name(),
                price,
                quantity: line.quantity().get(),
                image: line.image(),
                description: line.description(),
            })
        })
        .collect::<Result<Vec<_>, CodecError>>()?;

    serde_json::to_string(&stored).map_err(CodecError::Encode)
}

/// Decode a stored cart.
///
/// Malformed records are dropped. Records repeating an earlier id are merged
/// into the first occurrence: quantities are summed and the first record's
/// display fields are kept, the same outcome as adding the item twice.
///
/// # Errors
///
/// Returns an error if `raw` is not JSON or is not a JSON array.
pub fn decode(raw: &str) -> Result<Decoded, CodecError> {
    let value: Value = serde_json::from_str(raw).map_err(CodecError::Syntax)?;
    let Value::Array(records) = value else {
        return Err(CodecError::NotASequence(kind_of(&value)));
    };

    let mut decoded = Decoded::default();
    for (index, record) in records.iter().enumerate() {
        let line = match decode_record(record) {
            Ok(line) => line,
            Err(reason) => {
                warn!(index, %reason, "Dropping malformed cart record");
                decoded.dropped += 1;
                continue;
            }
        };

        if let Some(existing) = decoded.lines.iter_mut().find(|l| l.id() == line.id()) {
            warn!(item_id = %line.id(), index, "Merging duplicate cart record");
            existing.merge(line.quantity());
            decoded.merged += 1;
        } else {
            decoded.lines.push(line);
        }
    }

    Ok(decoded)
}

/// Decode a single record into a line.
///
/// # Errors
///
/// Returns the first reason the record is not a valid line.
pub fn decode_record(record: &Value) -> Result<CartLine, RecordError> {
    let Value::Object(fields) = record else {
        return Err(RecordError::NotAnObject);
    };

    let id = non_empty_str(fields, "id")
        .and_then(|s| ItemId::parse(s).ok())
        .ok_or(RecordError::InvalidId)?;
    let name = non_empty_str(fields, "name").ok_or(RecordError::InvalidName)?;
    let price = fields
        .get("price")
        .and_then(coerce_price)
        .ok_or(RecordError::InvalidPrice)?;
    let quantity = fields
        .get("quantity")
        .and_then(coerce_number)
        .map(Quantity::coerce)
        .ok_or(RecordError::InvalidQuantity)?;

    let mut item = CartItem::new(id, name, price).map_err(|_| RecordError::InvalidName)?;
    if let Some(image) = optional_str(fields, "image") {
        item = item.with_image(image);
    }
    if let Some(description) = optional_str(fields, "description") {
        item = item.with_description(description);
    }

    Ok(CartLine::new(item, quantity))
}

fn non_empty_str<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Optional text fields accept a string; `null`, absence, or any other type
/// reads as "not set".
fn optional_str<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str)
}

/// Numbers and numeric strings coerce; everything else, and non-finite
/// values, do not.
fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

fn coerce_price(value: &Value) -> Option<Price> {
    match value {
        // Parse strings directly so "0.10" stays exact.
        Value::String(s) => Price::parse(s).ok(),
        other => Price::from_f64(coerce_number(other)?).ok(),
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

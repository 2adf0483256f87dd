//! Lenient numeric (de)serialization for stored calendar data.
//!
//! Snapshots written by the browser front-end hold plain JSON numbers, and
//! older records sometimes carry numbers as strings (`"1.0"`) or nothing at
//! all. Anything that is not a number coerces to zero instead of failing the
//! whole load. Values are written back as plain JSON numbers.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// Converts an arbitrary JSON value into a decimal, coercing anything
/// non-numeric to zero.
///
/// # Example
///
/// ```
/// use gongsu_calendar::models::coerce_decimal;
/// use rust_decimal::Decimal;
/// use serde_json::json;
///
/// assert_eq!(coerce_decimal(&json!(1.5)), Decimal::new(15, 1));
/// assert_eq!(coerce_decimal(&json!("0.5")), Decimal::new(5, 1));
/// assert_eq!(coerce_decimal(&json!("abc")), Decimal::ZERO);
/// assert_eq!(coerce_decimal(&json!(null)), Decimal::ZERO);
/// ```
pub fn coerce_decimal(value: &Value) -> Decimal {
    parse_decimal(value).unwrap_or(Decimal::ZERO)
}

fn parse_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Decimal::from(i))
            } else if let Some(u) = n.as_u64() {
                Some(Decimal::from(u))
            } else {
                parse_decimal_str(&n.to_string())
            }
        }
        Value::String(s) => parse_decimal_str(s.trim()),
        _ => None,
    }
}

fn parse_decimal_str(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Converts a JSON value into a whole number of hours.
///
/// Fractions are truncated and negatives clamp to zero.
pub fn coerce_hours(value: &Value) -> u32 {
    parse_decimal(value)
        .map(|d| d.trunc())
        .filter(|d| d.is_sign_positive())
        .and_then(|d| d.to_u32())
        .unwrap_or(0)
}

fn write_decimal<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let normalized = value.normalize();
    if normalized.scale() == 0 {
        if let Some(i) = normalized.to_i64() {
            return serializer.serialize_i64(i);
        }
    }
    match normalized.to_f64() {
        Some(f) => serializer.serialize_f64(f),
        None => serializer.collect_str(&normalized),
    }
}

/// `#[serde(with = ...)]` adapter for a required decimal field.
pub mod decimal_number {
    use super::*;

    /// Writes the decimal as a JSON number.
    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        write_decimal(value, serializer)
    }

    /// Reads any JSON value, coercing non-numbers to zero.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(coerce_decimal(&value))
    }
}

/// `#[serde(with = ...)]` adapter for an optional decimal field.
///
/// `null` and non-numeric values read as `None`.
pub mod optional_decimal_number {
    use super::*;

    /// Writes the decimal as a JSON number, or `null`.
    pub fn serialize<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(d) => write_decimal(d, serializer),
            None => serializer.serialize_none(),
        }
    }

    /// Reads any JSON value; only numbers and numeric strings yield `Some`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(parse_decimal(&value))
    }
}

/// `#[serde(with = ...)]` adapter for whole hours.
pub mod hours_number {
    use super::*;

    /// Writes the hours as a JSON integer.
    pub fn serialize<S>(value: &u32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(*value)
    }

    /// Reads any JSON value, truncating fractions and coercing junk to zero.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(coerce_hours(&value))
    }
}

/// `#[serde(deserialize_with = ...)]` for free text that may arrive as a
/// number or `null`.
pub fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

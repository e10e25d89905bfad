//! Lenient deserializers for project input.
//!
//! Base currency fields follow one rule: absent or non-numeric base input is
//! treated as 0. Everything that reads a currency amount from a caller or from
//! storage goes through [`coerce_amount`].

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::constants::MAX_CURRENCY_AMOUNT;

// Digit separators (`_`, `,`) make a value non-numeric.
fn parse_decimal(value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.contains('_') {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Coerces a raw JSON value into a currency amount.
///
/// Numbers and numeric strings parse as decimals. Null, empty strings,
/// booleans, non-numeric strings and amounts beyond [`MAX_CURRENCY_AMOUNT`]
/// in either direction become zero.
pub fn coerce_amount(value: &Value) -> Decimal {
    let parsed = match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s),
        _ => None,
    };
    parsed
        .filter(|amount| amount.abs() <= MAX_CURRENCY_AMOUNT)
        .unwrap_or(Decimal::ZERO)
}

/// Deserializes a currency amount, coercing anything unusable to zero.
/// Pair with `#[serde(default)]` so a missing field is zero as well.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(coerce_amount(&raw))
}

/// Deserializes an amount inside a partial update. A missing field stays
/// `None` (keep the stored value); a present field is coerced like any other
/// base input, so `null` or `"abc"` set the amount to zero.
pub fn deserialize_patch_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(Some(coerce_amount(&raw)))
}

fn parse_date(value: &str) -> Result<Option<NaiveDate>, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(Some(dt.date_naive()));
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| Some(dt.date()))
        .map_err(|e| format!("Invalid date '{}': {}", value, e))
}

/// Deserializes an optional date from `YYYY-MM-DD` or an ISO-8601 timestamp.
/// Null and empty strings are `None`.
pub fn deserialize_option_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) => parse_date(&s).map_err(serde::de::Error::custom),
    }
}

/// Date inside a partial update: missing is `None`, `null`/empty is
/// `Some(None)` (clear), anything else must parse.
pub fn deserialize_patch_date<'de, D>(
    deserializer: D,
) -> Result<Option<Option<NaiveDate>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_option_date(deserializer).map(Some)
}

/// Text inside a partial update: missing is `None`, `null` is `Some(None)`.
pub fn deserialize_patch_text<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Trims a text field, mapping blank values to `None`.
pub fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

//! Tolerant decoding of individual statistics.
//!
//! Source rows are loosely typed: counts come through as `3.0`, numeric
//! columns as strings, and whole categories as `null`. A statistic that
//! cannot be read as its declared type is treated as missing so that one bad
//! cell never rejects the record it belongs to.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{CommerceDensity, TransportFrequency};

/// A leaf statistic that can be read from an arbitrary JSON value.
pub trait Statistic: Sized {
    /// Returns the statistic held by `value`, or `None` if it has the wrong
    /// type or is out of range.
    fn from_json(value: &Value) -> Option<Self>;
}

fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse().ok()?,
        _ => return None,
    };

    number.is_finite().then_some(number)
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn as_count(value: &Value) -> Option<u64> {
    if let Some(count) = value.as_u64() {
        return Some(count);
    }

    let number = as_number(value)?;
    (number >= 0.0 && number.fract() == 0.0 && number <= u64::MAX as f64)
        .then_some(number as u64)
}

impl Statistic for f64 {
    fn from_json(value: &Value) -> Option<Self> {
        as_number(value)
    }
}

impl Statistic for u64 {
    fn from_json(value: &Value) -> Option<Self> {
        as_count(value)
    }
}

impl Statistic for u32 {
    fn from_json(value: &Value) -> Option<Self> {
        Self::try_from(as_count(value)?).ok()
    }
}

impl Statistic for bool {
    fn from_json(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl Statistic for TransportFrequency {
    fn from_json(value: &Value) -> Option<Self> {
        value.as_str()?.parse().ok()
    }
}

impl Statistic for CommerceDensity {
    fn from_json(value: &Value) -> Option<Self> {
        value.as_str()?.parse().ok()
    }
}

/// `deserialize_with` target for a single optional statistic.
///
/// # Errors
///
/// * If the underlying input is not valid JSON
pub fn statistic<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Statistic,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::from_json(&value))
}

/// `deserialize_with` target for a category group. Anything other than an
/// object (including `null`) reads as a category with no statistics.
///
/// # Errors
///
/// * If the underlying input is not valid JSON
pub fn category<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => T::deserialize(value).map_err(serde::de::Error::custom),
        _ => Ok(T::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn counts_accept_integral_floats_and_numeric_strings() {
        assert_eq!(u32::from_json(&json!(4)), Some(4));
        assert_eq!(u32::from_json(&json!(3.0)), Some(3));
        assert_eq!(u32::from_json(&json!("12")), Some(12));
        assert_eq!(u64::from_json(&json!(250_000.0)), Some(250_000));
    }

    #[test]
    fn counts_reject_fractions_negatives_and_overflow() {
        assert_eq!(u32::from_json(&json!(2.5)), None);
        assert_eq!(u32::from_json(&json!(-1)), None);
        assert_eq!(u32::from_json(&json!(5_000_000_000_u64)), None);
        assert_eq!(u32::from_json(&json!("many")), None);
        assert_eq!(u32::from_json(&json!(true)), None);
        assert_eq!(u32::from_json(&Value::Null), None);
    }

    #[test]
    fn measures_accept_numbers_and_numeric_strings() {
        assert_eq!(f64::from_json(&json!(7)), Some(7.0));
        assert_eq!(f64::from_json(&json!(" 3.5 ")), Some(3.5));
        assert_eq!(f64::from_json(&json!("NaN")), None);
        assert_eq!(f64::from_json(&json!([1.0])), None);
    }

    #[test]
    fn flags_and_enums_require_exact_types() {
        assert_eq!(bool::from_json(&json!(true)), Some(true));
        assert_eq!(bool::from_json(&json!("true")), None);
        assert_eq!(bool::from_json(&json!(1)), None);

        assert_eq!(
            TransportFrequency::from_json(&json!("high")),
            Some(TransportFrequency::High)
        );
        assert_eq!(TransportFrequency::from_json(&json!("hourly")), None);
        assert_eq!(CommerceDensity::from_json(&json!(2)), None);
    }
}

//! Numeric fields that accept JSON numbers or numeric strings.
//!
//! Browser forms often post `"12"` instead of `12`; both are accepted.
//! Anything that is not a finite number fails deserialization.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

pub const PRODUCT_NUMBERS: &str = "Stock, reorderPoint, and price must be numbers";
pub const WHOLE_NUMBERS: &str = "Stock and reorderPoint must be whole numbers";
pub const DURATION_MINUTES: &str = "durationMinutes must be a whole number of minutes";

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(serde_json::Number),
    Text(String),
}

impl NumberOrString {
    fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => n.as_f64()?,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

fn whole(value: f64, min: f64, max: f64) -> Option<i64> {
    (value.fract() == 0.0 && value >= min && value <= max).then_some(value as i64)
}

/// Optional `f64` for `price`.
pub fn option_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)
        .map_err(|_| D::Error::custom(PRODUCT_NUMBERS))?
    {
        None => Ok(None),
        Some(raw) => raw
            .as_f64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(PRODUCT_NUMBERS)),
    }
}

/// Optional `i32` for `stock` and `reorderPoint`.
pub fn option_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)
        .map_err(|_| D::Error::custom(PRODUCT_NUMBERS))?
    {
        None => Ok(None),
        Some(raw) => {
            let value = raw.as_f64().ok_or_else(|| D::Error::custom(PRODUCT_NUMBERS))?;
            whole(value, i32::MIN as f64, i32::MAX as f64)
                .map(|v| Some(v as i32))
                .ok_or_else(|| D::Error::custom(WHOLE_NUMBERS))
        }
    }
}

/// Optional share link lifetime in minutes.
///
/// Whole numbers beyond the `i64` range saturate, so the lifetime policy
/// still clamps or defaults them.
pub fn option_minutes<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)
        .map_err(|_| D::Error::custom(DURATION_MINUTES))?
    {
        None => Ok(None),
        Some(raw) => raw
            .as_f64()
            .filter(|v| v.fract() == 0.0)
            .map(|v| v.clamp(i64::MIN as f64, i64::MAX as f64) as i64)
            .map(Some)
            .ok_or_else(|| D::Error::custom(DURATION_MINUTES)),
    }
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

//! DisplayValue enum for cell values

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

/// A displayable cell value.
///
/// Rows map column names to these values. Source JSON deserializes into the
/// narrowest matching variant; anything structured (arrays, objects) is
/// kept as [`DisplayValue::Json`].
///
/// # Example
///
/// ```
/// use treetable_lib::model::DisplayValue;
///
/// let name = DisplayValue::from("src");
/// let size = DisplayValue::from(4096);
/// assert_eq!(size.to_string(), "4096");
/// assert_eq!(DisplayValue::Null.to_string(), "");
/// assert!(name.compare(&size).is_gt());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisplayValue {
    /// Null/empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(String),
    /// Fallback for structured JSON values.
    Json(serde_json::Value),
}

impl DisplayValue {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, DisplayValue::Null)
    }

    /// Returns the string slice if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DisplayValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DisplayValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is an integer value.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DisplayValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a float if it is numeric (integer or float).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DisplayValue::Int(i) => Some(*i as f64),
            DisplayValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Total ordering used by column sorters.
    ///
    /// Values of different kinds order as
    /// `Null < Bool < numbers < String < Json`. Integers and floats compare
    /// exactly by value with each other, `-0.0 == 0.0`, and NaN sorts above
    /// every other number.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (DisplayValue::Bool(a), DisplayValue::Bool(b)) => a.cmp(b),
            (DisplayValue::Int(a), DisplayValue::Int(b)) => a.cmp(b),
            (DisplayValue::Float(a), DisplayValue::Float(b)) => compare_floats(*a, *b),
            (DisplayValue::Int(a), DisplayValue::Float(b)) => compare_int_float(*a, *b),
            (DisplayValue::Float(a), DisplayValue::Int(b)) => compare_int_float(*b, *a).reverse(),
            (DisplayValue::String(a), DisplayValue::String(b)) => a.cmp(b),
            (DisplayValue::Json(a), DisplayValue::Json(b)) => a.to_string().cmp(&b.to_string()),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            DisplayValue::Null => 0,
            DisplayValue::Bool(_) => 1,
            DisplayValue::Int(_) | DisplayValue::Float(_) => 2,
            DisplayValue::String(_) => 3,
            DisplayValue::Json(_) => 4,
        }
    }
}

/// 2^63, the first float above every `i64`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn compare_floats(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Compares without rounding the integer through `f64`.
fn compare_int_float(i: i64, f: f64) -> Ordering {
    if f.is_nan() || f >= I64_BOUND {
        return Ordering::Less;
    }
    if f < -I64_BOUND {
        return Ordering::Greater;
    }
    // In range, so the integral part converts exactly.
    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => compare_floats(0.0, f - whole),
        unequal => unequal,
    }
}

impl std::fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayValue::Null => Ok(()),
            DisplayValue::Bool(b) => write!(f, "{}", b),
            DisplayValue::Int(i) => write!(f, "{}", i),
            DisplayValue::Float(v) => write!(f, "{}", v),
            DisplayValue::String(s) => f.write_str(s),
            DisplayValue::Json(json) => write!(f, "{}", json),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for DisplayValue {
    fn from(value: bool) -> Self {
        DisplayValue::Bool(value)
    }
}

impl From<i32> for DisplayValue {
    fn from(value: i32) -> Self {
        DisplayValue::Int(value as i64)
    }
}

impl From<i64> for DisplayValue {
    fn from(value: i64) -> Self {
        DisplayValue::Int(value)
    }
}

impl From<u32> for DisplayValue {
    fn from(value: u32) -> Self {
        DisplayValue::Int(value as i64)
    }
}

impl From<f64> for DisplayValue {
    fn from(value: f64) -> Self {
        DisplayValue::Float(value)
    }
}

impl From<&str> for DisplayValue {
    fn from(value: &str) -> Self {
        DisplayValue::String(value.to_string())
    }
}

impl From<String> for DisplayValue {
    fn from(value: String) -> Self {
        DisplayValue::String(value)
    }
}

impl<T: Into<DisplayValue>> From<Option<T>> for DisplayValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(DisplayValue::Null)
    }
}

/// Normalizes scalars into their dedicated variants.
impl From<serde_json::Value> for DisplayValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => DisplayValue::Null,
            serde_json::Value::Bool(b) => DisplayValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => DisplayValue::Int(i),
                None => n
                    .as_f64()
                    .map(DisplayValue::Float)
                    .unwrap_or(DisplayValue::Json(serde_json::Value::Number(n))),
            },
            serde_json::Value::String(s) => DisplayValue::String(s),
            other => DisplayValue::Json(other),
        }
    }
}

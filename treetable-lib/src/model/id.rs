//! TreeId type

use std::convert::Infallible;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

/// Identifier naming a logical entry in the source data.
///
/// Source data may use either integer or string ids. Both forms are
/// comparable and hashable, and an integer id never equals a string id
/// (`TreeId::Int(1) != TreeId::Str("1")`).
///
/// # Example
///
/// ```
/// use treetable_lib::model::TreeId;
///
/// let a = TreeId::from(7);
/// let b: TreeId = "node-7".into();
/// assert_eq!(a.to_string(), "7");
/// assert_eq!(b.as_str(), Some("node-7"));
/// assert_eq!("42".parse::<TreeId>().unwrap(), TreeId::Int(42));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeId {
    /// Integer identifier.
    Int(i64),
    /// String identifier.
    Str(String),
}

impl TreeId {
    /// Returns the integer value if this is an integer id.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            TreeId::Int(value) => Some(*value),
            TreeId::Str(_) => None,
        }
    }

    /// Returns the string value if this is a string id.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TreeId::Int(_) => None,
            TreeId::Str(value) => Some(value),
        }
    }
}

impl std::fmt::Display for TreeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeId::Int(value) => write!(f, "{}", value),
            TreeId::Str(value) => write!(f, "{}", value),
        }
    }
}

/// Parses integers as [`TreeId::Int`], anything else as [`TreeId::Str`].
impl FromStr for TreeId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map(TreeId::Int)
            .unwrap_or_else(|_| TreeId::Str(s.to_string())))
    }
}

impl From<i64> for TreeId {
    fn from(value: i64) -> Self {
        TreeId::Int(value)
    }
}

impl From<i32> for TreeId {
    fn from(value: i32) -> Self {
        TreeId::Int(value as i64)
    }
}

impl From<u32> for TreeId {
    fn from(value: u32) -> Self {
        TreeId::Int(value as i64)
    }
}

impl From<&str> for TreeId {
    fn from(value: &str) -> Self {
        TreeId::Str(value.to_string())
    }
}

impl From<String> for TreeId {
    fn from(value: String) -> Self {
        TreeId::Str(value)
    }
}

impl From<&TreeId> for TreeId {
    fn from(value: &TreeId) -> Self {
        value.clone()
    }
}

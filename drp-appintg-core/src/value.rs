//! Column values as they travel from the database to the output writers.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::normalize::NULL_SENTINEL;

/// A single column value from a result row, or a bind parameter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// True for the text marker that stands in for a database NULL.
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Self::Text(s) if s == NULL_SENTINEL)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Int(v) => write!(f, "{v}"),
            // Debug keeps the decimal point on whole floats (150.0, not 150)
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// One flat row from query execution, keyed by lower-cased column alias in
/// select-list order.
pub type ResultRow = IndexMap<String, FieldValue>;

/// Named bind parameters for a built query, in the order they were bound.
pub type BindMap = IndexMap<String, FieldValue>;

/// The fields of one file (the raw image or one calibration product) for an image.
pub type SubRecord = IndexMap<String, FieldValue>;

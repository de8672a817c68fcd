//! Extracted values and the per-cycle result map

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Decoded value of one screen field
///
/// An absent field has no `FieldValue` at all; callers see `None` instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Trimmed text, unit stripped
    Text(String),
    /// Whole number such as an energy or runtime counter
    Integer(i64),
    /// Decimal number with the decimal comma normalised
    Decimal(f64),
    /// Text run exactly as the controller sent it
    Raw(String),
}

impl FieldValue {
    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(v) => Some(*v as f64),
            FieldValue::Decimal(v) => Some(*v),
            FieldValue::Text(_) | FieldValue::Raw(_) => None,
        }
    }

    /// Text view of the value, if it has one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) | FieldValue::Raw(s) => Some(s),
            FieldValue::Integer(_) | FieldValue::Decimal(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) | FieldValue::Raw(s) => write!(f, "{}", s),
            FieldValue::Integer(v) => write!(f, "{}", v),
            FieldValue::Decimal(v) => write!(f, "{}", v),
        }
    }
}

/// Canonical field name to decoded value, accumulated over one cycle
///
/// Built fresh for every cycle and handed to the publication side only when
/// the whole cycle succeeded. A later visit to the same screen overwrites
/// earlier values for the same key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultMap {
    fields: BTreeMap<String, FieldValue>,
}

impl ResultMap {
    /// Create an empty result map
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, replacing any earlier value under the same key
    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        self.fields.insert(key.into(), value)
    }

    /// Look up a field by its canonical key
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Check whether a key was decoded this cycle
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Iterate over all decoded fields in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

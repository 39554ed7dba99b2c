use serde::{Deserialize, Serialize};

/// A single cell produced by the embedded engine.
///
/// Serializes the way the controlling context expects to read rows:
/// ```rust
/// use sql_relay::prelude::*;
///
/// let row = vec![CellValue::Int(5), CellValue::Text("a".into()), CellValue::Null];
/// assert_eq!(serde_json::to_string(&row).unwrap(), r#"[5,"a",null]"#);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// NULL value
    Null,
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    ///
    /// JSON has no infinities or NaN: a non-finite real goes out as `null`, so the controlling
    /// context cannot tell it apart from [`CellValue::Null`].
    Float(f64),
    /// Text/string value
    Text(String),
    /// Binary data, sent as an array of byte values
    Blob(Vec<u8>),
}

impl CellValue {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let CellValue::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let CellValue::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            CellValue::Float(value) => Some(*value),
            #[allow(clippy::cast_precision_loss)]
            CellValue::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let CellValue::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<Vec<u8>> for CellValue {
    fn from(value: Vec<u8>) -> Self {
        CellValue::Blob(value)
    }
}

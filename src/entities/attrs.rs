//! Generic knob storage for in-memory nodes.
//!
//! Keys keep insertion order so snapshots serialize the way they were
//! written. Lookups never depend on that order: reference knobs are resolved
//! through an explicit priority list (see `core::resolver`).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Generic knob value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i32),
    Float(f64),
    Str(String),
}

impl AttrValue {
    /// Frame number held by this value. Floats truncate toward zero.
    pub fn as_frame(&self) -> Option<i32> {
        match self {
            AttrValue::Int(v) => Some(*v),
            AttrValue::Float(v) if v.is_finite() => Some(v.trunc() as i32),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        AttrValue::Int(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Str(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Str(v)
    }
}

/// Knob container: name -> typed value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attrs {
    map: IndexMap<String, AttrValue>,
}

impl Attrs {
    pub fn new() -> Self {
        Self {
            map: IndexMap::new(),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: AttrValue) {
        self.map.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.map.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.map.get(key).and_then(AttrValue::as_str)
    }

    /// Frame value of an int or float knob
    pub fn get_frame(&self, key: &str) -> Option<i32> {
        self.map.get(key).and_then(AttrValue::as_frame)
    }

    /// Check if knob exists
    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_from_int_and_float() {
        let mut attrs = Attrs::new();
        attrs.set("ref_frame", 1001.into());
        attrs.set("first", 1001.9.into());
        attrs.set("label", "hello".into());

        assert_eq!(attrs.get_frame("ref_frame"), Some(1001));
        assert_eq!(attrs.get_frame("first"), Some(1001));
        assert_eq!(attrs.get_frame("label"), None);
        assert_eq!(attrs.get_frame("missing"), None);
    }

    #[test]
    fn test_negative_float_truncates_toward_zero() {
        assert_eq!(AttrValue::Float(-10.7).as_frame(), Some(-10));
        assert_eq!(AttrValue::Float(f64::NAN).as_frame(), None);
    }

    #[test]
    fn test_json_shape_is_plain_values() {
        let mut attrs = Attrs::new();
        attrs.set("first", 1.into());
        attrs.set("label", "x".into());
        attrs.set("lock", true.into());
        let json = serde_json::to_string(&attrs).unwrap();
        assert_eq!(json, r#"{"first":1,"label":"x","lock":true}"#);

        let back: Attrs = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get("first"), Some(&AttrValue::Int(1)));
        assert_eq!(back.get("lock"), Some(&AttrValue::Bool(true)));
        assert_eq!(back.get_str("label"), Some("x"));
    }
}

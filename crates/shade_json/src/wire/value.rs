use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::wire::printer;

// -----------------------------------------------------------------------------
// Number

/// A JSON number, keeping the width it was produced with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Uint(u64),
    F32(f32),
    F64(f64),
}

impl Number {
    #[inline]
    pub fn is_zero(self) -> bool {
        match self {
            Self::Int(v) => v == 0,
            Self::Uint(v) => v == 0,
            Self::F32(v) => v == 0.0,
            Self::F64(v) => v == 0.0,
        }
    }

    /// The value as a float, accepting any width.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Uint(v) => v as f64,
            Self::F32(v) => f64::from(v),
            Self::F64(v) => v,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Int(v) => fmt::Display::fmt(&v, f),
            Self::Uint(v) => fmt::Display::fmt(&v, f),
            Self::F32(v) => f.write_str(&printer::format_f32(v)),
            Self::F64(v) => f.write_str(&printer::format_f64(v)),
        }
    }
}

// -----------------------------------------------------------------------------
// WireValue

/// The in-memory form of an encoded document.
///
/// Objects keep their entries in insertion order, so struct fields print in
/// declaration order and payloads stay trees until the single final print.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WireValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<WireValue>),
    Object(Vec<(String, WireValue)>),
}

impl WireValue {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The first entry named `key`, if this is an object.
    pub fn get(&self, key: &str) -> Option<&WireValue> {
        match self {
            Self::Object(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// A short name of the JSON kind, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// Whether the value counts as empty for the `omitempty` option.
    pub fn is_empty_value(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(v) => !v,
            Self::Number(n) => n.is_zero(),
            Self::String(s) => s.is_empty(),
            Self::Array(items) => items.is_empty(),
            Self::Object(entries) => entries.is_empty(),
        }
    }

    pub(crate) fn object<const N: usize>(entries: [(&str, WireValue); N]) -> Self {
        Self::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<bool> for WireValue {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Number> for WireValue {
    #[inline]
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl From<String> for WireValue {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

// -----------------------------------------------------------------------------
// Serialize

impl Serialize for WireValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::Number(Number::Int(v)) => serializer.serialize_i64(*v),
            Self::Number(Number::Uint(v)) => serializer.serialize_u64(*v),
            Self::Number(Number::F32(v)) => serializer.serialize_f32(*v),
            Self::Number(Number::F64(v)) => serializer.serialize_f64(*v),
            Self::String(v) => serializer.serialize_str(v),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Deserialize

struct WireValueVisitor;

impl<'de> Visitor<'de> for WireValueVisitor {
    type Value = WireValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<WireValue, E> {
        Ok(WireValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<WireValue, E> {
        Ok(WireValue::Number(Number::Int(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<WireValue, E> {
        // Non-negative literals always arrive here, keep them signed when possible.
        Ok(WireValue::Number(match i64::try_from(v) {
            Ok(v) => Number::Int(v),
            Err(_) => Number::Uint(v),
        }))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<WireValue, E> {
        Ok(WireValue::Number(Number::F64(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<WireValue, E> {
        Ok(WireValue::String(v.into()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<WireValue, E> {
        Ok(WireValue::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<WireValue, E> {
        Ok(WireValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<WireValue, E> {
        Ok(WireValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<WireValue, D::Error> {
        WireValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<WireValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(WireValue::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<WireValue, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry::<String, WireValue>()? {
            entries.push(entry);
        }
        Ok(WireValue::Object(entries))
    }
}

impl<'de> Deserialize<'de> for WireValue {
    #[inline]
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(WireValueVisitor)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::{Number, WireValue};

    #[test]
    fn parse_keeps_entry_order() {
        let value: WireValue = serde_json::from_str(r#"{"b":1,"a":[true,null],"c":-2.5}"#).unwrap();
        let WireValue::Object(entries) = &value else {
            panic!("expected an object");
        };
        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["b", "a", "c"]);
        assert_eq!(value.get("b"), Some(&WireValue::Number(Number::Int(1))));
        assert_eq!(
            value.get("a"),
            Some(&WireValue::Array(vec![WireValue::Bool(true), WireValue::Null]))
        );
        assert_eq!(value.get("c"), Some(&WireValue::Number(Number::F64(-2.5))));
    }

    #[test]
    fn large_unsigned_stays_unsigned() {
        let value: WireValue = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(value, WireValue::Number(Number::Uint(u64::MAX)));
    }

    #[test]
    fn emptiness() {
        assert!(WireValue::Null.is_empty_value());
        assert!(WireValue::Bool(false).is_empty_value());
        assert!(WireValue::Number(Number::F64(0.0)).is_empty_value());
        assert!(WireValue::String("".into()).is_empty_value());
        assert!(!WireValue::Number(Number::Int(1)).is_empty_value());
        assert!(!WireValue::Array(vec![WireValue::Null]).is_empty_value());
    }

    #[test]
    fn number_text() {
        assert_eq!(Number::F64(1.0).to_string(), "1");
        assert_eq!(Number::F32(0.1).to_string(), "0.1");
        assert_eq!(Number::Int(-3).to_string(), "-3");
    }
}

//! Dynamically typed parameter values
//!
//! GitLab endpoints accept a loose mix of scalars, lists and timestamps.
//! [`OptionValue`] models that mix so schemas can check the runtime type of
//! whatever a caller passes in.

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Caller-supplied parameters, keyed by option name
pub type Params = BTreeMap<String, OptionValue>;

/// A single parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    DateTime(DateTime<FixedOffset>),
    Array(Vec<OptionValue>),
}

/// Runtime type tag of an [`OptionValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Bool,
    #[serde(rename = "int")]
    Integer,
    Float,
    String,
    DateTime,
    Array,
}

impl ValueType {
    /// Check whether `value` is acceptable for this type.
    ///
    /// `DateTime` also accepts a string already in RFC 3339 form, which is
    /// what the `Iso8601` normalizer produces. This keeps resolution
    /// idempotent when a resolved map is fed back through the same schema.
    pub fn matches(&self, value: &OptionValue) -> bool {
        match (self, value) {
            (ValueType::DateTime, OptionValue::String(s)) => parse_datetime(s).is_some(),
            _ => value.value_type() == *self,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Bool => "bool",
            ValueType::Integer => "int",
            ValueType::Float => "float",
            ValueType::String => "string",
            ValueType::DateTime => "datetime",
            ValueType::Array => "array",
        };
        f.write_str(name)
    }
}

impl OptionValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            OptionValue::Bool(_) => ValueType::Bool,
            OptionValue::Integer(_) => ValueType::Integer,
            OptionValue::Float(_) => ValueType::Float,
            OptionValue::String(_) => ValueType::String,
            OptionValue::DateTime(_) => ValueType::DateTime,
            OptionValue::Array(_) => ValueType::Array,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            OptionValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Render a scalar the way it goes on the wire.
    ///
    /// Arrays are rendered comma-joined; query encoding expands them into
    /// repeated keys instead (see [`query_pairs`]).
    pub fn to_wire_string(&self) -> String {
        match self {
            OptionValue::Bool(b) => b.to_string(),
            OptionValue::Integer(n) => n.to_string(),
            OptionValue::Float(x) => x.to_string(),
            OptionValue::String(s) => s.clone(),
            OptionValue::DateTime(dt) => format_datetime(dt),
            OptionValue::Array(items) => items
                .iter()
                .map(OptionValue::to_wire_string)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::String(s) => write!(f, "\"{}\"", s),
            OptionValue::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            other => f.write_str(&other.to_wire_string()),
        }
    }
}

impl Serialize for OptionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OptionValue::Bool(b) => serializer.serialize_bool(*b),
            OptionValue::Integer(n) => serializer.serialize_i64(*n),
            OptionValue::Float(x) => serializer.serialize_f64(*x),
            OptionValue::String(s) => serializer.serialize_str(s),
            OptionValue::DateTime(dt) => serializer.serialize_str(&format_datetime(dt)),
            OptionValue::Array(items) => items.serialize(serializer),
        }
    }
}

/// Strings are kept as strings; a timestamp only becomes
/// [`OptionValue::DateTime`] when constructed from a chrono value.
impl<'de> Deserialize<'de> for OptionValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OptionValueVisitor;

        impl<'de> Visitor<'de> for OptionValueVisitor {
            type Value = OptionValue;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a bool, number, string or array")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(OptionValue::Bool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(OptionValue::Integer(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                i64::try_from(v)
                    .map(OptionValue::Integer)
                    .map_err(|_| E::custom(format!("integer {} out of range", v)))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(OptionValue::Float(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(OptionValue::String(v.to_string()))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(OptionValue::Array(items))
            }
        }

        deserializer.deserialize_any(OptionValueVisitor)
    }
}

/// Format a timestamp as `YYYY-MM-DDTHH:MM:SS+HH:MM`.
pub fn format_datetime(dt: &DateTime<FixedOffset>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Parse an RFC 3339 timestamp, keeping its offset.
pub fn parse_datetime(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s).ok()
}

/// Expand parameters into `key=value` query pairs.
///
/// Arrays become repeated `key[]` entries, which is how GitLab expects list
/// filters such as `iids[]=1&iids[]=2`.
pub fn query_pairs(params: &Params) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params {
        match value {
            OptionValue::Array(items) => {
                let array_key = format!("{}[]", key);
                for item in items {
                    pairs.push((array_key.clone(), item.to_wire_string()));
                }
            }
            scalar => pairs.push((key.clone(), scalar.to_wire_string())),
        }
    }
    pairs
}

/// Convert parameters into a JSON object for request bodies.
pub fn to_json(params: &Params) -> serde_json::Value {
    serde_json::Value::Object(
        params
            .iter()
            .map(|(k, v)| (k.clone(), option_value_to_json(v)))
            .collect(),
    )
}

fn option_value_to_json(value: &OptionValue) -> serde_json::Value {
    match value {
        OptionValue::Bool(b) => serde_json::Value::Bool(*b),
        OptionValue::Integer(n) => serde_json::Value::from(*n),
        OptionValue::Float(x) => serde_json::Value::from(*x),
        OptionValue::String(s) => serde_json::Value::String(s.clone()),
        OptionValue::DateTime(dt) => serde_json::Value::String(format_datetime(dt)),
        OptionValue::Array(items) => {
            serde_json::Value::Array(items.iter().map(option_value_to_json).collect())
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Integer(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        OptionValue::Integer(i64::from(value))
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        OptionValue::Integer(i64::from(value))
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Float(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::String(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::String(value)
    }
}

impl From<DateTime<FixedOffset>> for OptionValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        OptionValue::DateTime(value)
    }
}

impl From<DateTime<Utc>> for OptionValue {
    fn from(value: DateTime<Utc>) -> Self {
        OptionValue::DateTime(value.fixed_offset())
    }
}

impl<T: Into<OptionValue>> From<Vec<T>> for OptionValue {
    fn from(values: Vec<T>) -> Self {
        OptionValue::Array(values.into_iter().map(Into::into).collect())
    }
}

/// Build a [`Params`] map from `key => value` pairs.
///
/// ```rust
/// use glapi_core::params;
///
/// let p = params! { "state" => "opened", "iids" => vec![1, 2] };
/// assert_eq!(p.len(), 2);
/// ```
#[macro_export]
macro_rules! params {
    () => { $crate::options::Params::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::options::Params::new();
        $(map.insert(($key).to_string(), $crate::options::OptionValue::from($value));)+
        map
    }};
}

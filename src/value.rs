use crate::error::RsfError;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use smol_str::SmolStr;

// ─── Value ──────────────────────────────────────────────────────────────────

/// A dynamic record value, paired with a [`Schema`](crate::schema::Schema)
/// when handed to the writer.
///
/// `Struct` keeps its fields as an ordered list of `(name, value)` pairs, but
/// the writer walks the schema's declaration order and looks fields up by
/// name, so value-side ordering never reaches the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(SmolStr),
    Bool(bool),
    Int(i64),
    Float(f64),
    Struct(Vec<(SmolStr, Value)>),
    Array(Vec<Value>),
}

// ─── Accessors ──────────────────────────────────────────────────────────────

impl Value {
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[inline]
    pub fn as_struct(&self) -> Option<&[(SmolStr, Value)]> {
        match self {
            Value::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Field access by name. Linear scan; records are small and ordered.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.as_struct()?
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    #[inline]
    pub fn is_struct(&self) -> bool {
        matches!(self, Value::Struct(_))
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Build a struct value from `(name, value)` pairs.
    pub fn record<N, V>(fields: impl IntoIterator<Item = (N, V)>) -> Value
    where
        N: Into<SmolStr>,
        V: Into<Value>,
    {
        Value::Struct(
            fields
                .into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        )
    }
}

// ─── From impls ─────────────────────────────────────────────────────────────

impl From<&str> for Value {
    #[inline]
    fn from(s: &str) -> Self {
        Value::Str(SmolStr::from(s))
    }
}

impl From<String> for Value {
    #[inline]
    fn from(s: String) -> Self {
        Value::Str(SmolStr::from(s))
    }
}

impl From<SmolStr> for Value {
    #[inline]
    fn from(s: SmolStr) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    #[inline]
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

// ─── Serialize ──────────────────────────────────────────────────────────────

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Str(s) => serializer.serialize_str(s.as_str()),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Struct(fields) => {
                let mut m = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields {
                    m.serialize_entry(k.as_str(), v)?;
                }
                m.end()
            }
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for v in items {
                    seq.serialize_element(v)?;
                }
                seq.end()
            }
        }
    }
}

// ─── From/Into serde_json::Value ────────────────────────────────────────────

impl TryFrom<serde_json::Value> for Value {
    type Error = RsfError;

    /// The wire format has no null, so JSON `null` is rejected rather than
    /// coerced. Integers outside i64 are rejected for the same reason.
    fn try_from(v: serde_json::Value) -> Result<Self, RsfError> {
        Ok(match v {
            serde_json::Value::Null => {
                return Err(RsfError::InvalidValue("null has no wire representation".into()))
            }
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(f) = n.as_f64() {
                    Value::Float(f)
                } else {
                    return Err(RsfError::InvalidValue(format!("number {} exceeds i64", n)));
                }
            }
            serde_json::Value::String(s) => Value::Str(SmolStr::from(s)),
            serde_json::Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(Value::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            serde_json::Value::Object(obj) => Value::Struct(
                obj.into_iter()
                    .map(|(k, v)| Ok((SmolStr::from(k), Value::try_from(v)?)))
                    .collect::<Result<_, RsfError>>()?,
            ),
        })
    }
}

impl From<Value> for serde_json::Value {
    fn from(val: Value) -> Self {
        match val {
            Value::Str(s) => serde_json::Value::String(s.to_string()),
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(i) => serde_json::json!(i),
            Value::Float(f) => serde_json::json!(f),
            Value::Struct(fields) => serde_json::Value::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v.into()))
                    .collect(),
            ),
            Value::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

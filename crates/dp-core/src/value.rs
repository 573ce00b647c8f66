//! Dynamically-typed metadata tree.
//!
//! Template front matter is parsed elsewhere (YAML, JSON) and handed over as a
//! nested mapping. `Value<S>` models that tree as a tagged variant so code that
//! walks it can pattern match instead of inspecting types at runtime. The extra
//! [`Value::Schema`] variant holds a resolved schema handle of type `S`.

use std::collections::BTreeMap;

use serde::Serialize;

/// String-keyed mapping node of a metadata tree.
pub type Map<S> = BTreeMap<String, Value<S>>;

/// A node of a metadata tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value<S> {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Array(Vec<Value<S>>),
    Object(Map<S>),
    /// A resolved schema handle. Serializes as the handle's own representation.
    Schema(S),
}

impl<S> Value<S> {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_object(&self) -> Option<&Map<S>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object_mut(&mut self) -> Option<&mut Map<S>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_schema(&self) -> Option<&S> {
        match self {
            Self::Schema(schema) => Some(schema),
            _ => None,
        }
    }
}

impl<S> From<serde_json::Value> for Value<S> {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl<S> From<&str> for Value<S> {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl<S> From<String> for Value<S> {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<S> From<bool> for Value<S> {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<S> From<i64> for Value<S> {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl<S> From<Map<S>> for Value<S> {
    fn from(value: Map<S>) -> Self {
        Self::Object(value)
    }
}

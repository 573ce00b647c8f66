//! JSON-Schema-shaped schema handle.
//!
//! The registry treats schemas opaquely through [`SchemaHandle`]; `Schema` is
//! the handle used when no other schema library is plugged in. Keywords the
//! struct does not name are kept verbatim in [`Schema::extra`].

use std::collections::BTreeMap;

use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::handle::SchemaHandle;

/// The `type` keyword: a single type name or a union such as `["string", "null"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeName {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for TypeName {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<String> for TypeName {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TypeName>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Named sub-schemas, ordered by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<serde_json::Value>,

    /// Any other keywords (`$schema`, `$defs`, `format`, `additionalProperties`, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SchemaHandle for Schema {}

impl Schema {
    /// Schema with only its `type` set.
    #[must_use]
    pub fn typed(kind: impl Into<TypeName>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    /// Titled `object` schema, ready for [`Schema::with_property`].
    #[must_use]
    pub fn object(title: impl Into<String>) -> Self {
        Self::typed("object").with_title(title)
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, schema: Self) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    #[must_use]
    pub fn with_items(mut self, items: Self) -> Self {
        self.items = Some(Box::new(items));
        self
    }

    #[must_use]
    pub fn with_required(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    /// The `type` keyword when it names exactly one type.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        match &self.kind {
            Some(TypeName::One(name)) => Some(name),
            _ => None,
        }
    }

    /// Parse a schema from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Conversion` if `value` is not a schema object.
    pub fn from_value(value: serde_json::Value) -> Result<Self, SchemaError> {
        Ok(serde_json::from_value(value)?)
    }

    /// JSON representation of this schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Conversion` if serialization fails.
    pub fn to_value(&self) -> Result<serde_json::Value, SchemaError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Generate the schema of a Rust type with [`schemars::schema_for!`].
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Conversion` if the generated schema uses a shape
    /// `Schema` cannot hold (for example a bare `true` sub-schema).
    pub fn for_type<T: JsonSchema>() -> Result<Self, SchemaError> {
        Self::from_value(serde_json::to_value(schema_for!(T))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn builder_serializes_as_json_schema() {
        let schema = Schema::object("Person")
            .with_property("name", Schema::typed("string"))
            .with_property("tags", Schema::typed("array").with_items(Schema::typed("string")))
            .with_required("name");

        assert_eq!(
            schema.to_value().expect("serialize"),
            json!({
                "type": "object",
                "title": "Person",
                "properties": {
                    "name": {"type": "string"},
                    "tags": {"type": "array", "items": {"type": "string"}}
                },
                "required": ["name"]
            })
        );
    }

    #[test]
    fn unknown_keywords_survive_conversion() {
        let raw = json!({
            "type": ["string", "null"],
            "format": "date-time",
            "enum": ["a", "b"]
        });
        let schema = Schema::from_value(raw.clone()).expect("parse");
        assert_eq!(
            schema.kind,
            Some(TypeName::Many(vec!["string".into(), "null".into()]))
        );
        assert_eq!(schema.type_name(), None);
        assert_eq!(schema.extra.get("format"), Some(&json!("date-time")));
        assert_eq!(schema.to_value().expect("serialize"), raw);
    }

    #[test]
    fn from_value_rejects_non_objects() {
        let err = Schema::from_value(json!("string")).unwrap_err();
        assert!(matches!(err, SchemaError::Conversion(_)));
    }

    #[derive(JsonSchema)]
    #[allow(dead_code)]
    struct Recipe {
        /// Dish name.
        name: String,
        servings: u32,
        notes: Option<String>,
    }

    #[test]
    fn for_type_uses_schemars_output() {
        let schema = Schema::for_type::<Recipe>().expect("generate");
        assert_eq!(schema.type_name(), Some("object"));
        assert_eq!(schema.title.as_deref(), Some("Recipe"));
        assert_eq!(schema.properties["name"].type_name(), Some("string"));
        assert_eq!(
            schema.properties["name"].description.as_deref(),
            Some("Dish name.")
        );
        assert_eq!(schema.properties["servings"].type_name(), Some("integer"));
        assert!(schema.required.contains(&"name".to_string()));
        assert!(schema.extra.contains_key("$schema"));
    }
}

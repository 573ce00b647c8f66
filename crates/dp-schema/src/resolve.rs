//! Schema reference resolution for template metadata.
//!
//! Template metadata may name its input and output schemas symbolically:
//!
//! ```yaml
//! input:
//!   schema: Person
//! output:
//!   schema: Summary
//! ```
//!
//! Resolution swaps each name for the schema it refers to. Everything else in
//! the tree is left as it was.

use std::fmt;

use dp_core::{get_map_mut, Map, Value};

use crate::error::SchemaError;
use crate::handle::SchemaHandle;
use crate::registry::SchemaRegistry;

/// Metadata section that may carry a schema reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Input,
    Output,
}

impl Section {
    /// Sections in resolution order.
    pub const ALL: [Self; 2] = [Self::Input, Self::Output];

    /// Key of this section in the metadata tree.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

const SCHEMA_KEY: &str = "schema";

impl<S: SchemaHandle> SchemaRegistry<S> {
    /// Replace `input.schema` and `output.schema` names in `metadata` with the
    /// schemas they refer to, in place.
    ///
    /// Absent sections and non-string `schema` entries (already resolved,
    /// inline, or missing) are skipped. Sections resolve independently: when
    /// `output` fails, a replacement already made in `input` stays.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::UnresolvedReference` if a name is found in
    /// neither the registry nor the external lookup.
    pub fn resolve_schema_references(&self, metadata: &mut Map<S>) -> Result<(), SchemaError> {
        for section in Section::ALL {
            self.resolve_section(metadata, section)?;
        }
        Ok(())
    }

    fn resolve_section(&self, metadata: &mut Map<S>, section: Section) -> Result<(), SchemaError> {
        let Some(fields) = get_map_mut(metadata, section.key()) else {
            return Ok(());
        };
        let Some(Value::String(name)) = fields.get(SCHEMA_KEY) else {
            return Ok(());
        };

        let Some(schema) = self.lookup_schema_from_any_source(name) else {
            tracing::warn!(%section, schema = %name, "unknown schema reference");
            return Err(SchemaError::UnresolvedReference {
                section,
                name: name.clone(),
            });
        };

        tracing::debug!(%section, schema = %name, "resolved schema reference");
        fields.insert(SCHEMA_KEY.to_string(), Value::Schema(schema));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Schema;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    type Tree = Value<Schema>;

    fn metadata(value: serde_json::Value) -> Map<Schema> {
        match Tree::from(value) {
            Value::Object(map) => map,
            other => panic!("expected object metadata, got {other:?}"),
        }
    }

    fn section_schema<'a>(metadata: &'a Map<Schema>, section: &str) -> Option<&'a Tree> {
        metadata.get(section)?.as_object()?.get(SCHEMA_KEY)
    }

    fn registry() -> SchemaRegistry<Schema> {
        let mut reg: SchemaRegistry<Schema> = SchemaRegistry::new();
        reg.define_schema("TestSchema", Schema::typed("string")).expect("define");
        reg
    }

    #[test]
    fn resolves_input_reference() {
        let reg = registry();
        let mut meta = metadata(json!({"input": {"schema": "TestSchema"}}));

        reg.resolve_schema_references(&mut meta).expect("resolve");
        assert_eq!(
            section_schema(&meta, "input"),
            Some(&Tree::Schema(Schema::typed("string")))
        );
    }

    #[test]
    fn resolves_output_reference() {
        let reg = registry();
        let mut meta = metadata(json!({"output": {"schema": "TestSchema"}}));

        reg.resolve_schema_references(&mut meta).expect("resolve");
        assert_eq!(
            section_schema(&meta, "output"),
            Some(&Tree::Schema(Schema::typed("string")))
        );
    }

    #[test]
    fn unknown_reference_fails_with_section_and_name() {
        let reg = registry();
        let mut meta = metadata(json!({"input": {"schema": "NonExistentSchema"}}));

        let err = reg.resolve_schema_references(&mut meta).unwrap_err();
        assert!(!err.is_misuse());
        assert!(matches!(
            &err,
            SchemaError::UnresolvedReference { section: Section::Input, name }
                if name == "NonExistentSchema"
        ));
        assert_eq!(
            err.to_string(),
            "Unknown schema reference 'NonExistentSchema' in input.schema"
        );
        assert_eq!(
            section_schema(&meta, "input"),
            Some(&Tree::from("NonExistentSchema"))
        );
    }

    #[test]
    fn output_failure_keeps_input_replacement() {
        let reg = registry();
        let mut meta = metadata(json!({
            "input": {"schema": "TestSchema"},
            "output": {"schema": "Missing"}
        }));

        let err = reg.resolve_schema_references(&mut meta).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::UnresolvedReference { section: Section::Output, .. }
        ));
        assert_eq!(
            section_schema(&meta, "input"),
            Some(&Tree::Schema(Schema::typed("string")))
        );
    }

    #[test]
    fn absent_sections_and_non_string_schemas_are_untouched() {
        let reg = registry();
        let original = metadata(json!({
            "model": "gemini-pro",
            "input": {"default": {"name": "World"}},
            "output": {"schema": {"type": "object"}, "format": "json"},
            "config": {"schema": "TestSchema"}
        }));
        let mut meta = original.clone();

        reg.resolve_schema_references(&mut meta).expect("resolve");
        assert_eq!(meta, original);
    }

    #[test]
    fn non_mapping_section_is_skipped() {
        let reg = registry();
        let mut meta = metadata(json!({"input": "TestSchema", "output": null}));
        let original = meta.clone();

        reg.resolve_schema_references(&mut meta).expect("resolve");
        assert_eq!(meta, original);
    }

    #[test]
    fn resolution_is_idempotent() {
        let reg = registry();
        let mut meta = metadata(json!({"input": {"schema": "TestSchema"}}));

        reg.resolve_schema_references(&mut meta).expect("first pass");
        let resolved = meta.clone();
        reg.resolve_schema_references(&mut meta).expect("second pass");
        assert_eq!(meta, resolved);
    }

    #[test]
    fn falls_back_to_external_lookup() {
        let mut reg = registry();
        reg.register_external_schema_lookup(|name: &str| {
            (name == "Remote").then(|| Schema::object("Remote"))
        });
        let mut meta = metadata(json!({
            "input": {"schema": "TestSchema"},
            "output": {"schema": "Remote"}
        }));

        reg.resolve_schema_references(&mut meta).expect("resolve");
        assert_eq!(
            section_schema(&meta, "output"),
            Some(&Tree::Schema(Schema::object("Remote")))
        );
    }

    #[test]
    fn section_display_matches_tree_key() {
        assert_eq!(Section::Input.to_string(), "input");
        assert_eq!(Section::Output.to_string(), "output");
    }
}

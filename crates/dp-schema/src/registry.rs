//! Name-keyed schema registry.
//!
//! The `SchemaRegistry` owns every locally defined schema and at most one
//! external lookup. Local definitions always shadow the external lookup, so a
//! caller can override a host-wide schema for a single session.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use crate::error::SchemaError;
use crate::handle::{create_copy, SchemaHandle};
use crate::lookup::SchemaLookup;

/// Store of named schemas with a replaceable external fallback.
///
/// Not internally synchronized; see the crate docs.
pub struct SchemaRegistry<S> {
    schemas: HashMap<String, S>,
    external: Option<Box<dyn SchemaLookup<S>>>,
}

impl<S: SchemaHandle> SchemaRegistry<S> {
    /// Empty registry with no external lookup.
    #[must_use]
    pub fn new() -> Self {
        Self {
            schemas: HashMap::new(),
            external: None,
        }
    }

    /// Registry pre-populated with `schemas`, defined in iteration order.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidArgument` if any name is empty or any
    /// schema is absent.
    pub fn with_schemas<I, K>(schemas: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = (K, S)>,
        K: AsRef<str>,
    {
        let mut registry = Self::new();
        for (name, schema) in schemas {
            registry.define_schema(name.as_ref(), schema)?;
        }
        Ok(registry)
    }

    /// Register `schema` under `name`, replacing any previous definition.
    ///
    /// Returns the stored schema. Redefinition is not an error: templates are
    /// re-evaluated often during development and the last write wins.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidArgument` if `name` is empty or `schema`
    /// is `None` or absent (see [`SchemaHandle::is_absent`]).
    pub fn define_schema(
        &mut self,
        name: &str,
        schema: impl Into<Option<S>>,
    ) -> Result<&S, SchemaError> {
        if name.is_empty() {
            return Err(SchemaError::InvalidArgument(
                "schema name must not be empty".to_string(),
            ));
        }
        let Some(schema) = schema.into().filter(|s| !s.is_absent()) else {
            return Err(SchemaError::InvalidArgument(format!(
                "schema '{name}' must not be absent"
            )));
        };

        let stored = match self.schemas.entry(name.to_string()) {
            Entry::Occupied(mut entry) => {
                tracing::debug!(schema = name, overwrite = true, "defined schema");
                entry.insert(schema);
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                tracing::debug!(schema = name, overwrite = false, "defined schema");
                entry.insert(schema)
            }
        };
        Ok(stored)
    }

    /// Get a locally defined schema by name. Returns `None` if not found.
    #[must_use]
    pub fn lookup_schema(&self, name: &str) -> Option<&S> {
        self.schemas.get(name)
    }

    /// Install the fallback consulted on a local miss, replacing any
    /// previously installed lookup.
    pub fn register_external_schema_lookup(&mut self, lookup: impl SchemaLookup<S> + 'static) {
        if self.external.is_some() {
            tracing::debug!("replacing external schema lookup");
        } else {
            tracing::debug!("installed external schema lookup");
        }
        self.external = Some(Box::new(lookup));
    }

    /// Resolve `name` from the local registry, then the external lookup.
    ///
    /// A local hit is returned as an independent copy of the stored schema.
    /// Returns `None` when neither source knows the name. An absent handle
    /// from the external lookup counts as a miss.
    #[must_use]
    pub fn lookup_schema_from_any_source(&self, name: &str) -> Option<S> {
        if let Some(schema) = self.schemas.get(name) {
            tracing::trace!(schema = name, source = "local", "schema lookup hit");
            return Some(create_copy(schema));
        }

        let found = self
            .external
            .as_ref()?
            .lookup(name)
            .filter(|schema| !schema.is_absent());
        tracing::trace!(
            schema = name,
            source = "external",
            hit = found.is_some(),
            "schema lookup"
        );
        found
    }

    #[must_use]
    pub fn has_external_lookup(&self) -> bool {
        self.external.is_some()
    }

    /// List all locally defined schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of locally defined schemas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl<S: SchemaHandle> Default for SchemaRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for SchemaRegistry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.schemas.keys().collect();
        names.sort_unstable();
        f.debug_struct("SchemaRegistry")
            .field("schemas", &names)
            .field("external", &self.external.is_some())
            .finish()
    }
}

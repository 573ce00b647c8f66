//! External schema lookups.
//!
//! A host environment supplies schemas the registry does not hold (files,
//! remote catalogs, built-in names) through [`SchemaLookup`]. The registry
//! consults its lookup only after a local miss.
//!
//! Lookups are expected to be synchronous and free of side effects visible to
//! the resolver. They may be called from whichever thread holds the registry,
//! and any blocking they do is theirs to bound.

use crate::schema::Schema;

/// Fallback source of schemas by name.
pub trait SchemaLookup<S>: Send + Sync {
    /// The schema registered under `name`, or `None` if this source has none.
    fn lookup(&self, name: &str) -> Option<S>;
}

impl<S, F> SchemaLookup<S> for F
where
    F: Fn(&str) -> Option<S> + Send + Sync,
{
    fn lookup(&self, name: &str) -> Option<S> {
        self(name)
    }
}

/// Several lookups tried in insertion order. The first hit wins.
pub struct LookupChain<S> {
    sources: Vec<Box<dyn SchemaLookup<S>>>,
}

impl<S> LookupChain<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Append a source consulted after every source already in the chain.
    #[must_use]
    pub fn then(mut self, source: impl SchemaLookup<S> + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl<S> Default for LookupChain<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> SchemaLookup<S> for LookupChain<S> {
    fn lookup(&self, name: &str) -> Option<S> {
        self.sources.iter().find_map(|source| source.lookup(name))
    }
}

/// Reserved scalar names answered by [`ScalarSchemas`]. `any` maps to the
/// empty schema, which accepts every value.
pub const SCALAR_TYPES: [&str; 6] = ["string", "number", "integer", "boolean", "null", "any"];

/// Built-in lookup for the reserved scalar type names.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarSchemas;

impl ScalarSchemas {
    fn resolve(name: &str) -> Option<Schema> {
        match name {
            "any" => Some(Schema::default()),
            _ if SCALAR_TYPES.contains(&name) => Some(Schema::typed(name)),
            _ => None,
        }
    }
}

impl SchemaLookup<Schema> for ScalarSchemas {
    fn lookup(&self, name: &str) -> Option<Schema> {
        Self::resolve(name)
    }
}

impl SchemaLookup<serde_json::Value> for ScalarSchemas {
    fn lookup(&self, name: &str) -> Option<serde_json::Value> {
        Self::resolve(name).and_then(|schema| schema.to_value().ok())
    }
}

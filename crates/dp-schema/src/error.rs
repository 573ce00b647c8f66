//! Schema registry error types.

use thiserror::Error;

use crate::resolve::Section;

/// Errors from the schema registry and reference resolver.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The caller broke the registration contract (empty name, absent schema).
    /// Retrying without fixing the call cannot succeed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A schema name in template metadata matched no local or external schema.
    #[error("Unknown schema reference '{name}' in {section}.schema")]
    UnresolvedReference { section: Section, name: String },

    /// A schema could not be converted to or from its JSON representation.
    #[error("Schema conversion error: {0}")]
    Conversion(#[from] serde_json::Error),
}

impl SchemaError {
    /// Whether this error reports caller misuse rather than missing data.
    #[must_use]
    pub const fn is_misuse(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

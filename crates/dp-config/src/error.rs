//! Configuration error types.

use dp_schema::SchemaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A configured schema could not be defined in the registry.
    #[error("Invalid configured schema: {0}")]
    Registry(#[from] SchemaError),
}

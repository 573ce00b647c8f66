//! # dp-config
//!
//! Layered configuration for the schema registry using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`DOTPROMPT_*` prefix, `__` as separator)
//! 2. Project-level `.dotprompt/config.toml`
//! 3. User-level `~/.config/dotprompt/config.toml`
//! 4. Built-in defaults
//!
//! # Example
//!
//! ```toml
//! builtin_scalars = true
//!
//! [schemas.Person]
//! type = "object"
//! title = "Person"
//! required = ["name"]
//!
//! [schemas.Person.properties.name]
//! type = "string"
//! ```
//!
//! `DOTPROMPT_BUILTIN_SCALARS=false` turns the scalar names off;
//! `DOTPROMPT_SCHEMAS__TAG__TYPE=string` defines a `tag` schema.

mod error;

pub use error::ConfigError;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use dp_schema::{ScalarSchemas, Schema, SchemaRegistry};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "DOTPROMPT_";

const fn default_builtin_scalars() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistryConfig {
    /// Answer the reserved scalar names (`string`, `number`, `integer`,
    /// `boolean`, `null`, `any`) through the registry's external lookup.
    #[serde(default = "default_builtin_scalars")]
    pub builtin_scalars: bool,

    /// Schemas defined in the registry at construction, by name.
    #[serde(default)]
    pub schemas: BTreeMap<String, Schema>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            builtin_scalars: default_builtin_scalars(),
            schemas: BTreeMap::new(),
        }
    }
}

impl RegistryConfig {
    /// Load configuration from the user-global and project-local TOML files
    /// and `DOTPROMPT_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be read or a value
    /// has the wrong shape.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration from an explicit TOML file plus environment
    /// variables, skipping the global and project files.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if the file or a variable does not parse.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(ConfigError::from)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".dotprompt/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dotprompt").join("config.toml"))
    }

    /// Build a registry holding every configured schema, with the scalar
    /// lookup installed when `builtin_scalars` is set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Registry` if a configured schema name is empty.
    pub fn build_registry(&self) -> Result<SchemaRegistry<Schema>, ConfigError> {
        let mut registry = SchemaRegistry::with_schemas(self.schemas.clone())?;
        if self.builtin_scalars {
            registry.register_external_schema_lookup(ScalarSchemas);
        }
        tracing::debug!(
            schemas = registry.len(),
            builtin_scalars = self.builtin_scalars,
            "built schema registry from config"
        );
        Ok(registry)
    }
}

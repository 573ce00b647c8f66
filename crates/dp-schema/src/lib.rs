//! # dp-schema
//!
//! Schema registry and reference resolution for prompt templates.
//!
//! This crate provides:
//! - `SchemaHandle`: the capability a schema type needs to live in the registry
//!   (structural equality plus an independent deep copy)
//! - `Schema`: a JSON-Schema-shaped handle, buildable from Rust types via `schemars`
//! - `SchemaRegistry`: name-keyed store with a single replaceable external lookup
//! - `SchemaLookup`, `LookupChain`, `ScalarSchemas`: pluggable fallback sources
//! - Reference resolution: replacing `input.schema` / `output.schema` names in a
//!   metadata tree with resolved handles
//!
//! ## Concurrency
//!
//! The registry is plain owned state with no internal locking. Share it across
//! threads behind a `Mutex` or `RwLock`. External lookups must be `Send + Sync`
//! so a locked registry stays shareable; a lookup that blocks or does I/O must
//! bound that itself.

mod error;
mod handle;
mod lookup;
mod registry;
mod resolve;
mod schema;

pub use error::SchemaError;
pub use handle::{create_copy, SchemaHandle};
pub use lookup::{LookupChain, ScalarSchemas, SchemaLookup, SCALAR_TYPES};
pub use registry::SchemaRegistry;
pub use resolve::Section;
pub use schema::{Schema, TypeName};

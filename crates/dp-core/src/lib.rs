//! # dp-core
//!
//! Foundational types shared by the dotprompt schema crates:
//! - `Value<S>`: the dynamically-typed metadata tree a template's front matter
//!   parses into, with a dedicated variant for resolved schema handles
//! - Map and string helpers used by the registry and the reference resolver
//!
//! The tree is generic over the schema handle type `S` so this crate never
//! needs to know what a schema looks like.

pub mod util;
pub mod value;

pub use util::{
    copy_mapping, get_map, get_map_mut, merge_maps, string_or_empty,
    trim_unicode_spaces_except_newlines,
};
pub use value::{Map, Value};

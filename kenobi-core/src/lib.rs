//! Core utilities and types for the pluginkenobi generator.
//!
//! This crate provides the fundamental pieces shared by the recipe and
//! code generation crates: Moodle component names, namespace helpers and
//! exclusive file writes.

mod component;
mod error;
mod file;
mod utils;

// Component names
pub use component::{PLUGIN_TYPES, PluginComponent};
pub use error::{Error, Result};
// File operations
pub use file::{File, ensure_dir};
// String utilities
pub use utils::{
    has_namespace, humanize, is_php_identifier, last_namespace_segment, split_callback, trim_quotes,
};

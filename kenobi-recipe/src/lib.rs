//! Recipe loading and option validation for pluginkenobi.
//!
//! A [`Recipe`] is the YAML document describing a plugin. Feature options
//! are checked by the [`OptionValidator`] against a [`Catalog`] of Moodle
//! constants, usually through a [`ValidationContext`] so that errors name
//! the feature and recipe location at fault.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod catalog;
mod config;
mod context;
mod error;
mod recipe;
mod validate;
mod value;

pub use catalog::{
    ANY_VERSION, CAPABILITY_TYPES, CONTEXT_LEVELS, Catalog, MATURITY_LEVELS, PERMISSIONS,
    RISK_BITMASKS,
};
pub use config::Config;
pub use context::ValidationContext;
pub use error::{Error, ErrorCategory, Result};
pub use recipe::{Author, Recipe};
pub use validate::{OptionError, OptionSpec, OptionValidator, Rule};
pub use value::{is_empty_value, is_requested, value_to_string};

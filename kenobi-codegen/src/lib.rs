//! Feature composition and file generation for pluginkenobi.
//!
//! # Module Organization
//!
//! - [`schema`] - Per plugin type feature catalogs
//! - [`composer`] - Turns a recipe into a composed recipe and output entries
//! - [`helpers`] - Generators owning one feature each (events, observers, ...)
//! - [`generator`] - One generator per supported plugin type
//! - [`emitter`] - Renders entries and writes them under the plugin root
//! - [`template`] - Bundled Handlebars templates

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod composer;
pub mod emitter;
mod error;
pub mod generator;
pub mod helpers;
mod output;
pub mod schema;
pub mod template;

pub use composer::{Composition, RecipeComposer};
pub use emitter::{FileEmitter, PreviewEntry, WriteStats};
pub use error::{Error, Result};
pub use generator::{
    LocalGenerator, ModGenerator, PluginGenerator, SUPPORTED_PLUGIN_TYPES, ToolGenerator,
    generator_for, generator_for_recipe,
};
pub use helpers::{HelperGenerator, HelperKind};
pub use output::{OutputFileEntry, Scope, check_unique_paths};
pub use schema::{
    ALL_FEATURES, CORE, CORE_FEATURE, FeatureBinding, FeatureSpec, FileBinding, INLINE_SETTINGS,
    PluginSchema,
};
pub use template::TemplateEngine;

//! Plugin type generators.

use std::path::Path;

use pluginkenobi_recipe::{Error as RecipeError, OptionValidator, Recipe};

use crate::{Composition, FileEmitter, PluginSchema, RecipeComposer, Result, WriteStats};

/// Plugin types a generator exists for.
pub const SUPPORTED_PLUGIN_TYPES: &[&str] = &["local", "mod", "tool"];

/// Generates one plugin type.
///
/// Implementors only describe their schema; composition and writing are
/// shared.
pub trait PluginGenerator {
    /// Plugin type prefix of the components this generator handles.
    fn plugin_type(&self) -> &'static str;

    /// Features supported by this plugin type.
    fn schema(&self) -> &PluginSchema;

    /// Directory under the Moodle root where these plugins live.
    fn default_location(&self) -> &'static str {
        self.schema().default_location()
    }

    /// Validate a recipe and collect the files to write.
    fn compose(&self, recipe: &Recipe, validator: &OptionValidator) -> Result<Composition> {
        RecipeComposer::new(self.schema(), validator).compose(recipe)
    }

    /// Write a composition under `root`.
    fn generate_files(
        &self,
        emitter: &FileEmitter,
        root: &Path,
        composition: &Composition,
    ) -> Result<WriteStats> {
        emitter.generate_files(root, &composition.recipe, &composition.entries)
    }
}

macro_rules! plugin_generator {
    ($(#[$meta:meta])* $name:ident, $plugin_type:literal, $schema:path) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name {
            schema: PluginSchema,
        }

        impl $name {
            pub fn new() -> Self {
                Self { schema: $schema() }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl PluginGenerator for $name {
            fn plugin_type(&self) -> &'static str {
                $plugin_type
            }

            fn schema(&self) -> &PluginSchema {
                &self.schema
            }
        }
    };
}

plugin_generator!(
    /// Local plugins.
    LocalGenerator,
    "local",
    PluginSchema::local
);
plugin_generator!(
    /// Activity modules.
    ModGenerator,
    "mod",
    PluginSchema::module
);
plugin_generator!(
    /// Admin tools.
    ToolGenerator,
    "tool",
    PluginSchema::tool
);

/// The generator for a plugin type, if one exists.
pub fn generator_for(plugin_type: &str) -> Option<Box<dyn PluginGenerator>> {
    match plugin_type {
        "local" => Some(Box::new(LocalGenerator::new())),
        "mod" => Some(Box::new(ModGenerator::new())),
        "tool" => Some(Box::new(ToolGenerator::new())),
        _ => None,
    }
}

/// The generator for the plugin type of a recipe's component.
pub fn generator_for_recipe(recipe: &Recipe) -> Result<Box<dyn PluginGenerator>> {
    let component = recipe.component()?;
    generator_for(component.plugin_type()).ok_or_else(|| {
        RecipeError::unsupported_plugin_type(component.plugin_type(), SUPPORTED_PLUGIN_TYPES)
            .into()
    })
}

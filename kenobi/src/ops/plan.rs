//! Plan operation - recipe validation and composition.

use pluginkenobi_codegen::{Composition, PluginGenerator, Result, generator_for_recipe};
use pluginkenobi_recipe::{Config, OptionValidator, Recipe};
use tracing::debug;

/// A composed recipe and the generator for its plugin type.
pub struct Plan {
    pub generator: Box<dyn PluginGenerator>,
    pub composition: Composition,
}

/// Validate and compose a recipe.
///
/// Release tokens from the configuration extend the built-in catalog.
pub fn plan(recipe: &Recipe, config: &Config) -> Result<Plan> {
    let validator = OptionValidator::new(config.catalog());
    let generator = generator_for_recipe(recipe)?;
    let composition = generator.compose(recipe, &validator)?;

    debug!(
        component = %composition.component,
        files = composition.entries.len(),
        "composed recipe"
    );

    Ok(Plan {
        generator,
        composition,
    })
}

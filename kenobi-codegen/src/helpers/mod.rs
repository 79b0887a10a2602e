//! Helper generators.
//!
//! A helper owns one feature end to end: it validates the feature's
//! options from the raw recipe, builds its own template scope and
//! contributes the files it renders. Helpers never see the composed
//! recipe.
//!
//! Repeated helpers (`events`, `observers`, `capabilities`) expect a list
//! under `features.<name>` and validate every element. The others accept
//! `true` or an option map.

mod capabilities;
mod events;
mod install;
mod lib_file;
mod observers;
mod settings;
mod uninstall;
mod upgrade;

use std::path::Path;

use pluginkenobi_core::PluginComponent;
use pluginkenobi_recipe::{Error as RecipeError, OptionSpec, OptionValidator, Recipe, ValidationContext};
use serde_json::{Map, Value};

pub use capabilities::CapabilitiesGenerator;
pub use events::{DEFAULT_EVENT_BASE, EventsGenerator};
pub use install::InstallGenerator;
pub use lib_file::LibGenerator;
pub use observers::ObserversGenerator;
pub use settings::SettingsGenerator;
pub use uninstall::UninstallGenerator;
pub use upgrade::UpgradeGenerator;

use crate::{FileEmitter, OutputFileEntry, Result, WriteStats};

/// A feature-scoped generator with its own options and files.
pub trait HelperGenerator {
    /// The feature this helper implements.
    fn feature(&self) -> &'static str;

    /// Files this helper contributes, each with its own scope.
    fn output_files(&self) -> &[OutputFileEntry];

    /// Language strings the generated code looks up, as (identifier, text).
    fn lang_strings(&self) -> &[(String, String)] {
        &[]
    }

    /// Render and write this helper's files under the plugin root.
    fn generate_files(&self, emitter: &FileEmitter, root: &Path) -> Result<WriteStats> {
        emitter.generate_files(root, &Map::new(), self.output_files())
    }
}

/// The helper generators a schema can delegate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelperKind {
    Settings,
    Capabilities,
    Observers,
    Events,
    Lib,
    Uninstall,
    Install,
    Upgrade,
}

impl HelperKind {
    /// Feature name under `features`.
    pub fn feature(self) -> &'static str {
        match self {
            HelperKind::Settings => "settings",
            HelperKind::Capabilities => "capabilities",
            HelperKind::Observers => "observers",
            HelperKind::Events => "events",
            HelperKind::Lib => "lib",
            HelperKind::Uninstall => "uninstall",
            HelperKind::Install => "install",
            HelperKind::Upgrade => "upgrade",
        }
    }

    /// Options every instance must set.
    pub fn required_options(self) -> &'static [OptionSpec] {
        match self {
            HelperKind::Capabilities => capabilities::REQUIRED,
            HelperKind::Observers => observers::REQUIRED,
            HelperKind::Events => events::REQUIRED,
            _ => &[],
        }
    }

    /// Options an instance may set.
    pub fn optional_options(self) -> &'static [OptionSpec] {
        match self {
            HelperKind::Capabilities => capabilities::OPTIONAL,
            HelperKind::Observers => observers::OPTIONAL,
            HelperKind::Events => events::OPTIONAL,
            HelperKind::Lib => lib_file::OPTIONAL,
            HelperKind::Upgrade => upgrade::OPTIONAL,
            _ => &[],
        }
    }

    /// Whether the feature takes a list of instances.
    pub fn is_repeated(self) -> bool {
        matches!(
            self,
            HelperKind::Capabilities | HelperKind::Observers | HelperKind::Events
        )
    }

    /// Validate the feature from the raw recipe and build its generator.
    pub fn build(
        self,
        recipe: &Recipe,
        validator: &OptionValidator,
    ) -> Result<Box<dyn HelperGenerator>> {
        Ok(match self {
            HelperKind::Settings => Box::new(SettingsGenerator::new(recipe, validator)?),
            HelperKind::Capabilities => Box::new(CapabilitiesGenerator::new(recipe, validator)?),
            HelperKind::Observers => Box::new(ObserversGenerator::new(recipe, validator)?),
            HelperKind::Events => Box::new(EventsGenerator::new(recipe, validator)?),
            HelperKind::Lib => Box::new(LibGenerator::new(recipe, validator)?),
            HelperKind::Uninstall => Box::new(UninstallGenerator::new(recipe, validator)?),
            HelperKind::Install => Box::new(InstallGenerator::new(recipe, validator)?),
            HelperKind::Upgrade => Box::new(UpgradeGenerator::new(recipe, validator)?),
        })
    }
}

/// Keys every template scope carries for the license header and naming.
///
/// Fails when the component or author is missing or malformed.
pub fn boilerplate(recipe: &Recipe) -> Result<(PluginComponent, Map<String, Value>)> {
    let component = recipe.component()?;
    let author = recipe.author()?;

    let mut scope = Map::new();
    scope.insert("component".to_string(), Value::from(component.frankenstyle()));
    scope.insert("type".to_string(), Value::from(component.plugin_type()));
    scope.insert("plugin".to_string(), Value::from(component.name()));
    scope.insert("prefix".to_string(), Value::from(component.function_prefix()));
    scope.insert("year".to_string(), recipe.year());

    let mut author_scope = Map::new();
    author_scope.insert("name".to_string(), Value::from(author.name));
    author_scope.insert("email".to_string(), Value::from(author.email));
    scope.insert("author".to_string(), Value::Object(author_scope));

    if let Some(name) = recipe.get("name") {
        scope.insert("name".to_string(), name.clone());
    }

    Ok((component, scope))
}

/// Options of a non-repeated feature: `true` or absent means no options.
fn single_options(recipe: &Recipe, feature: &str) -> Result<Map<String, Value>> {
    match recipe.feature(feature) {
        None | Some(Value::Null) | Some(Value::Bool(true)) => Ok(Map::new()),
        Some(Value::Object(options)) => Ok(options.clone()),
        Some(_) => Err(RecipeError::invalid_feature(feature, "expected true or a map of options").into()),
    }
}

/// Boilerplate plus the validated options of a non-repeated feature.
fn single_scope(
    recipe: &Recipe,
    validator: &OptionValidator,
    feature: &'static str,
    optional: &[OptionSpec],
) -> Result<(PluginComponent, Map<String, Value>)> {
    let (component, mut scope) = boilerplate(recipe)?;
    let options = single_options(recipe, feature)?;
    let ctx = ValidationContext::new(validator, feature).push(format!("features.{}", feature));
    scope.extend(ctx.validate_options(&options, &[], optional)?);
    Ok((component, scope))
}

/// Validate every instance of a repeated feature.
fn repeated_instances(
    recipe: &Recipe,
    validator: &OptionValidator,
    feature: &'static str,
    required: &[OptionSpec],
    optional: &[OptionSpec],
) -> Result<Vec<Map<String, Value>>> {
    let instances = match recipe.feature(feature) {
        Some(Value::Array(instances)) if !instances.is_empty() => instances,
        _ => {
            return Err(RecipeError::invalid_feature(
                feature,
                format!("'features.{}' must be a non-empty list", feature),
            )
            .into());
        }
    };

    let ctx = ValidationContext::new(validator, feature).push(format!("features.{}", feature));
    let mut validated = Vec::with_capacity(instances.len());
    for (index, instance) in instances.iter().enumerate() {
        let ctx = ctx.index(index);
        let Value::Object(options) = instance else {
            return Err(RecipeError::invalid_feature(
                feature,
                format!("{} must be a map of options", ctx.location()),
            )
            .into());
        };
        validated.push(ctx.validate_options(options, required, optional)?);
    }

    Ok(validated)
}

//! Feature composition.
//!
//! The composer turns a raw recipe into the composed recipe and the list
//! of files to write. Inline features are validated here and rendered with
//! the composed recipe; delegated features are built by their helper and
//! contribute entries with their own scopes.

use pluginkenobi_core::PluginComponent;
use pluginkenobi_recipe::{
    Error as RecipeError, OptionValidator, Recipe, ValidationContext, is_requested,
};
use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    ALL_FEATURES, CORE_FEATURE, FeatureBinding, FeatureSpec, OutputFileEntry, PluginSchema,
    Result, check_unique_paths, helpers::boilerplate,
};

/// A validated recipe ready to be written.
#[derive(Debug, Clone)]
pub struct Composition {
    pub component: PluginComponent,
    /// Validated options plus boilerplate, the scope of inline templates.
    pub recipe: Map<String, Value>,
    /// Files to write, in feature order.
    pub entries: Vec<OutputFileEntry>,
    /// Features that were composed, core first.
    pub features: Vec<&'static str>,
}

impl Composition {
    /// Output paths relative to the plugin root.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.path.as_str())
    }
}

/// Composes recipes against a plugin schema.
#[derive(Debug)]
pub struct RecipeComposer<'a> {
    schema: &'a PluginSchema,
    validator: &'a OptionValidator,
}

impl<'a> RecipeComposer<'a> {
    pub fn new(schema: &'a PluginSchema, validator: &'a OptionValidator) -> Self {
        Self { schema, validator }
    }

    /// Names of the features to compose, in schema order.
    ///
    /// Core is always first. `all: true` requests every feature of the
    /// plugin type. Unknown feature names are rejected, including `core`
    /// which can't be requested explicitly. A `features` value that is not
    /// a map of toggles is rejected.
    pub fn requested_features(&self, recipe: &Recipe) -> Result<Vec<&'static str>> {
        let toggles = match recipe.get("features") {
            None | Some(Value::Null) => None,
            Some(Value::Object(toggles)) => Some(toggles),
            Some(_) => {
                return Err(RecipeError::invalid_feature(
                    "features",
                    "expected a map of features or a list of feature names",
                )
                .into());
            }
        };

        if let Some(toggles) = toggles {
            for name in toggles.keys() {
                if name == ALL_FEATURES {
                    continue;
                }
                if name == CORE_FEATURE || self.schema.feature(name).is_none() {
                    return Err(RecipeError::unknown_feature(
                        name.as_str(),
                        self.schema.plugin_type(),
                        &self.schema.optional_features(),
                    )
                    .into());
                }
            }
        }

        let all = recipe.wants_all_features();
        let requested = self
            .schema
            .features()
            .map(|(name, _)| name)
            .filter(|name| {
                *name == CORE_FEATURE
                    || all
                    || toggles
                        .and_then(|toggles| toggles.get(*name))
                        .is_some_and(is_requested)
            })
            .collect();

        Ok(requested)
    }

    /// Validate the recipe and collect every output entry.
    pub fn compose(&self, recipe: &Recipe) -> Result<Composition> {
        let component = recipe.component()?;
        if component.plugin_type() != self.schema.plugin_type() {
            return Err(RecipeError::unsupported_plugin_type(
                component.plugin_type(),
                &[self.schema.plugin_type()],
            )
            .into());
        }
        let (_, base) = boilerplate(recipe)?;

        let features = self.requested_features(recipe)?;
        let mut composed = Map::new();
        let mut feature_options = Map::new();
        let mut entries = Vec::new();
        let mut strings = Vec::new();

        for name in &features {
            let Some(binding) = self.schema.feature(name) else {
                continue;
            };
            debug!(feature = name, plugin_type = self.schema.plugin_type(), "composing feature");

            match binding {
                FeatureBinding::Inline(spec) if *name == CORE_FEATURE => {
                    let ctx = ValidationContext::new(self.validator, CORE_FEATURE);
                    composed.extend(ctx.validate_options(recipe.data(), spec.required, spec.optional)?);
                    entries.extend(inline_entries(spec, &component));
                }
                FeatureBinding::Inline(spec) => {
                    let options = inline_options(recipe, name)?;
                    let ctx = ValidationContext::new(self.validator, name)
                        .push(format!("features.{}", name));
                    let validated = ctx.validate_options(&options, spec.required, spec.optional)?;
                    feature_options.insert(name.to_string(), Value::Object(validated));
                    entries.extend(inline_entries(spec, &component));
                }
                FeatureBinding::Delegated(kind) => {
                    let helper = kind.build(recipe, self.validator)?;
                    entries.extend(helper.output_files().iter().cloned());
                    strings.extend(helper.lang_strings().iter().map(|(key, text)| {
                        let mut string = Map::new();
                        string.insert("key".to_string(), Value::from(key.as_str()));
                        string.insert("text".to_string(), Value::from(text.as_str()));
                        Value::Object(string)
                    }));
                }
            }
        }

        composed.extend(base);
        if !strings.is_empty() {
            composed.insert("strings".to_string(), Value::Array(strings));
        }
        if !feature_options.is_empty() {
            composed.insert("features".to_string(), Value::Object(feature_options));
        }

        check_unique_paths(&entries)?;

        Ok(Composition {
            component,
            recipe: composed,
            entries,
            features,
        })
    }
}

fn inline_entries<'s>(
    spec: &'s FeatureSpec,
    component: &'s PluginComponent,
) -> impl Iterator<Item = OutputFileEntry> + 's {
    spec.files
        .iter()
        .map(|binding| OutputFileEntry::recipe(binding.template, binding.resolve(component)))
}

/// Options of an inline feature: `true` means no options.
fn inline_options(recipe: &Recipe, feature: &str) -> Result<Map<String, Value>> {
    match recipe.feature(feature) {
        None | Some(Value::Null) | Some(Value::Bool(true)) => Ok(Map::new()),
        Some(Value::Object(options)) => Ok(options.clone()),
        Some(_) => Err(RecipeError::invalid_feature(feature, "expected true or a map of options").into()),
    }
}

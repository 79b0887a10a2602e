use std::{path::Path, str::FromStr};

use chrono::Datelike;
use pluginkenobi_core::PluginComponent;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    Error, Result,
    value::{is_empty_value, value_to_string},
};

/// Default filename used in error reports when parsing from a string.
const DEFAULT_FILENAME: &str = "recipe.yaml";

/// A plugin recipe as loaded from YAML.
///
/// The recipe keeps the document as a generic map so that features can
/// carry arbitrary options. A few shorthand forms are rewritten on load:
///
/// - `author` given as a list of single-key maps is folded into one map.
/// - `features` given as a list of single-key maps or feature names is
///   folded into one map, a bare name meaning `<name>: true`.
/// - capabilities given as `{<name>: [...]}` or `{<name>: {...}}` get an
///   explicit `name` key.
/// - archetypes given as `{<role>: <permission>}` become
///   `{role, permission}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    data: Map<String, Value>,
}

/// Plugin author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub email: String,
}

impl FromStr for Recipe {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, DEFAULT_FILENAME)
    }
}

impl Recipe {
    /// Load a recipe from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        debug!(path = %path.display(), "loaded recipe");
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse a recipe from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let value: Value =
            serde_yaml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
        Self::from_value(value)
    }

    /// Build a recipe from an already parsed document.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut data) = value else {
            return Err(Box::new(Error::NotAMapping));
        };

        if let Some(author) = data.get_mut("author") {
            fold_single_key_list(author);
        }

        if let Some(features) = data.get_mut("features") {
            fold_feature_list(features);
            if let Some(Value::Array(capabilities)) = features.get_mut("capabilities") {
                for capability in capabilities.iter_mut() {
                    normalize_capability(capability);
                }
            }
        }

        Ok(Self { data })
    }

    /// The raw recipe document.
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Get a top-level recipe value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// The plugin component, parsed from the `component` key.
    pub fn component(&self) -> Result<PluginComponent> {
        let component = match self.data.get("component") {
            Some(value) if !is_empty_value(value) => value_to_string(value),
            _ => return Err(Error::missing_field("component")),
        };
        Ok(component.parse::<PluginComponent>()?)
    }

    /// The plugin author. Both name and email are required.
    pub fn author(&self) -> Result<Author> {
        let author = match self.data.get("author") {
            Some(Value::Object(author)) => author,
            _ => return Err(Error::missing_field("author")),
        };

        let field = |key: &str| match author.get(key) {
            Some(value) if !is_empty_value(value) => Ok(value_to_string(value)),
            _ => Err(Error::missing_field(format!("author.{}", key))),
        };

        Ok(Author {
            name: field("name")?,
            email: field("email")?,
        })
    }

    /// The `features` map, if the recipe has one.
    pub fn features(&self) -> Option<&Map<String, Value>> {
        self.data.get("features").and_then(Value::as_object)
    }

    /// The value of a feature toggle or option block.
    pub fn feature(&self, name: &str) -> Option<&Value> {
        self.features().and_then(|features| features.get(name))
    }

    /// Whether `features.all` requests every feature.
    pub fn wants_all_features(&self) -> bool {
        matches!(self.feature("all"), Some(Value::Bool(true)))
    }

    /// Copyright year, defaulting to the current year.
    pub fn year(&self) -> Value {
        match self.data.get("year") {
            Some(year) if !is_empty_value(year) => year.clone(),
            _ => Value::from(chrono::Local::now().year()),
        }
    }
}

/// Fold `[{a: 1}, {b: 2}]` into `{a: 1, b: 2}`. Any other shape is left alone.
fn fold_single_key_list(value: &mut Value) {
    let Value::Array(items) = value else {
        return;
    };

    let foldable = items
        .iter()
        .all(|item| matches!(item, Value::Object(map) if map.len() == 1));
    if !foldable {
        return;
    }

    let mut folded = Map::new();
    for item in items.drain(..) {
        if let Value::Object(map) = item {
            folded.extend(map);
        }
    }
    *value = Value::Object(folded);
}

/// Like [`fold_single_key_list`], but a plain string item is a toggle.
fn fold_feature_list(value: &mut Value) {
    if let Value::Array(items) = value {
        for item in items.iter_mut() {
            if let Value::String(name) = item {
                let mut toggle = Map::new();
                toggle.insert(std::mem::take(name), Value::Bool(true));
                *item = Value::Object(toggle);
            }
        }
    }
    fold_single_key_list(value);
}

fn normalize_capability(capability: &mut Value) {
    let Value::Object(map) = capability else {
        return;
    };

    if map.len() == 1 && !map.contains_key("name") {
        let shorthand = map
            .iter()
            .next()
            .filter(|(_, fields)| fields.is_object() || fields.is_array())
            .map(|(name, fields)| (name.clone(), fields.clone()));

        if let Some((name, mut fields)) = shorthand {
            fold_single_key_list(&mut fields);
            if let Value::Object(fields) = fields {
                let mut flat = Map::new();
                flat.insert("name".to_string(), Value::String(name));
                flat.extend(fields);
                *map = flat;
            }
        }
    }

    if let Some(Value::Array(archetypes)) = map.get_mut("archetypes") {
        for archetype in archetypes.iter_mut() {
            normalize_archetype(archetype);
        }
    }
}

fn normalize_archetype(archetype: &mut Value) {
    let Value::Object(map) = archetype else {
        return;
    };
    if map.len() != 1 || map.contains_key("role") {
        return;
    }

    if let Some((role, permission)) = map.iter().next().map(|(k, v)| (k.clone(), v.clone())) {
        let mut normalized = Map::new();
        normalized.insert("role".to_string(), Value::String(role));
        normalized.insert("permission".to_string(), permission);
        *map = normalized;
    }
}

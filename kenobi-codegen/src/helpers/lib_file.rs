use pluginkenobi_recipe::{OptionSpec, OptionValidator, Recipe};
use serde_json::{Map, Value};

use super::{HelperGenerator, single_scope};
use crate::{OutputFileEntry, Result};

const FEATURE: &str = "lib";

pub(super) const OPTIONAL: &[OptionSpec] = &[OptionSpec::named("supports")];

/// Plugin callbacks, `lib.php`.
///
/// `supports` lists the `FEATURE_*` constants the plugin answers true
/// for; they are exposed to the template as `featurelist`.
#[derive(Debug)]
pub struct LibGenerator {
    entries: Vec<OutputFileEntry>,
}

impl LibGenerator {
    pub fn new(recipe: &Recipe, validator: &OptionValidator) -> Result<Self> {
        let (_, mut scope) = single_scope(recipe, validator, FEATURE, OPTIONAL)?;

        let featurelist: Vec<Value> = scope
            .get("supports")
            .and_then(Value::as_array)
            .map(|supports| {
                supports
                    .iter()
                    .map(|name| {
                        let mut feature = Map::new();
                        feature.insert("name".to_string(), name.clone());
                        Value::Object(feature)
                    })
                    .collect()
            })
            .unwrap_or_default();
        scope.insert("featurelist".to_string(), Value::Array(featurelist));

        Ok(Self {
            entries: vec![OutputFileEntry::local("lib", "lib.php", scope)],
        })
    }
}

impl HelperGenerator for LibGenerator {
    fn feature(&self) -> &'static str {
        FEATURE
    }

    fn output_files(&self) -> &[OutputFileEntry] {
        &self.entries
    }
}

use pluginkenobi_recipe::{OptionSpec, OptionValidator, Recipe};
use serde_json::Value;

use super::{HelperGenerator, single_scope};
use crate::{OutputFileEntry, Result};

const FEATURE: &str = "upgrade";

pub(super) const OPTIONAL: &[OptionSpec] = &[OptionSpec::named("upgradelib")];

/// Upgrade steps, `db/upgrade.php`, and with `upgradelib: true` a
/// `db/upgradelib.php` for helper functions.
#[derive(Debug)]
pub struct UpgradeGenerator {
    entries: Vec<OutputFileEntry>,
}

impl UpgradeGenerator {
    pub fn new(recipe: &Recipe, validator: &OptionValidator) -> Result<Self> {
        let (_, scope) = single_scope(recipe, validator, FEATURE, OPTIONAL)?;
        let with_lib = matches!(scope.get("upgradelib"), Some(Value::Bool(true)));

        let mut entries = vec![OutputFileEntry::local(
            "db/upgrade",
            "db/upgrade.php",
            scope.clone(),
        )];
        if with_lib {
            entries.push(OutputFileEntry::local(
                "db/upgradelib",
                "db/upgradelib.php",
                scope,
            ));
        }

        Ok(Self { entries })
    }
}

impl HelperGenerator for UpgradeGenerator {
    fn feature(&self) -> &'static str {
        FEATURE
    }

    fn output_files(&self) -> &[OutputFileEntry] {
        &self.entries
    }
}

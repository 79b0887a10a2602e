use pluginkenobi_recipe::{OptionValidator, Recipe};

use super::{HelperGenerator, single_scope};
use crate::{OutputFileEntry, Result};

const FEATURE: &str = "settings";

/// The admin settings page, `settings.php`.
#[derive(Debug)]
pub struct SettingsGenerator {
    entries: Vec<OutputFileEntry>,
}

impl SettingsGenerator {
    pub fn new(recipe: &Recipe, validator: &OptionValidator) -> Result<Self> {
        let (_, scope) = single_scope(recipe, validator, FEATURE, &[])?;
        Ok(Self {
            entries: vec![OutputFileEntry::local("settings", "settings.php", scope)],
        })
    }
}

impl HelperGenerator for SettingsGenerator {
    fn feature(&self) -> &'static str {
        FEATURE
    }

    fn output_files(&self) -> &[OutputFileEntry] {
        &self.entries
    }
}

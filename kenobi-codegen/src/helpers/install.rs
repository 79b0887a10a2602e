use pluginkenobi_recipe::{OptionValidator, Recipe};

use super::{HelperGenerator, single_scope};
use crate::{OutputFileEntry, Result};

const FEATURE: &str = "install";

/// Post-install hook, `db/install.php`.
#[derive(Debug)]
pub struct InstallGenerator {
    entries: Vec<OutputFileEntry>,
}

impl InstallGenerator {
    pub fn new(recipe: &Recipe, validator: &OptionValidator) -> Result<Self> {
        let (_, scope) = single_scope(recipe, validator, FEATURE, &[])?;
        Ok(Self {
            entries: vec![OutputFileEntry::local("db/install", "db/install.php", scope)],
        })
    }
}

impl HelperGenerator for InstallGenerator {
    fn feature(&self) -> &'static str {
        FEATURE
    }

    fn output_files(&self) -> &[OutputFileEntry] {
        &self.entries
    }
}

use pluginkenobi_recipe::{OptionValidator, Recipe};

use super::{HelperGenerator, single_scope};
use crate::{OutputFileEntry, Result};

const FEATURE: &str = "uninstall";

/// Pre-uninstall hook, `db/uninstall.php`.
#[derive(Debug)]
pub struct UninstallGenerator {
    entries: Vec<OutputFileEntry>,
}

impl UninstallGenerator {
    pub fn new(recipe: &Recipe, validator: &OptionValidator) -> Result<Self> {
        let (_, scope) = single_scope(recipe, validator, FEATURE, &[])?;
        Ok(Self {
            entries: vec![OutputFileEntry::local("db/uninstall", "db/uninstall.php", scope)],
        })
    }
}

impl HelperGenerator for UninstallGenerator {
    fn feature(&self) -> &'static str {
        FEATURE
    }

    fn output_files(&self) -> &[OutputFileEntry] {
        &self.entries
    }
}

//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from recipe validation.
///
/// Only built for recipes that passed validation; failures exit with a
/// diagnostic before a report exists.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the recipe.
    pub recipe_path: PathBuf,
    /// Full component name.
    pub component: String,
    /// Plugin type of the component.
    pub plugin_type: String,
    /// Default location relative to the Moodle root.
    pub location: String,
    /// Composed features, core first.
    pub features: Vec<String>,
    /// Planned files, relative to the plugin directory.
    pub files: Vec<String>,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("✓ {} is valid", self.recipe_path.display()));
        out.newline();

        out.key_value_indented("Component", &self.component);
        out.key_value_indented("Plugin type", &self.plugin_type);
        out.key_value_indented("Location", &self.location);
        out.key_value_indented("Features", &self.features.join(", "));
        out.newline();

        out.section(&format!("Files ({})", self.files.len()));
        for file in &self.files {
            out.list_item(file);
        }
    }
}

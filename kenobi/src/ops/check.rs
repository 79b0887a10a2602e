//! Check operation - recipe validation.

use std::path::Path;

use crate::{ops::Plan, reports::CheckReport};

/// Execute the check operation.
///
/// Summarizes a composed recipe and the files it would produce.
pub fn check(plan: &Plan, recipe_path: &Path) -> CheckReport {
    let composition = &plan.composition;

    CheckReport {
        recipe_path: recipe_path.to_path_buf(),
        component: composition.component.frankenstyle(),
        plugin_type: plan.generator.plugin_type().to_string(),
        location: format!(
            "{}/{}",
            plan.generator.default_location(),
            composition.component.name()
        ),
        features: composition.features.iter().map(|f| f.to_string()).collect(),
        files: composition.paths().map(str::to_string).collect(),
    }
}

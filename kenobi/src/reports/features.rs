//! Features command report data structures.

use super::output::{Output, Report};

/// Features of one or more plugin types.
#[derive(Debug)]
pub struct FeaturesReport {
    pub schemas: Vec<SchemaInfo>,
}

/// A plugin type and its features.
#[derive(Debug)]
pub struct SchemaInfo {
    pub plugin_type: String,
    /// Default location relative to the Moodle root.
    pub location: String,
    pub features: Vec<FeatureInfo>,
}

/// A feature and its options.
#[derive(Debug)]
pub struct FeatureInfo {
    pub name: String,
    /// Whether the feature takes a list of instances.
    pub repeated: bool,
    pub required: Vec<String>,
    pub optional: Vec<String>,
}

impl Report for FeaturesReport {
    fn render(&self, out: &mut dyn Output) {
        for (i, schema) in self.schemas.iter().enumerate() {
            if i > 0 {
                out.newline();
            }
            out.key_value(&schema.plugin_type, &format!("{}/", schema.location));

            for feature in &schema.features {
                let name = if feature.repeated {
                    format!("{} (list)", feature.name)
                } else {
                    feature.name.clone()
                };
                out.list_item(&name);
                if !feature.required.is_empty() {
                    out.key_value_indented("    required", &feature.required.join(", "));
                }
                if !feature.optional.is_empty() {
                    out.key_value_indented("    optional", &feature.optional.join(", "));
                }
            }
        }
    }
}

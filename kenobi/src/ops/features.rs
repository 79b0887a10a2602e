//! Features operation - plugin type schemas.

use eyre::{Result, eyre};
use pluginkenobi_codegen::{FeatureBinding, PluginSchema, SUPPORTED_PLUGIN_TYPES, generator_for};
use pluginkenobi_recipe::OptionSpec;

use crate::reports::{FeatureInfo, FeaturesReport, SchemaInfo};

/// Execute the features operation.
///
/// Describes one plugin type, or every supported type when none is given.
pub fn features(plugin_type: Option<&str>) -> Result<FeaturesReport> {
    let types: Vec<&str> = match plugin_type {
        Some(plugin_type) => vec![plugin_type],
        None => SUPPORTED_PLUGIN_TYPES.to_vec(),
    };

    let schemas = types
        .into_iter()
        .map(|plugin_type| {
            let generator = generator_for(plugin_type).ok_or_else(|| {
                eyre!(
                    "unsupported plugin type '{}', expected one of: {}",
                    plugin_type,
                    SUPPORTED_PLUGIN_TYPES.join(", ")
                )
            })?;
            Ok(schema_info(generator.schema()))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(FeaturesReport { schemas })
}

fn schema_info(schema: &PluginSchema) -> SchemaInfo {
    let features = schema
        .features()
        .map(|(name, binding)| FeatureInfo {
            name: name.to_string(),
            repeated: matches!(binding, FeatureBinding::Delegated(kind) if kind.is_repeated()),
            required: option_names(binding.required()),
            optional: option_names(binding.optional()),
        })
        .collect();

    SchemaInfo {
        plugin_type: schema.plugin_type().to_string(),
        location: schema.default_location().to_string(),
        features,
    }
}

fn option_names(options: &[OptionSpec]) -> Vec<String> {
    options.iter().map(|option| option.name.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_plugin_types() {
        let report = features(None).unwrap();
        let types: Vec<_> = report.schemas.iter().map(|s| s.plugin_type.as_str()).collect();
        assert_eq!(types, vec!["local", "mod", "tool"]);
    }

    #[test]
    fn test_single_plugin_type() {
        let report = features(Some("tool")).unwrap();
        assert_eq!(report.schemas.len(), 1);

        let tool = &report.schemas[0];
        assert_eq!(tool.location, "admin/tool");
        assert_eq!(tool.features[0].name, "core");
        assert_eq!(tool.features[0].required, vec!["component", "name", "version", "requires"]);

        let events = tool.features.iter().find(|f| f.name == "events").unwrap();
        assert!(events.repeated);
        assert_eq!(events.required, vec!["eventname"]);
        assert_eq!(events.optional, vec!["extends"]);

        let settings = tool.features.iter().find(|f| f.name == "settings").unwrap();
        assert!(!settings.repeated);
    }

    #[test]
    fn test_unsupported_plugin_type() {
        let err = features(Some("block")).unwrap_err();
        assert!(err.to_string().contains("unsupported plugin type 'block'"));
    }
}

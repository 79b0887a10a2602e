use pluginkenobi_core::humanize;
use pluginkenobi_recipe::{OptionSpec, OptionValidator, Recipe, value_to_string};
use serde_json::Value;

use super::{HelperGenerator, boilerplate, repeated_instances};
use crate::{OutputFileEntry, Result};

const FEATURE: &str = "capabilities";

pub(super) const REQUIRED: &[OptionSpec] = &[
    OptionSpec::named("name"),
    OptionSpec::named("captype"),
    OptionSpec::named("contextlevel"),
    OptionSpec::named("archetypes"),
];
pub(super) const OPTIONAL: &[OptionSpec] = &[
    OptionSpec::named("riskbitmask"),
    OptionSpec::named("clonepermissionsfrom"),
];

/// All capabilities of the plugin, rendered into `db/access.php`.
///
/// Each capability gets a `<plugin>:<name>` language string.
#[derive(Debug)]
pub struct CapabilitiesGenerator {
    entries: Vec<OutputFileEntry>,
    strings: Vec<(String, String)>,
}

impl CapabilitiesGenerator {
    pub fn new(recipe: &Recipe, validator: &OptionValidator) -> Result<Self> {
        let (component, mut scope) = boilerplate(recipe)?;
        let capabilities = repeated_instances(recipe, validator, FEATURE, REQUIRED, OPTIONAL)?;

        let strings = capabilities
            .iter()
            .filter_map(|capability| capability.get("name"))
            .map(value_to_string)
            .map(|name| (format!("{}:{}", component.name(), name), humanize(&name)))
            .collect();

        scope.insert(
            "capabilities".to_string(),
            Value::Array(capabilities.into_iter().map(Value::Object).collect()),
        );

        Ok(Self {
            entries: vec![OutputFileEntry::local("db/access", "db/access.php", scope)],
            strings,
        })
    }
}

impl HelperGenerator for CapabilitiesGenerator {
    fn feature(&self) -> &'static str {
        FEATURE
    }

    fn output_files(&self) -> &[OutputFileEntry] {
        &self.entries
    }

    fn lang_strings(&self) -> &[(String, String)] {
        &self.strings
    }
}

#[cfg(test)]
mod tests {
    use pluginkenobi_recipe::Error as RecipeError;
    use serde_json::json;

    use super::*;
    use crate::{Error, Scope, helpers::test_support::recipe_with};

    #[test]
    fn test_capabilities_share_one_file() {
        let recipe = recipe_with(json!({
            "capabilities": [
                {
                    "name": "view",
                    "captype": "read",
                    "contextlevel": "CONTEXT_SYSTEM",
                    "archetypes": [{"role": "student", "permission": "CAP_ALLOW"}]
                },
                {
                    "name": "manage",
                    "captype": "write",
                    "contextlevel": "CONTEXT_COURSE",
                    "riskbitmask": "RISK_XSS|RISK_CONFIG",
                    "archetypes": [{"role": "editingteacher", "permission": "CAP_ALLOW"}]
                }
            ]
        }));
        let generator = CapabilitiesGenerator::new(&recipe, &OptionValidator::default()).unwrap();
        let files = generator.output_files();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "db/access.php");
        let Scope::Local(scope) = &files[0].scope else {
            panic!("expected a local scope");
        };
        assert_eq!(scope["capabilities"][1]["riskbitmask"], json!("RISK_XSS | RISK_CONFIG"));
        assert_eq!(scope["plugin"], json!("test"));
        assert_eq!(
            generator.lang_strings(),
            [
                ("test:view".to_string(), "View".to_string()),
                ("test:manage".to_string(), "Manage".to_string())
            ]
        );
    }

    #[test]
    fn test_invalid_archetype_permission() {
        let recipe = recipe_with(json!({
            "capabilities": [{
                "name": "view",
                "captype": "read",
                "contextlevel": "CONTEXT_SYSTEM",
                "archetypes": [{"role": "student", "permission": "CAP_SOMETIMES"}]
            }]
        }));
        let err = CapabilitiesGenerator::new(&recipe, &OptionValidator::default()).unwrap_err();
        match err {
            Error::Recipe(RecipeError::UnknownValue {
                location, option, ..
            }) => {
                assert_eq!(location, "features.capabilities[0]");
                assert_eq!(option, "permission");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_risk() {
        let recipe = recipe_with(json!({
            "capabilities": [{
                "name": "view",
                "captype": "read",
                "contextlevel": "CONTEXT_SYSTEM",
                "riskbitmask": "RISK_XSS | RISK_FOO",
                "archetypes": [{"role": "student", "permission": "CAP_ALLOW"}]
            }]
        }));
        let err = CapabilitiesGenerator::new(&recipe, &OptionValidator::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Recipe(RecipeError::UnknownValue { ref value, .. }) if value == "RISK_FOO"
        ));
    }
}

//! Moodle component names ("frankenstyle").

use std::{fmt, str::FromStr};

use crate::Error;

/// Plugin types a component can belong to.
pub const PLUGIN_TYPES: &[&str] = &[
    "antivirus", "assignsubmission", "assignfeedback", "atto", "auth", "availability", "block",
    "booktool", "cachelock", "cachestore", "calendartype", "dataformat", "datafield",
    "editor", "enrol", "filter", "format", "gradeexport", "gradeimport", "gradereport",
    "gradingform", "local", "logstore", "ltisource", "message", "mod", "plagiarism", "portfolio",
    "profilefield", "qbehaviour", "qformat", "qtype", "quiz", "report", "repository",
    "scormreport", "search", "theme", "tinymce", "tool", "webservice", "workshopallocation",
    "workshopeval", "workshopform",
];

/// A parsed Moodle component, e.g. `local_myplugin` -> (`local`, `myplugin`).
///
/// A component without a type prefix is an activity module, so `forum`
/// parses as (`mod`, `forum`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluginComponent {
    plugin_type: String,
    name: String,
}

impl PluginComponent {
    pub fn new(plugin_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            plugin_type: plugin_type.into(),
            name: name.into(),
        }
    }

    /// The plugin type (e.g. "local").
    pub fn plugin_type(&self) -> &str {
        &self.plugin_type
    }

    /// The plugin name without its type prefix (e.g. "myplugin").
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full component name (e.g. "local_myplugin").
    pub fn frankenstyle(&self) -> String {
        format!("{}_{}", self.plugin_type, self.name)
    }

    /// Stem of the English language file.
    ///
    /// Activity modules name their language file after the bare module name,
    /// every other plugin type uses the full component.
    pub fn lang_file_stem(&self) -> String {
        self.function_prefix()
    }

    /// Prefix of global PHP functions (`lib.php`, `db/*.php`).
    ///
    /// Same rule as the language file: `forum` for `mod_forum`,
    /// `local_myplugin` for `local_myplugin`.
    pub fn function_prefix(&self) -> String {
        if self.plugin_type == "mod" {
            self.name.clone()
        } else {
            self.frankenstyle()
        }
    }
}

impl fmt::Display for PluginComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.plugin_type, self.name)
    }
}

impl FromStr for PluginComponent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let component = s.trim();
        if component.is_empty() {
            return Err(Error::invalid_component(s, "component cannot be empty"));
        }
        if component == "core" || component == "moodle" {
            return Err(Error::invalid_component(
                s,
                "core subsystems are not plugins",
            ));
        }

        let (plugin_type, name) = match component.split_once('_') {
            Some((plugin_type, name)) => (plugin_type, name),
            None => ("mod", component),
        };

        if plugin_type == "core" || plugin_type == "moodle" {
            return Err(Error::invalid_component(
                s,
                "core subsystems are not plugins",
            ));
        }
        if !PLUGIN_TYPES.contains(&plugin_type) {
            return Err(Error::invalid_component(
                s,
                format!("unknown plugin type '{}'", plugin_type),
            ));
        }
        if let Some(reason) = validate_plugin_name(plugin_type, name) {
            return Err(Error::invalid_component(s, reason));
        }

        Ok(Self::new(plugin_type, name))
    }
}

/// Validate a plugin name, returning the reason when it is not valid.
fn validate_plugin_name(plugin_type: &str, name: &str) -> Option<&'static str> {
    let mut chars = name.chars();
    match chars.next() {
        None => return Some("plugin name cannot be empty"),
        Some(c) if c.is_ascii_lowercase() => {}
        Some(_) => return Some("plugin name must start with a lowercase letter"),
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Some("plugin name must contain only lowercase letters, digits and underscores");
    }
    if name.contains("__") {
        return Some("plugin name cannot contain consecutive underscores");
    }
    if name.ends_with('_') {
        return Some("plugin name cannot end with an underscore");
    }
    if plugin_type == "mod" && name.contains('_') {
        return Some("activity module names cannot contain underscores");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_typed_component() {
        let component: PluginComponent = "local_myplugin".parse().unwrap();
        assert_eq!(component.plugin_type(), "local");
        assert_eq!(component.name(), "myplugin");
        assert_eq!(component.frankenstyle(), "local_myplugin");
    }

    #[test]
    fn test_parse_name_with_underscores() {
        let component: PluginComponent = "tool_data_privacy".parse().unwrap();
        assert_eq!(component.plugin_type(), "tool");
        assert_eq!(component.name(), "data_privacy");
    }

    #[test]
    fn test_bare_name_is_module() {
        let component: PluginComponent = "forum".parse().unwrap();
        assert_eq!(component.plugin_type(), "mod");
        assert_eq!(component.name(), "forum");
        assert_eq!(component.to_string(), "mod_forum");
    }

    #[test]
    fn test_lang_file_stem() {
        let module: PluginComponent = "mod_forum".parse().unwrap();
        assert_eq!(module.lang_file_stem(), "forum");

        let local: PluginComponent = "local_myplugin".parse().unwrap();
        assert_eq!(local.lang_file_stem(), "local_myplugin");
        assert_eq!(local.function_prefix(), "local_myplugin");
    }

    #[test]
    fn test_rejects_core_and_unknown_types() {
        assert!("core".parse::<PluginComponent>().is_err());
        assert!("core_user".parse::<PluginComponent>().is_err());
        assert!("widget_thing".parse::<PluginComponent>().is_err());
        assert!("".parse::<PluginComponent>().is_err());
    }

    #[test]
    fn test_rejects_invalid_names() {
        assert!("local_".parse::<PluginComponent>().is_err());
        assert!("local_1abc".parse::<PluginComponent>().is_err());
        assert!("local_My".parse::<PluginComponent>().is_err());
        assert!("local_a__b".parse::<PluginComponent>().is_err());
        assert!("local_abc_".parse::<PluginComponent>().is_err());
        assert!("mod_my_module".parse::<PluginComponent>().is_err());
    }

    #[test]
    fn test_error_names_component() {
        let err = "widget_thing".parse::<PluginComponent>().unwrap_err();
        assert!(err.to_string().contains("widget_thing"));
    }
}

//! Template engine for plugin files.
//!
//! Templates are bundled into the binary and rendered with Handlebars.
//! HTML escaping is disabled since the output is PHP source, and every
//! template can include the shared `boilerplate` partial (license header
//! and file docblock).

use handlebars::{Handlebars, handlebars_helper, no_escape};
use pluginkenobi_recipe::value_to_string;
use serde::Serialize;

use crate::{Error, Result};

/// Name of the shared license header partial.
pub const BOILERPLATE_PARTIAL: &str = "boilerplate";

/// Bundled templates, keyed by template identifier.
const TEMPLATES: &[(&str, &str)] = &[
    ("version", include_str!("../templates/version.php.hbs")),
    ("lang", include_str!("../templates/lang.php.hbs")),
    ("settings", include_str!("../templates/settings.php.hbs")),
    ("lib", include_str!("../templates/lib.php.hbs")),
    ("db/access", include_str!("../templates/db/access.php.hbs")),
    ("db/events", include_str!("../templates/db/events.php.hbs")),
    ("db/install", include_str!("../templates/db/install.php.hbs")),
    ("db/uninstall", include_str!("../templates/db/uninstall.php.hbs")),
    ("db/upgrade", include_str!("../templates/db/upgrade.php.hbs")),
    ("db/upgradelib", include_str!("../templates/db/upgradelib.php.hbs")),
    ("classes/event", include_str!("../templates/classes/event.php.hbs")),
    ("classes/observer", include_str!("../templates/classes/observer.php.hbs")),
];

// Escape a value for a single-quoted PHP string.
handlebars_helper!(php_string: |value: Json| {
    value_to_string(value).replace('\\', "\\\\").replace('\'', "\\'")
});

/// Handlebars registry with the bundled templates.
#[derive(Debug)]
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    /// Create an engine with every bundled template registered.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(no_escape);
        handlebars.register_helper("php_string", Box::new(php_string));

        handlebars
            .register_partial(
                BOILERPLATE_PARTIAL,
                include_str!("../templates/boilerplate.hbs"),
            )
            .map_err(|e| Error::TemplateRegistration {
                template: BOILERPLATE_PARTIAL.to_string(),
                source: Box::new(e),
            })?;

        for (name, source) in TEMPLATES {
            handlebars
                .register_template_string(name, source)
                .map_err(|e| Error::TemplateRegistration {
                    template: name.to_string(),
                    source: Box::new(e),
                })?;
        }

        Ok(Self { handlebars })
    }

    /// Whether a template is registered.
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }

    /// Identifiers of the bundled templates.
    pub fn template_names() -> impl Iterator<Item = &'static str> {
        TEMPLATES.iter().map(|(name, _)| *name)
    }

    /// Render a template. `path` is only used for error reporting.
    pub fn render<T: Serialize>(&self, template: &str, path: &str, data: &T) -> Result<String> {
        self.handlebars
            .render(template, data)
            .map_err(|e| Error::Render {
                template: template.to_string(),
                path: path.to_string(),
                source: Box::new(e),
            })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn boilerplate() -> serde_json::Value {
        json!({
            "component": "local_test",
            "type": "local",
            "plugin": "test",
            "prefix": "local_test",
            "year": 2016,
            "author": {"name": "Jane Doe", "email": "jane@example.com"}
        })
    }

    fn with(mut base: serde_json::Value, extra: serde_json::Value) -> serde_json::Value {
        if let (Some(base), serde_json::Value::Object(extra)) = (base.as_object_mut(), extra) {
            base.extend(extra);
        }
        base
    }

    #[test]
    fn test_all_templates_registered() {
        let engine = TemplateEngine::new().unwrap();
        for name in TemplateEngine::template_names() {
            assert!(engine.has_template(name), "missing template {}", name);
        }
        assert!(!engine.has_template("missing"));
    }

    #[test]
    fn test_boilerplate_header() {
        let engine = TemplateEngine::new().unwrap();
        let data = with(boilerplate(), json!({"name": "Test"}));
        let output = engine.render("lang", "lang/en/local_test.php", &data).unwrap();

        assert!(output.starts_with("<?php\n// This file is part of Moodle"));
        assert!(output.contains("@package    local_test"));
        assert!(output.contains("@copyright  2016 Jane Doe <jane@example.com>"));
        assert!(output.contains("Plugin strings are defined here."));
    }

    #[test]
    fn test_output_is_not_html_escaped() {
        let engine = TemplateEngine::new().unwrap();
        let data = with(
            boilerplate(),
            json!({"eventname": "thing_created", "extends": "\\core\\event\\base"}),
        );
        let output = engine
            .render("classes/event", "classes/event/thing_created.php", &data)
            .unwrap();

        assert!(output.contains("class thing_created extends \\core\\event\\base {"));
        assert!(output.contains("namespace local_test\\event;"));
        assert!(output.contains("<jane@example.com>"));
    }

    #[test]
    fn test_php_string_escapes_quotes() {
        let engine = TemplateEngine::new().unwrap();
        let data = with(boilerplate(), json!({"name": "Jane's plugin"}));
        let output = engine.render("lang", "lang/en/local_test.php", &data).unwrap();

        assert!(output.contains("$string['pluginname'] = 'Jane\\'s plugin';"));
    }

    #[test]
    fn test_version_optional_fields() {
        let engine = TemplateEngine::new().unwrap();
        let data = with(
            boilerplate(),
            json!({
                "version": 2016121200,
                "requires": "2015051100",
                "maturity": "MATURITY_BETA",
                "dependencies": [{"component": "mod_forum", "version": "ANY_VERSION"}]
            }),
        );
        let output = engine.render("version", "version.php", &data).unwrap();

        assert!(output.contains("$plugin->version = 2016121200;"));
        assert!(output.contains("$plugin->requires = 2015051100;"));
        assert!(output.contains("$plugin->maturity = MATURITY_BETA;"));
        assert!(output.contains("'mod_forum' => ANY_VERSION,"));
        assert!(!output.contains("$plugin->release"));
    }

    #[test]
    fn test_render_unknown_template() {
        let engine = TemplateEngine::new().unwrap();
        let err = engine.render("missing", "missing.php", &boilerplate()).unwrap_err();
        assert!(matches!(err, Error::Render { ref template, .. } if template == "missing"));
    }
}

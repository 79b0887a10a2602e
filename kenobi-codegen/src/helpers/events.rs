use pluginkenobi_core::{humanize, is_php_identifier};
use pluginkenobi_recipe::{Error as RecipeError, OptionSpec, OptionValidator, Recipe, Rule};
use serde_json::Value;
use tracing::debug;

use super::{HelperGenerator, boilerplate, repeated_instances};
use crate::{Error, OutputFileEntry, Result};

const FEATURE: &str = "events";

/// Base class of events that don't name one.
pub const DEFAULT_EVENT_BASE: &str = "\\core\\event\\base";

// Event names are plain class names, not namespaced ones.
pub(super) const REQUIRED: &[OptionSpec] = &[OptionSpec::with_rule("eventname", Rule::Generic)];
pub(super) const OPTIONAL: &[OptionSpec] = &[OptionSpec::named("extends")];

/// One event class per entry under `classes/event/`.
#[derive(Debug)]
pub struct EventsGenerator {
    entries: Vec<OutputFileEntry>,
    strings: Vec<(String, String)>,
}

impl EventsGenerator {
    pub fn new(recipe: &Recipe, validator: &OptionValidator) -> Result<Self> {
        let (_, base) = boilerplate(recipe)?;
        let events = repeated_instances(recipe, validator, FEATURE, REQUIRED, OPTIONAL)?;

        let mut entries = Vec::with_capacity(events.len());
        let mut strings = Vec::with_capacity(events.len());
        for (index, event) in events.into_iter().enumerate() {
            let eventname = event
                .get("eventname")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            if !is_php_identifier(&eventname) {
                return Err(Error::Recipe(RecipeError::InvalidValue {
                    feature: FEATURE.to_string(),
                    location: format!("features.{}[{}]", FEATURE, index),
                    option: "eventname".to_string(),
                    value: eventname,
                    reason: "event names must be PHP class names (letters, digits and underscores)"
                        .to_string(),
                }));
            }

            let extends = event
                .get("extends")
                .cloned()
                .unwrap_or_else(|| Value::from(DEFAULT_EVENT_BASE));

            let mut scope = base.clone();
            scope.insert("eventname".to_string(), Value::from(eventname.clone()));
            scope.insert("extends".to_string(), extends);

            strings.push((format!("event{}", eventname), humanize(&eventname)));
            debug!(event = %eventname, "adding event class");
            entries.push(OutputFileEntry::local(
                "classes/event",
                format!("classes/event/{}.php", eventname),
                scope,
            ));
        }

        Ok(Self { entries, strings })
    }
}

impl HelperGenerator for EventsGenerator {
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
    use serde_json::json;

    use super::*;
    use crate::{Scope, helpers::test_support::recipe_with};

    fn scope_of(entry: &OutputFileEntry) -> &serde_json::Map<String, Value> {
        match &entry.scope {
            Scope::Local(scope) => scope,
            Scope::Recipe => panic!("expected a local scope"),
        }
    }

    #[test]
    fn test_one_file_per_event() {
        let recipe = recipe_with(json!({
            "events": [
                {"eventname": "event_class", "extends": "\\core\\event\\something_happened"},
                {"eventname": "another_event_class"}
            ]
        }));
        let generator = EventsGenerator::new(&recipe, &OptionValidator::default()).unwrap();
        let files = generator.output_files();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, "classes/event/event_class.php");
        assert_eq!(files[1].path, "classes/event/another_event_class.php");
        assert_eq!(
            scope_of(&files[0])["extends"],
            json!("\\core\\event\\something_happened")
        );
        assert_eq!(scope_of(&files[1])["extends"], json!(DEFAULT_EVENT_BASE));
        assert_eq!(scope_of(&files[1])["component"], json!("local_test"));
        assert_eq!(
            generator.lang_strings(),
            [
                ("eventevent_class".to_string(), "Event class".to_string()),
                ("eventanother_event_class".to_string(), "Another event class".to_string())
            ]
        );
    }

    #[test]
    fn test_extends_needs_namespace() {
        let recipe = recipe_with(json!({
            "events": [{"eventname": "event_class", "extends": "base"}]
        }));
        let err = EventsGenerator::new(&recipe, &OptionValidator::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Recipe(RecipeError::InvalidValue { ref option, .. }) if option == "extends"
        ));
    }

    #[test]
    fn test_missing_eventname() {
        let recipe = recipe_with(json!({
            "events": [{"eventname": "ok"}, {"extends": "\\core\\event\\base"}]
        }));
        let err = EventsGenerator::new(&recipe, &OptionValidator::default()).unwrap_err();
        match err {
            Error::Recipe(RecipeError::MissingOption {
                location, option, ..
            }) => {
                assert_eq!(location, "features.events[1]");
                assert_eq!(option, "eventname");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_eventname_must_be_class_name() {
        let recipe = recipe_with(json!({"events": [{"eventname": "../escape"}]}));
        assert!(EventsGenerator::new(&recipe, &OptionValidator::default()).is_err());
    }
}

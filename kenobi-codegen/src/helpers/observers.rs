use indexmap::IndexMap;
use pluginkenobi_core::{is_php_identifier, last_namespace_segment, split_callback, trim_quotes};
use pluginkenobi_recipe::{OptionError, OptionSpec, OptionValidator, Recipe, ValidationContext};
use serde_json::{Map, Value};
use tracing::debug;

use super::{HelperGenerator, boilerplate, repeated_instances};
use crate::{OutputFileEntry, Result};

const FEATURE: &str = "observers";

pub(super) const REQUIRED: &[OptionSpec] =
    &[OptionSpec::named("eventname"), OptionSpec::named("callback")];
pub(super) const OPTIONAL: &[OptionSpec] = &[
    OptionSpec::named("includefile"),
    OptionSpec::named("priority"),
    OptionSpec::named("internal"),
];

/// Registers observers in `db/events.php` and stubs their classes.
///
/// Observers sharing a class end up in one `classes/<class>.php`. A
/// function listed for several events is generated once. Two namespaces
/// can't share a class name since both would be written to the same file.
#[derive(Debug)]
pub struct ObserversGenerator {
    entries: Vec<OutputFileEntry>,
}

/// Functions of one observer class, keyed by function name.
#[derive(Debug, Default)]
struct ObserverClass {
    namespace: String,
    functions: IndexMap<String, Vec<Value>>,
}

impl ObserversGenerator {
    pub fn new(recipe: &Recipe, validator: &OptionValidator) -> Result<Self> {
        let (_, base) = boilerplate(recipe)?;
        let observers = repeated_instances(recipe, validator, FEATURE, REQUIRED, OPTIONAL)?;
        let ctx = ValidationContext::new(validator, FEATURE).push(format!("features.{}", FEATURE));

        let mut registered = Vec::with_capacity(observers.len());
        let mut classes: IndexMap<String, ObserverClass> = IndexMap::new();

        for (index, mut observer) in observers.into_iter().enumerate() {
            let eventname = unquoted(&observer, "eventname");
            let callback = unquoted(&observer, "callback");

            let Some((class, function)) = split_callback(&callback) else {
                return Err(ctx.index(index).option_error(invalid_callback(&callback)).into());
            };
            if !is_php_identifier(class) || !is_php_identifier(function) {
                return Err(ctx.index(index).option_error(invalid_callback(&callback)).into());
            }

            let eventclassname = last_namespace_segment(&eventname).to_string();
            let namespace = callback_namespace(&callback);

            let entry = classes.entry(class.to_string()).or_insert_with(|| ObserverClass {
                namespace: namespace.clone(),
                ..Default::default()
            });
            if entry.namespace != namespace {
                return Err(ctx
                    .index(index)
                    .option_error(OptionError::Invalid {
                        option: "callback".to_string(),
                        value: callback.clone(),
                        reason: format!(
                            "class '{}' is already generated in namespace '{}'",
                            class, entry.namespace
                        ),
                    })
                    .into());
            }
            let mut event = Map::new();
            event.insert("eventname".to_string(), Value::from(eventname.clone()));
            event.insert("eventclassname".to_string(), Value::from(eventclassname));
            entry
                .functions
                .entry(function.to_string())
                .or_default()
                .push(Value::Object(event));

            observer.insert("eventname".to_string(), Value::from(eventname));
            observer.insert("callback".to_string(), Value::from(callback.clone()));
            registered.push(Value::Object(observer));
        }

        let mut entries = Vec::with_capacity(classes.len() + 1);

        let mut events_scope = base.clone();
        events_scope.insert("observers".to_string(), Value::Array(registered));
        entries.push(OutputFileEntry::local("db/events", "db/events.php", events_scope));

        for (name, class) in classes {
            debug!(class = %name, functions = class.functions.len(), "adding observer class");

            let functions = class
                .functions
                .into_iter()
                .map(|(function, events)| {
                    let mut entry = Map::new();
                    entry.insert("function".to_string(), Value::from(function));
                    entry.insert("events".to_string(), Value::Array(events));
                    Value::Object(entry)
                })
                .collect();

            let mut scope = base.clone();
            scope.insert("name".to_string(), Value::from(name.clone()));
            scope.insert("namespace".to_string(), Value::from(class.namespace));
            scope.insert("functions".to_string(), Value::Array(functions));
            entries.push(OutputFileEntry::local(
                "classes/observer",
                format!("classes/{}.php", name),
                scope,
            ));
        }

        Ok(Self { entries })
    }
}

impl HelperGenerator for ObserversGenerator {
    fn feature(&self) -> &'static str {
        FEATURE
    }

    fn output_files(&self) -> &[OutputFileEntry] {
        &self.entries
    }
}

fn unquoted(observer: &Map<String, Value>, option: &str) -> String {
    observer
        .get(option)
        .and_then(Value::as_str)
        .map(trim_quotes)
        .unwrap_or_default()
        .to_string()
}

/// Namespace of a callback's class: `\local_x\observer::f` -> `local_x`.
fn callback_namespace(callback: &str) -> String {
    let callback = callback.trim_start_matches('\\');
    match callback.rsplit_once('\\') {
        Some((namespace, _)) => namespace.to_string(),
        None => String::new(),
    }
}

fn invalid_callback(callback: &str) -> OptionError {
    OptionError::Invalid {
        option: "callback".to_string(),
        value: callback.to_string(),
        reason: "expected '\\namespace\\class::function' with PHP identifiers".to_string(),
    }
}

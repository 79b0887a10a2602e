//! Located option validation.

use serde_json::{Map, Value};
use tracing::trace;

use crate::{
    Error, Result,
    validate::{OptionError, OptionSpec, OptionValidator},
    value::is_empty_value,
};

/// Validation context that carries the feature and location being checked.
///
/// Locations read like recipe paths so errors point at the offending
/// entry, for example `core`, `features.settings` or
/// `features.capabilities[1]`.
///
/// ```ignore
/// let ctx = ValidationContext::new(&validator, "observers").push("features.observers");
/// let observer = ctx.index(0).validate_options(entry, REQUIRED, OPTIONAL)?;
/// ```
#[derive(Debug, Clone)]
pub struct ValidationContext<'a> {
    validator: &'a OptionValidator,
    feature: &'a str,
    path: Vec<String>,
}

impl<'a> ValidationContext<'a> {
    pub fn new(validator: &'a OptionValidator, feature: &'a str) -> Self {
        Self {
            validator,
            feature,
            path: Vec::new(),
        }
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: impl Into<String>) -> Self {
        let mut path = self.path.clone();
        path.push(segment.into());
        Self {
            validator: self.validator,
            feature: self.feature,
            path,
        }
    }

    /// Return a new context pointing at an element of a list.
    pub fn index(&self, index: usize) -> Self {
        let mut path = self.path.clone();
        match path.last_mut() {
            Some(last) => last.push_str(&format!("[{}]", index)),
            None => path.push(format!("[{}]", index)),
        }
        Self {
            validator: self.validator,
            feature: self.feature,
            path,
        }
    }

    /// The current location as a dot-separated path, or the feature name
    /// when nothing has been pushed.
    pub fn location(&self) -> String {
        if self.path.is_empty() {
            self.feature.to_string()
        } else {
            self.path.join(".")
        }
    }

    /// Validate a single option value.
    pub fn validate_option(&self, spec: &OptionSpec, raw: &Value) -> Result<Value> {
        self.validator
            .validate_with(spec.rule(), spec.name, raw)
            .map_err(|e| self.option_error(e))
    }

    /// Validate an option map against required and optional options.
    ///
    /// Required options must be present and non-empty. Optional options
    /// with an empty value are skipped. Keys that are not listed are not
    /// carried over.
    pub fn validate_options(
        &self,
        options: &Map<String, Value>,
        required: &[OptionSpec],
        optional: &[OptionSpec],
    ) -> Result<Map<String, Value>> {
        let mut validated = Map::new();

        for spec in required {
            let raw = options.get(spec.name).unwrap_or(&Value::Null);
            let value = self.validate_option(spec, raw)?;
            validated.insert(spec.name.to_string(), value);
        }

        for spec in optional {
            match options.get(spec.name) {
                Some(raw) if !is_empty_value(raw) => {
                    let value = self.validate_option(spec, raw)?;
                    validated.insert(spec.name.to_string(), value);
                }
                _ => {}
            }
        }

        trace!(
            feature = self.feature,
            location = %self.location(),
            options = validated.len(),
            "validated options"
        );

        Ok(validated)
    }

    /// Convert an option failure into a located recipe error.
    pub fn option_error(&self, error: OptionError) -> Box<Error> {
        let feature = self.feature.to_string();
        let location = self.location();
        Box::new(match error {
            OptionError::Missing { option } => Error::MissingOption {
                feature,
                location,
                option,
            },
            OptionError::Invalid {
                option,
                value,
                reason,
            } => Error::InvalidValue {
                feature,
                location,
                option,
                value,
                reason,
            },
            OptionError::Unknown {
                option,
                value,
                expected,
            } => Error::UnknownValue {
                feature,
                location,
                option,
                value,
                expected: expected.join(", "),
            },
        })
    }
}

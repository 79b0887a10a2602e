//! Option validation rules.
//!
//! Every recipe option is checked by a [`Rule`]. Most options pick their
//! rule from their name ([`Rule::for_option`]); features can override it
//! per option through [`OptionSpec::with_rule`].
//!
//! Validation is pure: [`OptionValidator`] returns the normalized value or
//! an [`OptionError`] naming the option and the rejected value. Turning an
//! `OptionError` into a located recipe error is the job of
//! [`ValidationContext`](crate::ValidationContext).

use pluginkenobi_core::{PluginComponent, has_namespace, split_callback};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{
    catalog::{ANY_VERSION, Catalog},
    value::{is_empty_value, value_to_string},
};

/// Validation rule applied to an option value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Any non-empty value, passed through unchanged.
    Generic,
    /// Moodle release token, normalized to its build number.
    Version,
    /// One of the maturity levels.
    Maturity,
    /// `read` or `write`.
    CapabilityType,
    /// One of the context levels.
    ContextLevel,
    /// `CAP_ALLOW` or `CAP_PREVENT`.
    Permission,
    /// `|` separated risks, normalized to `" | "` separators.
    RiskBitmask,
    /// List of `{role, permission}` maps.
    Archetypes,
    /// Namespace qualified PHP name.
    Namespaced,
    /// Namespace qualified static callback (`\ns\class::function`).
    Callback,
    /// Non-negative integer.
    Priority,
    /// Boolean.
    Flag,
    /// Map of component to required version.
    Dependencies,
    /// List of names.
    NameList,
}

impl Rule {
    /// Default rule for an option name.
    pub fn for_option(option: &str) -> Rule {
        match option {
            "requires" => Rule::Version,
            "maturity" => Rule::Maturity,
            "captype" => Rule::CapabilityType,
            "contextlevel" => Rule::ContextLevel,
            "permission" => Rule::Permission,
            "riskbitmask" => Rule::RiskBitmask,
            "archetypes" => Rule::Archetypes,
            "eventname" | "extends" => Rule::Namespaced,
            "callback" => Rule::Callback,
            "priority" => Rule::Priority,
            "internal" | "upgradelib" => Rule::Flag,
            "dependencies" => Rule::Dependencies,
            "supports" => Rule::NameList,
            _ => Rule::Generic,
        }
    }
}

/// An option a feature accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: &'static str,
    rule: Option<Rule>,
}

impl OptionSpec {
    /// An option validated by the rule its name selects.
    pub const fn named(name: &'static str) -> Self {
        Self { name, rule: None }
    }

    /// An option validated by an explicit rule.
    pub const fn with_rule(name: &'static str, rule: Rule) -> Self {
        Self {
            name,
            rule: Some(rule),
        }
    }

    /// The rule applied to this option.
    pub fn rule(&self) -> Rule {
        self.rule.unwrap_or_else(|| Rule::for_option(self.name))
    }
}

/// Failure of a single option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("missing required option '{option}'")]
    Missing { option: String },

    #[error("invalid value '{value}' for option '{option}': {reason}")]
    Invalid {
        option: String,
        value: String,
        reason: String,
    },

    #[error("unknown {option} '{value}'")]
    Unknown {
        option: String,
        value: String,
        expected: Vec<String>,
    },
}

impl OptionError {
    fn missing(option: &str) -> Self {
        OptionError::Missing {
            option: option.to_string(),
        }
    }

    fn invalid(option: &str, value: &Value, reason: impl Into<String>) -> Self {
        OptionError::Invalid {
            option: option.to_string(),
            value: value_to_string(value),
            reason: reason.into(),
        }
    }

    fn unknown(option: &str, value: impl Into<String>, expected: &[&str]) -> Self {
        OptionError::Unknown {
            option: option.to_string(),
            value: value.into(),
            expected: expected.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// The option that failed.
    pub fn option(&self) -> &str {
        match self {
            OptionError::Missing { option }
            | OptionError::Invalid { option, .. }
            | OptionError::Unknown { option, .. } => option,
        }
    }
}

/// Validates and normalizes option values against the catalog.
#[derive(Debug, Clone, Default)]
pub struct OptionValidator {
    catalog: Catalog,
}

impl OptionValidator {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Validate an option with the rule its name selects.
    pub fn validate(&self, option: &str, raw: &Value) -> Result<Value, OptionError> {
        self.validate_with(Rule::for_option(option), option, raw)
    }

    /// Validate an option with an explicit rule.
    pub fn validate_with(&self, rule: Rule, option: &str, raw: &Value) -> Result<Value, OptionError> {
        // `false` is a legitimate flag value, everything else must be non-empty
        if rule != Rule::Flag && is_empty_value(raw) {
            return Err(OptionError::missing(option));
        }

        match rule {
            Rule::Generic => Ok(raw.clone()),
            Rule::Version => self.validate_version(option, raw),
            Rule::Maturity => one_of(option, raw, self.catalog.maturity_levels()),
            Rule::CapabilityType => one_of(option, raw, self.catalog.capability_types()),
            Rule::ContextLevel => one_of(option, raw, self.catalog.context_levels()),
            Rule::Permission => one_of(option, raw, self.catalog.permissions()),
            Rule::RiskBitmask => self.validate_risk_bitmask(option, raw),
            Rule::Archetypes => self.validate_archetypes(option, raw),
            Rule::Namespaced => {
                let name = expect_str(option, raw)?;
                if !has_namespace(name) {
                    return Err(OptionError::invalid(
                        option,
                        raw,
                        "missing namespace, expected a name like '\\core\\event\\base'",
                    ));
                }
                Ok(raw.clone())
            }
            Rule::Callback => {
                let callback = expect_str(option, raw)?;
                if !has_namespace(callback) {
                    return Err(OptionError::invalid(
                        option,
                        raw,
                        "missing namespace, expected '\\namespace\\class::function'",
                    ));
                }
                if split_callback(callback).is_none() {
                    return Err(OptionError::invalid(
                        option,
                        raw,
                        "missing class or function, expected '\\namespace\\class::function'",
                    ));
                }
                Ok(raw.clone())
            }
            Rule::Priority => validate_priority(option, raw),
            Rule::Flag => match raw {
                Value::Bool(b) => Ok(Value::Bool(*b)),
                _ => Err(OptionError::invalid(option, raw, "expected true or false")),
            },
            Rule::Dependencies => validate_dependencies(option, raw),
            Rule::NameList => validate_name_list(option, raw),
        }
    }

    fn validate_version(&self, option: &str, raw: &Value) -> Result<Value, OptionError> {
        let token = match raw {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => {
                // YAML reads an unquoted 3.10 as 3.1
                if let Some(release) = n.as_f64().filter(|_| n.is_f64()) {
                    let matching: Vec<&str> = self
                        .catalog
                        .version_tokens()
                        .into_iter()
                        .filter(|token| token.parse::<f64>().ok() == Some(release))
                        .collect();
                    if matching.len() > 1 {
                        return Err(OptionError::invalid(
                            option,
                            raw,
                            format!(
                                "ambiguous release, quote it as one of: {}",
                                matching.join(", ")
                            ),
                        ));
                    }
                }
                n.to_string()
            }
            _ => {
                return Err(OptionError::invalid(
                    option,
                    raw,
                    "expected a Moodle release such as '3.1'",
                ));
            }
        };

        match self.catalog.build_for(&token) {
            Some(build) => Ok(Value::String(build.to_string())),
            None => Err(OptionError::unknown(
                option,
                token,
                &self.catalog.version_tokens(),
            )),
        }
    }

    fn validate_risk_bitmask(&self, option: &str, raw: &Value) -> Result<Value, OptionError> {
        let bitmask = expect_str(option, raw)?;
        let known = self.catalog.risk_bitmasks();

        let mut risks = Vec::new();
        for risk in bitmask.split('|').map(str::trim) {
            if !known.contains(&risk) {
                return Err(OptionError::unknown(option, risk, known));
            }
            risks.push(risk);
        }

        Ok(Value::String(risks.join(" | ")))
    }

    fn validate_archetypes(&self, option: &str, raw: &Value) -> Result<Value, OptionError> {
        let Value::Array(entries) = raw else {
            return Err(OptionError::invalid(
                option,
                raw,
                "archetypes must be a list of roles and permissions",
            ));
        };

        let mut archetypes = Vec::with_capacity(entries.len());
        for entry in entries {
            let Value::Object(fields) = entry else {
                return Err(OptionError::invalid(
                    option,
                    entry,
                    "each archetype needs a 'role' and a 'permission'",
                ));
            };

            let role = fields.get("role").unwrap_or(&Value::Null);
            let role = self.validate_with(Rule::Generic, "role", role)?;
            let permission = fields.get("permission").unwrap_or(&Value::Null);
            let permission = self.validate_with(Rule::Permission, "permission", permission)?;

            let mut archetype = Map::new();
            archetype.insert("role".to_string(), role);
            archetype.insert("permission".to_string(), permission);
            archetypes.push(Value::Object(archetype));
        }

        Ok(Value::Array(archetypes))
    }
}

fn expect_str<'v>(option: &str, raw: &'v Value) -> Result<&'v str, OptionError> {
    raw.as_str()
        .ok_or_else(|| OptionError::invalid(option, raw, "expected a string"))
}

fn one_of(option: &str, raw: &Value, allowed: &[&str]) -> Result<Value, OptionError> {
    let value = raw.as_str().map(str::trim).unwrap_or_default();
    if allowed.contains(&value) {
        Ok(Value::String(value.to_string()))
    } else {
        Err(OptionError::unknown(option, value_to_string(raw), allowed))
    }
}

fn validate_priority(option: &str, raw: &Value) -> Result<Value, OptionError> {
    let priority = match raw {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
        _ => None,
    };

    match priority {
        Some(p) if p < 0 => Err(OptionError::invalid(option, raw, "priority cannot be negative")),
        Some(p) => Ok(Value::from(p)),
        None => Err(OptionError::invalid(option, raw, "priority must be numeric")),
    }
}

fn validate_dependencies(option: &str, raw: &Value) -> Result<Value, OptionError> {
    let Value::Object(dependencies) = raw else {
        return Err(OptionError::invalid(
            option,
            raw,
            "dependencies must map components to versions",
        ));
    };

    let mut list = Vec::with_capacity(dependencies.len());
    for (component, version) in dependencies {
        if let Err(e) = component.parse::<PluginComponent>() {
            return Err(OptionError::Invalid {
                option: option.to_string(),
                value: component.clone(),
                reason: e.to_string(),
            });
        }

        let version = match version {
            Value::String(s) if s == ANY_VERSION => s.clone(),
            Value::String(s) if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) => s.clone(),
            Value::Number(n) if n.is_u64() => n.to_string(),
            _ => {
                return Err(OptionError::invalid(
                    option,
                    version,
                    format!("version of '{}' must be a build number or {}", component, ANY_VERSION),
                ));
            }
        };

        let mut dependency = Map::new();
        dependency.insert("component".to_string(), Value::String(component.clone()));
        dependency.insert("version".to_string(), Value::String(version));
        list.push(Value::Object(dependency));
    }

    Ok(Value::Array(list))
}

fn validate_name_list(option: &str, raw: &Value) -> Result<Value, OptionError> {
    let names = match raw {
        Value::String(_) => vec![raw.clone()],
        Value::Array(items) => items.clone(),
        _ => return Err(OptionError::invalid(option, raw, "expected a list of names")),
    };

    for name in &names {
        match name.as_str() {
            Some(s) if !s.trim().is_empty() => {}
            _ => return Err(OptionError::invalid(option, name, "names must be non-empty strings")),
        }
    }

    Ok(Value::Array(names))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn validator() -> OptionValidator {
        OptionValidator::new(Catalog::new())
    }

    #[test]
    fn test_generic_passes_through() {
        let v = validator();
        assert_eq!(v.validate("name", &json!("My plugin")).unwrap(), json!("My plugin"));
        assert_eq!(v.validate("version", &json!(2016121200)).unwrap(), json!(2016121200));
    }

    #[test]
    fn test_generic_rejects_empty() {
        let v = validator();
        assert_eq!(
            v.validate("name", &json!("")).unwrap_err(),
            OptionError::Missing {
                option: "name".to_string()
            }
        );
        assert!(v.validate("release", &json!(null)).is_err());
    }

    #[test]
    fn test_requires_maps_to_build() {
        let v = validator();
        assert_eq!(v.validate("requires", &json!("2.9")).unwrap(), json!("2015051100"));
        assert_eq!(v.validate("requires", &json!(2.9)).unwrap(), json!("2015051100"));
        assert_eq!(v.validate("requires", &json!("3.0")).unwrap(), json!("2015111600"));
    }

    #[test]
    fn test_requires_unknown_token() {
        let err = validator().validate("requires", &json!("1.9")).unwrap_err();
        match err {
            OptionError::Unknown { option, value, .. } => {
                assert_eq!(option, "requires");
                assert_eq!(value, "1.9");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_requires_uses_catalog_extensions() {
        let v = OptionValidator::new(Catalog::new().with_version("3.6", "2018120300"));
        assert_eq!(v.validate("requires", &json!("3.6")).unwrap(), json!("2018120300"));
    }

    #[test]
    fn test_unquoted_release_with_trailing_zero() {
        let v = OptionValidator::new(Catalog::new().with_version("3.10", "2020110900"));
        assert_eq!(v.validate("requires", &json!("3.10")).unwrap(), json!("2020110900"));
        assert_eq!(v.validate("requires", &json!("3.1")).unwrap(), json!("2016052300"));

        let err = v.validate("requires", &json!(3.1)).unwrap_err();
        match err {
            OptionError::Invalid { option, reason, .. } => {
                assert_eq!(option, "requires");
                assert!(reason.contains("3.1, 3.10"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_maturity() {
        let v = validator();
        assert_eq!(
            v.validate("maturity", &json!("MATURITY_ALPHA")).unwrap(),
            json!("MATURITY_ALPHA")
        );
        assert!(v.validate("maturity", &json!("MATURITY_GAMMA")).is_err());
    }

    #[test]
    fn test_enumerated_options() {
        let v = validator();
        assert!(v.validate("captype", &json!("read")).is_ok());
        assert!(v.validate("captype", &json!("write")).is_ok());
        assert!(v.validate("captype", &json!("execute")).is_err());

        assert!(v.validate("contextlevel", &json!("CONTEXT_MODULE")).is_ok());
        assert!(v.validate("contextlevel", &json!("CONTEXT_GALAXY")).is_err());

        assert!(v.validate("permission", &json!("CAP_PREVENT")).is_ok());
        assert!(v.validate("permission", &json!("CAP_MAYBE")).is_err());
    }

    #[test]
    fn test_riskbitmask_normalizes_separators() {
        let v = validator();
        assert_eq!(
            v.validate("riskbitmask", &json!("RISK_XSS|RISK_CONFIG")).unwrap(),
            json!("RISK_XSS | RISK_CONFIG")
        );
        assert_eq!(
            v.validate("riskbitmask", &json!("RISK_XSS | RISK_CONFIG")).unwrap(),
            json!("RISK_XSS | RISK_CONFIG")
        );
        assert_eq!(
            v.validate("riskbitmask", &json!("RISK_SPAM | RISK_SPAM")).unwrap(),
            json!("RISK_SPAM | RISK_SPAM")
        );
    }

    #[test]
    fn test_riskbitmask_unknown_token() {
        let err = validator()
            .validate("riskbitmask", &json!("RISK_XSS | RISK_FOO"))
            .unwrap_err();
        match err {
            OptionError::Unknown { value, .. } => assert_eq!(value, "RISK_FOO"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_archetypes() {
        let v = validator();
        let archetypes = json!([
            {"role": "student", "permission": "CAP_ALLOW"},
            {"role": "editingteacher", "permission": "CAP_PREVENT", "extra": 1}
        ]);

        assert_eq!(
            v.validate("archetypes", &archetypes).unwrap(),
            json!([
                {"role": "student", "permission": "CAP_ALLOW"},
                {"role": "editingteacher", "permission": "CAP_PREVENT"}
            ])
        );
    }

    #[test]
    fn test_archetypes_rejects_bad_entries() {
        let v = validator();
        assert!(v.validate("archetypes", &json!("student")).is_err());
        assert!(v.validate("archetypes", &json!(["student"])).is_err());

        let err = v
            .validate("archetypes", &json!([{"role": "student"}]))
            .unwrap_err();
        assert_eq!(err.option(), "permission");

        let err = v
            .validate("archetypes", &json!([{"role": "student", "permission": "CAP_MAYBE"}]))
            .unwrap_err();
        assert!(matches!(err, OptionError::Unknown { .. }));
    }

    #[test]
    fn test_namespaced_names() {
        let v = validator();
        assert!(v.validate("eventname", &json!("\\core\\event\\course_viewed")).is_ok());
        assert!(v.validate("eventname", &json!("not_a_valid_namespace")).is_err());
        assert!(v.validate("extends", &json!("\\core\\event\\base")).is_ok());
        assert!(v.validate("extends", &json!("base")).is_err());
    }

    #[test]
    fn test_callback() {
        let v = validator();
        assert!(v.validate("callback", &json!("\\ns\\Class::method")).is_ok());
        assert!(v.validate("callback", &json!("\\namespace\\not_a_valid_static_function")).is_err());
        assert!(v.validate("callback", &json!("Class::method")).is_err());
        assert!(v.validate("callback", &json!("\\ns\\::method")).is_err());
    }

    #[test]
    fn test_priority() {
        let v = validator();
        assert_eq!(v.validate("priority", &json!(200)).unwrap(), json!(200));
        assert_eq!(v.validate("priority", &json!("150")).unwrap(), json!(150));
        assert_eq!(v.validate("priority", &json!(9.7)).unwrap(), json!(9));
        assert!(v.validate("priority", &json!(-1)).is_err());
        assert!(v.validate("priority", &json!("high")).is_err());
        assert!(v.validate("priority", &json!(true)).is_err());
    }

    #[test]
    fn test_internal_flag() {
        let v = validator();
        assert_eq!(v.validate("internal", &json!(true)).unwrap(), json!(true));
        assert_eq!(v.validate("internal", &json!(false)).unwrap(), json!(false));
        assert!(v.validate("internal", &json!("yes")).is_err());
    }

    #[test]
    fn test_dependencies() {
        let v = validator();
        let deps = json!({"mod_forum": "ANY_VERSION", "local_other": 2016052300});
        assert_eq!(
            v.validate("dependencies", &deps).unwrap(),
            json!([
                {"component": "mod_forum", "version": "ANY_VERSION"},
                {"component": "local_other", "version": "2016052300"}
            ])
        );
        assert!(v.validate("dependencies", &json!({"bogus_x": "ANY_VERSION"})).is_err());
        assert!(v.validate("dependencies", &json!({"mod_forum": "latest"})).is_err());
        assert!(v.validate("dependencies", &json!(["mod_forum"])).is_err());
    }

    #[test]
    fn test_name_list() {
        let v = validator();
        assert_eq!(
            v.validate("supports", &json!(["FEATURE_MOD_INTRO", "FEATURE_BACKUP_MOODLE2"]))
                .unwrap(),
            json!(["FEATURE_MOD_INTRO", "FEATURE_BACKUP_MOODLE2"])
        );
        assert_eq!(
            v.validate("supports", &json!("FEATURE_MOD_INTRO")).unwrap(),
            json!(["FEATURE_MOD_INTRO"])
        );
        assert!(v.validate("supports", &json!([""])).is_err());
    }

    #[test]
    fn test_option_spec_rule_override() {
        let spec = OptionSpec::with_rule("eventname", Rule::Generic);
        assert_eq!(spec.rule(), Rule::Generic);
        assert_eq!(OptionSpec::named("eventname").rule(), Rule::Namespaced);
    }
}

//! Pending output files.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::{Error, Result};

/// Data a template is rendered with.
#[derive(Debug, Clone, PartialEq)]
pub enum Scope {
    /// The full composed recipe.
    Recipe,
    /// A scope owned by a helper or one of its instances.
    Local(Map<String, Value>),
}

impl Scope {
    /// Resolve the scope against the composed recipe.
    pub fn resolve<'a>(&'a self, composed: &'a Map<String, Value>) -> &'a Map<String, Value> {
        match self {
            Scope::Recipe => composed,
            Scope::Local(scope) => scope,
        }
    }
}

/// A file waiting to be rendered and written.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputFileEntry {
    /// Template identifier.
    pub template: &'static str,
    /// Path relative to the plugin root.
    pub path: String,
    pub scope: Scope,
}

impl OutputFileEntry {
    /// An entry rendered with the composed recipe.
    pub fn recipe(template: &'static str, path: impl Into<String>) -> Self {
        Self {
            template,
            path: path.into(),
            scope: Scope::Recipe,
        }
    }

    /// An entry rendered with its own scope.
    pub fn local(template: &'static str, path: impl Into<String>, scope: Map<String, Value>) -> Self {
        Self {
            template,
            path: path.into(),
            scope: Scope::Local(scope),
        }
    }
}

/// Reject entries that resolve to the same output path.
pub fn check_unique_paths(entries: &[OutputFileEntry]) -> Result<()> {
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.path.as_str()) {
            return Err(Error::DuplicateOutput {
                path: entry.path.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_scope_resolve() {
        let composed = match json!({"component": "local_test"}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let mut local = Map::new();
        local.insert("eventname".to_string(), json!("created"));

        assert_eq!(Scope::Recipe.resolve(&composed), &composed);
        assert_eq!(Scope::Local(local.clone()).resolve(&composed), &local);
    }

    #[test]
    fn test_unique_paths() {
        let entries = vec![
            OutputFileEntry::recipe("version", "version.php"),
            OutputFileEntry::local("classes/event", "classes/event/a.php", Map::new()),
        ];
        assert!(check_unique_paths(&entries).is_ok());
    }

    #[test]
    fn test_duplicate_paths() {
        let entries = vec![
            OutputFileEntry::local("classes/event", "classes/event/a.php", Map::new()),
            OutputFileEntry::recipe("version", "version.php"),
            OutputFileEntry::local("classes/event", "classes/event/a.php", Map::new()),
        ];
        let err = check_unique_paths(&entries).unwrap_err();
        assert!(matches!(err, Error::DuplicateOutput { ref path } if path == "classes/event/a.php"));
    }
}

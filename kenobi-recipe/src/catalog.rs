//! Lookup tables for Moodle constants used by option validation.

use indexmap::IndexMap;

/// Moodle release tokens and the build number of each release.
const MOODLE_VERSIONS: &[(&str, &str)] = &[
    ("3.5", "2018051700"),
    ("3.4", "2017111300"),
    ("3.3", "2017051500"),
    ("3.2", "2016120500"),
    ("3.1", "2016052300"),
    ("3.0", "2015111600"),
    ("2.9", "2015051100"),
    ("2.8", "2014111000"),
    ("2.7", "2014051200"),
    ("2.6", "2013111800"),
    ("2.5", "2013051400"),
    ("2.4", "2012120300"),
    ("2.3", "2012062500"),
    ("2.2", "2011120500"),
];

/// Plugin maturity levels.
pub const MATURITY_LEVELS: &[&str] = &[
    "MATURITY_ALPHA",
    "MATURITY_BETA",
    "MATURITY_RC",
    "MATURITY_STABLE",
];

/// Capability types.
pub const CAPABILITY_TYPES: &[&str] = &["read", "write"];

/// Context levels a capability can be defined at.
pub const CONTEXT_LEVELS: &[&str] = &[
    "CONTEXT_SYSTEM",
    "CONTEXT_USER",
    "CONTEXT_COURSECAT",
    "CONTEXT_COURSE",
    "CONTEXT_MODULE",
    "CONTEXT_BLOCK",
];

/// Permissions an archetype can be granted.
pub const PERMISSIONS: &[&str] = &["CAP_ALLOW", "CAP_PREVENT"];

/// Risks a capability can carry.
pub const RISK_BITMASKS: &[&str] = &[
    "RISK_SPAM",
    "RISK_PERSONAL",
    "RISK_XSS",
    "RISK_CONFIG",
    "RISK_MANAGETRUST",
    "RISK_DATALOSS",
];

/// Version marker accepted for plugin dependencies.
pub const ANY_VERSION: &str = "ANY_VERSION";

/// Catalog of known Moodle constants.
///
/// The release table can be extended from configuration; the enumerated
/// sets are fixed.
#[derive(Debug, Clone)]
pub struct Catalog {
    versions: IndexMap<String, String>,
}

impl Catalog {
    /// Create a catalog with the built-in release table.
    pub fn new() -> Self {
        Self {
            versions: MOODLE_VERSIONS
                .iter()
                .map(|(token, build)| (token.to_string(), build.to_string()))
                .collect(),
        }
    }

    /// Add (or replace) a release token.
    pub fn with_version(mut self, token: impl Into<String>, build: impl Into<String>) -> Self {
        self.versions.insert(token.into(), build.into());
        self
    }

    /// Build number for a release token (e.g. "2.9" -> "2015051100").
    pub fn build_for(&self, token: &str) -> Option<&str> {
        self.versions.get(token).map(String::as_str)
    }

    /// Known release tokens, newest first for the built-in table.
    pub fn version_tokens(&self) -> Vec<&str> {
        self.versions.keys().map(String::as_str).collect()
    }

    pub fn maturity_levels(&self) -> &'static [&'static str] {
        MATURITY_LEVELS
    }

    pub fn capability_types(&self) -> &'static [&'static str] {
        CAPABILITY_TYPES
    }

    pub fn context_levels(&self) -> &'static [&'static str] {
        CONTEXT_LEVELS
    }

    pub fn permissions(&self) -> &'static [&'static str] {
        PERMISSIONS
    }

    pub fn risk_bitmasks(&self) -> &'static [&'static str] {
        RISK_BITMASKS
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

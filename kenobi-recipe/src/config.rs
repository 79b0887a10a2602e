use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::{Catalog, Error, Result};

/// Generator configuration loaded from `kenobi.toml`.
///
/// ```toml
/// moodle_root = "/var/www/moodle"
///
/// [versions]
/// "3.6" = "2018120300"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Moodle installation that plugins are generated into when no
    /// target directory is given.
    pub moodle_root: Option<PathBuf>,

    /// Extra Moodle release tokens and their build numbers.
    pub versions: IndexMap<String, String>,
}

impl Config {
    /// Name of the configuration file looked up in the working directory.
    pub const FILE_NAME: &'static str = "kenobi.toml";

    /// Parse a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse a configuration from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e, content, filename))
    }

    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one, `kenobi.toml` in the
    /// current directory is used when present, otherwise the defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading configuration");
            return Self::from_file(path);
        }

        let path = Path::new(Self::FILE_NAME);
        if path.is_file() {
            debug!(path = %path.display(), "loading configuration");
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// The default catalog extended with the configured release tokens.
    pub fn catalog(&self) -> Catalog {
        self.versions
            .iter()
            .fold(Catalog::new(), |catalog, (token, build)| {
                catalog.with_version(token.as_str(), build.as_str())
            })
    }
}

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("invalid component '{component}'")]
    #[diagnostic(
        code(kenobi::invalid_component),
        help("{reason}. Components look like 'local_myplugin' or 'mod_forum'.")
    )]
    InvalidComponent { component: String, reason: String },

    #[error("file '{path}' already exists")]
    #[diagnostic(
        code(kenobi::file_exists),
        help("generated files are never overwritten, remove it or pick another target directory")
    )]
    FileExists { path: PathBuf },

    #[error("cannot create directory '{path}'")]
    #[diagnostic(code(kenobi::create_dir))]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write '{path}'")]
    #[diagnostic(code(kenobi::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create an invalid component error
    pub fn invalid_component(component: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidComponent {
            component: component.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error reports an already occupied output path.
    pub fn is_file_exists(&self) -> bool {
        matches!(self, Error::FileExists { .. })
    }
}

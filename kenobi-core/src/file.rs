use std::{
    fs::OpenOptions,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use crate::{Error, Result};

/// A file to be generated.
///
/// Generated files are scaffolding: they are written once and never
/// overwritten, so [`File::write`] fails when the path is already taken.
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: String,
}

impl File {
    /// Create a new file with the given path and content
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the file, creating missing parent directories.
    ///
    /// The file is created with an exclusive create, so an existing file is
    /// reported as [`Error::FileExists`] and left untouched.
    pub fn write(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }

        let mut handle = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => Error::FileExists {
                    path: self.path.clone(),
                },
                _ => Error::Write {
                    path: self.path.clone(),
                    source: e,
                },
            })?;

        handle
            .write_all(self.content.as_bytes())
            .map_err(|e| Error::Write {
                path: self.path.clone(),
                source: e,
            })
    }
}

/// Create a directory and all of its parents.
///
/// An already existing directory is not an error.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(path).map_err(|e| Error::CreateDir {
        path: path.to_path_buf(),
        source: e,
    })
}

//! Rendering and writing of output entries.
//!
//! ```ignore
//! let emitter = FileEmitter::new()?;
//!
//! // Show what would be written
//! for file in emitter.preview(&composition.recipe, &composition.entries)? {
//!     println!("{}", file.path);
//! }
//!
//! // Write everything under the plugin root
//! let stats = emitter.generate_files(&root, &composition.recipe, &composition.entries)?;
//! ```

use std::path::Path;

use pluginkenobi_core::{File, ensure_dir};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::{OutputFileEntry, Result, TemplateEngine, check_unique_paths};

/// Renders output entries and writes them under a plugin root.
///
/// Files are created exclusively: an existing file is an error and is
/// left untouched. Writing stops at the first failure; files written
/// before it stay on disk.
#[derive(Debug)]
pub struct FileEmitter {
    engine: TemplateEngine,
}

impl FileEmitter {
    pub fn new() -> Result<Self> {
        Ok(Self::with_engine(TemplateEngine::new()?))
    }

    pub fn with_engine(engine: TemplateEngine) -> Self {
        Self { engine }
    }

    /// Render a single entry.
    pub fn render(&self, composed: &Map<String, Value>, entry: &OutputFileEntry) -> Result<String> {
        self.engine
            .render(entry.template, &entry.path, entry.scope.resolve(composed))
    }

    /// Render every entry without touching the filesystem.
    pub fn preview(
        &self,
        composed: &Map<String, Value>,
        entries: &[OutputFileEntry],
    ) -> Result<Vec<PreviewEntry>> {
        check_unique_paths(entries)?;
        entries
            .iter()
            .map(|entry| {
                Ok(PreviewEntry {
                    path: entry.path.clone(),
                    template: entry.template,
                    content: self.render(composed, entry)?,
                })
            })
            .collect()
    }

    /// Render every entry, then write them under `root`.
    ///
    /// Rendering happens before the first write, so a template error
    /// leaves the target untouched.
    pub fn generate_files(
        &self,
        root: &Path,
        composed: &Map<String, Value>,
        entries: &[OutputFileEntry],
    ) -> Result<WriteStats> {
        let files = self.preview(composed, entries)?;

        ensure_dir(root)?;

        let mut stats = WriteStats::default();
        for file in files {
            let path = root.join(&file.path);
            debug!(path = %path.display(), template = file.template, "writing file");
            File::new(path, file.content).write()?;
            stats.written += 1;
            stats.written_paths.push(file.path);
        }

        info!(root = %root.display(), files = stats.written, "generated plugin files");
        Ok(stats)
    }
}

/// A rendered file that has not been written.
#[derive(Debug, Clone)]
pub struct PreviewEntry {
    /// Path relative to the plugin root.
    pub path: String,
    pub template: &'static str,
    pub content: String,
}

/// Statistics from a write operation.
#[derive(Debug, Default)]
pub struct WriteStats {
    /// Number of files written.
    pub written: usize,
    /// Paths of written files, relative to the plugin root.
    pub written_paths: Vec<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::Error;

    fn composed() -> Map<String, Value> {
        match json!({
            "component": "local_test",
            "type": "local",
            "plugin": "test",
            "prefix": "local_test",
            "name": "Test",
            "version": 2016121200,
            "requires": "2015051100",
            "year": 2016,
            "author": {"name": "Jane Doe", "email": "jane@example.com"}
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn entries() -> Vec<OutputFileEntry> {
        vec![
            OutputFileEntry::recipe("version", "version.php"),
            OutputFileEntry::recipe("lang", "lang/en/local_test.php"),
        ]
    }

    #[test]
    fn test_generate_files() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("local").join("test");
        let emitter = FileEmitter::new().unwrap();

        let stats = emitter.generate_files(&root, &composed(), &entries()).unwrap();

        assert_eq!(stats.written, 2);
        assert_eq!(stats.written_paths, vec!["version.php", "lang/en/local_test.php"]);
        let version = std::fs::read_to_string(root.join("version.php")).unwrap();
        assert!(version.contains("$plugin->component = 'local_test';"));
        assert!(root.join("lang/en/local_test.php").exists());
    }

    #[test]
    fn test_existing_file_is_not_overwritten() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("version.php");
        std::fs::write(&path, "user code").unwrap();

        let emitter = FileEmitter::new().unwrap();
        let err = emitter
            .generate_files(temp.path(), &composed(), &entries())
            .unwrap_err();

        assert!(matches!(err, Error::Core(ref e) if e.is_file_exists()));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "user code");
    }

    #[test]
    fn test_second_run_collides() {
        let temp = TempDir::new().unwrap();
        let emitter = FileEmitter::new().unwrap();

        emitter.generate_files(temp.path(), &composed(), &entries()).unwrap();
        let first = std::fs::read_to_string(temp.path().join("version.php")).unwrap();

        assert!(emitter.generate_files(temp.path(), &composed(), &entries()).is_err());
        let second = std::fs::read_to_string(temp.path().join("version.php")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_preview_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("plugin");
        let emitter = FileEmitter::new().unwrap();

        let preview = emitter.preview(&composed(), &entries()).unwrap();

        assert_eq!(preview.len(), 2);
        assert_eq!(preview[0].path, "version.php");
        assert!(preview[1].content.contains("$string['pluginname'] = 'Test';"));
        assert!(!root.exists());
    }

    #[test]
    fn test_duplicate_entries_write_nothing() {
        let temp = TempDir::new().unwrap();
        let emitter = FileEmitter::new().unwrap();
        let mut entries = entries();
        entries.push(OutputFileEntry::recipe("version", "version.php"));

        let err = emitter
            .generate_files(temp.path(), &composed(), &entries)
            .unwrap_err();

        assert!(matches!(err, Error::DuplicateOutput { .. }));
        assert!(!temp.path().join("version.php").exists());
    }

    #[test]
    fn test_local_scope_ignores_composed() {
        let emitter = FileEmitter::new().unwrap();
        let mut scope = composed();
        scope.insert("name".to_string(), json!("Local name"));
        let entry = OutputFileEntry::local("lang", "lang/en/local_test.php", scope);

        let output = emitter.render(&composed(), &entry).unwrap();
        assert!(output.contains("'Local name'"));
    }
}

//! Generate command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from plugin generation.
#[derive(Debug)]
pub struct GenerateReport {
    /// Full component name.
    pub component: String,
    /// Plugin type of the component.
    pub plugin_type: String,
    /// Composed features, core first.
    pub features: Vec<String>,
    /// Generation result (files written or preview).
    pub result: GenerationResult,
}

/// Result of plugin generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
}

/// Result when files were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    /// Plugin directory.
    pub root: PathBuf,
    /// Written files, relative to the plugin directory.
    pub files: Vec<String>,
}

/// Result of a dry-run preview.
#[derive(Debug)]
pub struct PreviewResult {
    /// Plugin directory the files would go to, when one could be resolved.
    pub root: Option<PathBuf>,
    /// Files that would be generated.
    pub files: Vec<PreviewFile>,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    /// File path.
    pub path: String,
    /// File content.
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(preview) => self.render_preview(out, preview),
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        out.preformatted(&format!("{} ({})", self.component, self.plugin_type));
        out.key_value("Features", &self.features.join(", "));
        out.newline();

        out.section(&format!("Generated {}", written.root.display()));
        for file in &written.files {
            out.added_item(file);
        }
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for file in &preview.files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        match &preview.root {
            Some(root) => out.preformatted(&format!(
                "{} files would be generated in {}",
                preview.files.len(),
                root.display()
            )),
            None => out.preformatted(&format!("{} files would be generated", preview.files.len())),
        }
    }
}

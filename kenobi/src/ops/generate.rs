//! Generate operation - writing plugin files.

use std::path::{Path, PathBuf};

use eyre::{Context, Result, bail};
use pluginkenobi_codegen::{FileEmitter, PluginGenerator};
use pluginkenobi_core::PluginComponent;
use pluginkenobi_recipe::Config;
use tracing::debug;

use crate::{
    ops::Plan,
    reports::{GenerateReport, GenerationResult, PreviewFile, PreviewResult, WrittenResult},
};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Directory the plugin directory is created in.
    pub target_dir: Option<&'a Path>,
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the generate operation.
///
/// A dry run renders every file but never touches the filesystem, and
/// doesn't need a target directory.
pub fn generate(plan: &Plan, config: &Config, opts: GenerateOptions) -> Result<GenerateReport> {
    let composition = &plan.composition;
    let emitter = FileEmitter::new().wrap_err("Failed to load templates")?;

    let result = if opts.dry_run {
        let files = emitter
            .preview(&composition.recipe, &composition.entries)
            .wrap_err("Failed to render plugin files")?
            .into_iter()
            .map(|f| PreviewFile {
                path: f.path,
                content: f.content,
            })
            .collect();
        let root = plugin_root(
            opts.target_dir,
            config,
            plan.generator.as_ref(),
            &composition.component,
        )
        .ok();
        GenerationResult::Preview(PreviewResult { root, files })
    } else {
        let root = plugin_root(
            opts.target_dir,
            config,
            plan.generator.as_ref(),
            &composition.component,
        )?;
        debug!(root = %root.display(), "writing plugin");

        let stats = plan
            .generator
            .generate_files(&emitter, &root, composition)
            .wrap_err("Failed to generate plugin files")?;

        GenerationResult::Written(WrittenResult {
            root,
            files: stats.written_paths,
        })
    };

    Ok(GenerateReport {
        component: composition.component.frankenstyle(),
        plugin_type: plan.generator.plugin_type().to_string(),
        features: composition.features.iter().map(|f| f.to_string()).collect(),
        result,
    })
}

/// Directory the plugin is written to: `<target>/<plugin name>`.
///
/// Without an explicit target the plugin type's default location under the
/// configured Moodle root is used.
pub fn plugin_root(
    target_dir: Option<&Path>,
    config: &Config,
    generator: &dyn PluginGenerator,
    component: &PluginComponent,
) -> Result<PathBuf> {
    let parent = match (target_dir, &config.moodle_root) {
        (Some(dir), _) => dir.to_path_buf(),
        (None, Some(moodle_root)) => moodle_root.join(generator.default_location()),
        (None, None) => bail!(
            "no target directory: pass --target-dir or set moodle_root in {}",
            Config::FILE_NAME
        ),
    };
    Ok(parent.join(component.name()))
}

#[cfg(test)]
mod tests {
    use pluginkenobi_codegen::ToolGenerator;
    use pluginkenobi_recipe::Recipe;
    use tempfile::TempDir;

    use super::*;
    use crate::ops::plan;

    fn recipe() -> Recipe {
        r#"
component: local_test
name: Test
version: 2016121200
requires: "2.9"
author:
  name: Jane Doe
  email: jane@example.com
features:
  install: true
"#
        .parse()
        .unwrap()
    }

    #[test]
    fn test_plugin_root() {
        let component: PluginComponent = "tool_test".parse().unwrap();
        let generator = ToolGenerator::new();

        let root = plugin_root(Some(Path::new("out")), &Config::default(), &generator, &component)
            .unwrap();
        assert_eq!(root, PathBuf::from("out/test"));

        let config = Config {
            moodle_root: Some(PathBuf::from("/var/www/moodle")),
            ..Default::default()
        };
        let root = plugin_root(None, &config, &generator, &component).unwrap();
        assert_eq!(root, PathBuf::from("/var/www/moodle/admin/tool/test"));

        assert!(plugin_root(None, &Config::default(), &generator, &component).is_err());
    }

    #[test]
    fn test_generate_writes_files() {
        let temp = TempDir::new().unwrap();
        let config = Config::default();
        let plan = plan(&recipe(), &config).unwrap();

        let report = generate(
            &plan,
            &config,
            GenerateOptions {
                target_dir: Some(temp.path()),
                dry_run: false,
            },
        )
        .unwrap();

        let GenerationResult::Written(written) = report.result else {
            panic!("expected written files");
        };
        assert_eq!(written.root, temp.path().join("test"));
        assert_eq!(
            written.files,
            vec!["version.php", "lang/en/local_test.php", "db/install.php"]
        );
        assert!(temp.path().join("test/db/install.php").exists());
    }

    #[test]
    fn test_generate_into_moodle_root() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            moodle_root: Some(temp.path().to_path_buf()),
            ..Default::default()
        };
        let plan = plan(&recipe(), &config).unwrap();

        generate(
            &plan,
            &config,
            GenerateOptions {
                target_dir: None,
                dry_run: false,
            },
        )
        .unwrap();

        assert!(temp.path().join("local/test/version.php").exists());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let config = Config::default();
        let plan = plan(&recipe(), &config).unwrap();

        let report = generate(
            &plan,
            &config,
            GenerateOptions {
                target_dir: Some(temp.path()),
                dry_run: true,
            },
        )
        .unwrap();

        let GenerationResult::Preview(preview) = report.result else {
            panic!("expected a preview");
        };
        assert_eq!(preview.files.len(), 3);
        assert_eq!(preview.root, Some(temp.path().join("test")));
        assert!(!temp.path().join("test").exists());
    }

    #[test]
    fn test_dry_run_without_target() {
        let config = Config::default();
        let plan = plan(&recipe(), &config).unwrap();

        let report = generate(
            &plan,
            &config,
            GenerateOptions {
                target_dir: None,
                dry_run: true,
            },
        )
        .unwrap();

        assert!(matches!(report.result, GenerationResult::Preview(PreviewResult { root: None, .. })));
    }

    #[test]
    fn test_existing_plugin_fails() {
        let temp = TempDir::new().unwrap();
        let config = Config::default();
        let plan = plan(&recipe(), &config).unwrap();
        let opts = || GenerateOptions {
            target_dir: Some(temp.path()),
            dry_run: false,
        };

        generate(&plan, &config, opts()).unwrap();
        let err = generate(&plan, &config, opts()).unwrap_err();
        assert!(err.to_string().contains("Failed to generate plugin files"));
    }
}

use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use pluginkenobi_recipe::Config;

use super::{UnwrapOrExit, load_recipe};
use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to the recipe
    #[arg(short, long)]
    pub recipe: PathBuf,

    /// Directory the plugin directory is created in (defaults to the
    /// plugin type's location under the configured Moodle root)
    #[arg(short, long)]
    pub target_dir: Option<PathBuf>,

    /// Preview generated files without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    pub fn run(&self, config: &Config) -> Result<()> {
        let recipe = load_recipe(&self.recipe);
        let plan = ops::plan(&recipe, config).unwrap_or_exit();

        let report = ops::generate(
            &plan,
            config,
            GenerateOptions {
                target_dir: self.target_dir.as_deref(),
                dry_run: self.dry_run,
            },
        )?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}

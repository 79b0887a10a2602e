use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use pluginkenobi_recipe::Config;

use super::{UnwrapOrExit, load_recipe};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to the recipe
    #[arg(short, long)]
    pub recipe: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self, config: &Config) -> Result<()> {
        let recipe = load_recipe(&self.recipe);
        let plan = ops::plan(&recipe, config).unwrap_or_exit();

        let report = ops::check(&plan, &self.recipe);
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}

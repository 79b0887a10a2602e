mod check;
mod completions;
mod features;
mod generate;

use std::path::{Path, PathBuf};

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use features::FeaturesCommand;
use generate::GenerateCommand;
use pluginkenobi_recipe::{Config, Recipe};

/// Extension trait for exiting on recipe errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for pluginkenobi_recipe::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

impl<T> UnwrapOrExit<T> for pluginkenobi_codegen::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "kenobi")]
#[command(version)]
#[command(about = "Scaffold Moodle plugins from a YAML recipe")]
pub(crate) struct Cli {
    /// Path to kenobi.toml (defaults to ./kenobi.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(&self.load_config()),
            Commands::Check(cmd) => cmd.run(&self.load_config()),
            Commands::Features(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }

    fn load_config(&self) -> Config {
        Config::discover(self.config.as_deref()).unwrap_or_exit()
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a plugin from a recipe
    Generate(GenerateCommand),

    /// Validate a recipe without writing files
    Check(CheckCommand),

    /// List the features of each plugin type
    Features(FeaturesCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Load a recipe, exiting with a diagnostic when it can't be read.
fn load_recipe(path: &Path) -> Recipe {
    Recipe::from_file(path).unwrap_or_exit()
}

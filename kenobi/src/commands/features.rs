use clap::Args;
use eyre::Result;

use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct FeaturesCommand {
    /// Plugin type to list (local, mod or tool); all types when omitted
    pub plugin_type: Option<String>,
}

impl FeaturesCommand {
    pub fn run(&self) -> Result<()> {
        let report = ops::features(self.plugin_type.as_deref())?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}

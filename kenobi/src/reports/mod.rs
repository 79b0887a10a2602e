//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod check;
mod features;
mod generate;
mod output;

pub use check::CheckReport;
pub use features::{FeatureInfo, FeaturesReport, SchemaInfo};
pub use generate::{GenerateReport, GenerationResult, PreviewFile, PreviewResult, WrittenResult};
pub use output::{Report, TerminalOutput};

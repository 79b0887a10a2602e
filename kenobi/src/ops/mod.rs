//! Core operations.
//!
//! This module contains the business logic for kenobi commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod features;
pub mod generate;
pub mod plan;

pub use check::check;
pub use features::features;
pub use generate::{GenerateOptions, generate};
pub use plan::{Plan, plan};

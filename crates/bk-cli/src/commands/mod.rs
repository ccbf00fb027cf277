//! CLI subcommand implementations.

pub mod build;
pub mod gaps;

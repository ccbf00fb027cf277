//! Operation log builder CLI library.
//!
//! This crate provides the command-line interface and the file-loading
//! layer around the `bk-core` pipeline.

mod cli;
pub mod commands;
mod config;
pub mod loader;

pub use cli::{Cli, Commands};
pub use config::Config;

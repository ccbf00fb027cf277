//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Bike-share operation log builder.
///
/// Normalizes raw trip records and station status snapshots into a single
/// chronological log of departures, arrivals and status reports, inferring
/// trip legs the source data never recorded.
#[derive(Debug, Parser)]
#[command(name = "bk", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the full operation log from trip and status files.
    Build {
        /// Trip CSV files (gzip-compressed if the name ends in .gz).
        #[arg(long, required = true, num_args = 1..)]
        trips: Vec<PathBuf>,

        /// Station status CSV files.
        #[arg(long, num_args = 1..)]
        status: Vec<PathBuf>,

        /// Where to write the log. Defaults to the configured output path.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write JSON to stdout instead of CSV to the output path.
        #[arg(long)]
        json: bool,
    },

    /// Report only the corrective operations synthesized for trip-chain gaps.
    Gaps {
        /// Trip CSV files (gzip-compressed if the name ends in .gz).
        #[arg(long, required = true, num_args = 1..)]
        trips: Vec<PathBuf>,
    },
}

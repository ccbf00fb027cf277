//! Gaps command: show only the synthesized corrective operations.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;

use bk_core::{Trip, synthesize_missing_ops};

use crate::loader;

/// Loads trips and writes the corrective operations for every detected
/// trip-chain gap as CSV.
pub fn run<W: Write>(writer: &mut W, trip_paths: &[PathBuf]) -> Result<()> {
    let mut trips: Vec<Trip> = Vec::new();
    for path in trip_paths {
        trips.extend(loader::load_trips(path)?);
    }

    let ops = synthesize_missing_ops(&trips);
    tracing::info!(
        trips = trips.len(),
        gaps = ops.len() / 2,
        "gap detection complete"
    );

    let mut csv_writer = csv::Writer::from_writer(writer);
    for op in &ops {
        csv_writer.serialize(op)?;
    }
    csv_writer.flush()?;
    Ok(())
}

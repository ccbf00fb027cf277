//! Build command: run the full pipeline and write the merged log.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use bk_core::{Operation, StationStatusSnapshot, Trip, build_op_log};

use crate::loader;

/// Loads every input file, runs the pipeline, and writes the merged log.
///
/// With `json` set the log goes to stdout as JSON; otherwise it is written
/// to `output` as CSV.
pub fn run(
    trip_paths: &[PathBuf],
    status_paths: &[PathBuf],
    output: &Path,
    json: bool,
) -> Result<()> {
    let ops = build(trip_paths, status_paths)?;

    if json {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        serde_json::to_writer_pretty(&mut handle, &ops)?;
        writeln!(handle)?;
    } else {
        write_csv(&ops, output)?;
        println!("wrote {} operations to {}", ops.len(), output.display());
    }

    Ok(())
}

/// Loads all inputs and builds the merged operation log.
pub fn build(trip_paths: &[PathBuf], status_paths: &[PathBuf]) -> Result<Vec<Operation>> {
    let mut trips: Vec<Trip> = Vec::new();
    for path in trip_paths {
        trips.extend(loader::load_trips(path)?);
    }

    let mut snapshots: Vec<StationStatusSnapshot> = Vec::new();
    for path in status_paths {
        snapshots.extend(loader::load_status(path)?);
    }

    Ok(build_op_log(&trips, &snapshots))
}

/// Writes operations as CSV with one header row.
pub fn write_csv(ops: &[Operation], output: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    for op in ops {
        writer.serialize(op)?;
    }
    writer.flush()?;
    Ok(())
}

//! Station status snapshots and their operation adapter.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::op::Operation;
use crate::types::StationId;

/// A point-in-time report of a station's available bike count, independent
/// of any trip. Read-only input to the adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationStatusSnapshot {
    pub report_time: NaiveDateTime,
    pub station_id: StationId,
    pub station_name: String,
    pub available_bikes: u32,
}

/// Maps each snapshot to exactly one zero-effect status operation.
///
/// Pure, 1:1, no filtering. The reported bike count is carried through for
/// downstream consumers.
pub fn ops_from_status(snapshots: &[StationStatusSnapshot]) -> Vec<Operation> {
    let ops: Vec<Operation> = snapshots
        .iter()
        .map(|snapshot| {
            Operation::status(
                snapshot.report_time,
                snapshot.station_id.clone(),
                snapshot.station_name.clone(),
                snapshot.available_bikes,
            )
        })
        .collect();

    tracing::debug!(snapshots = snapshots.len(), "adapted status snapshots");
    ops
}

//! The full trip-and-status pipeline.

use crate::convert::ops_from_trips;
use crate::merge::merge_ops;
use crate::op::Operation;
use crate::status::{StationStatusSnapshot, ops_from_status};
use crate::synthesis::synthesize_missing_ops;
use crate::trip::Trip;

/// Builds the complete chronological operation log from raw trips and
/// station status snapshots.
///
/// Trips are converted to departure/arrival pairs, gaps in each bike's
/// trip chain are closed with corrective pairs, status snapshots become
/// zero-effect status operations, and everything is merged into one
/// sequence sorted ascending by `op_time`.
pub fn build_op_log(trips: &[Trip], snapshots: &[StationStatusSnapshot]) -> Vec<Operation> {
    let converted = ops_from_trips(trips);
    let corrective = synthesize_missing_ops(trips);
    let status = ops_from_status(snapshots);

    let merged = merge_ops([converted, corrective, status]);
    tracing::debug!(ops = merged.len(), "built operation log");
    merged
}

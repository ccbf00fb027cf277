//! Trip-to-operation conversion.

use crate::op::Operation;
use crate::trip::Trip;

/// Expands each trip into its two directional operations.
///
/// Every trip yields exactly one departure at the start station and one
/// arrival at the end station; no filtering. Output is sorted ascending
/// by `op_time`.
pub fn ops_from_trips(trips: &[Trip]) -> Vec<Operation> {
    let mut ops = Vec::with_capacity(trips.len() * 2);

    for trip in trips {
        ops.push(Operation::departure(
            trip.start_time,
            trip.start_station_id.clone(),
            trip.start_station_name.clone(),
            trip.bike_id.clone(),
        ));
        ops.push(Operation::arrival(
            trip.stop_time,
            trip.end_station_id.clone(),
            trip.end_station_name.clone(),
            trip.bike_id.clone(),
        ));
    }

    ops.sort_by_key(|op| op.op_time);
    tracing::debug!(trips = trips.len(), ops = ops.len(), "converted trips");
    ops
}

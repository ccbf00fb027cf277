//! Gap detection and corrective-operation synthesis.
//!
//! A bike's trips should chain: its next departure station should be the
//! station it last arrived at. When they disagree, an intermediate leg went
//! unrecorded (truck rebalancing, a dropped record). This module detects
//! those gaps per bike and fabricates a "ghost trip" that bisects the
//! unexplained interval, so the per-station bike counts stay consistent.

use std::collections::HashMap;

use chrono::Duration;
use rayon::prelude::*;

use crate::op::Operation;
use crate::trip::Trip;
use crate::types::BikeId;

/// Detects station mismatches in each bike's trip sequence and synthesizes
/// a corrective departure/arrival pair per gap.
///
/// Trips are partitioned by bike ID and ordered by `start_time` within each
/// partition (stable, so insertion order breaks ties). A gap is flagged
/// when a trip's start station differs from the previous trip's end
/// station; the first trip per bike has no previous arrival and is never
/// flagged. The corrective departure is placed at the temporal midpoint of
/// the gap, the corrective arrival 1 millisecond later so the pair has a
/// deterministic, strictly increasing timestamp order.
///
/// A non-positive gap (out-of-order source data) still synthesizes the
/// pair with a degenerate or inverted span; it is logged, not rejected.
///
/// Partitions are independent, so they are scanned in parallel. The
/// returned operations are sorted ascending by `op_time`.
pub fn synthesize_missing_ops(trips: &[Trip]) -> Vec<Operation> {
    let mut by_bike: HashMap<&BikeId, Vec<&Trip>> = HashMap::new();
    for trip in trips {
        by_bike.entry(&trip.bike_id).or_default().push(trip);
    }

    let mut ops: Vec<Operation> = by_bike
        .into_par_iter()
        .flat_map_iter(|(_, partition)| scan_partition(partition))
        .collect();

    ops.sort_by_key(|op| op.op_time);
    tracing::debug!(trips = trips.len(), corrective_ops = ops.len(), "synthesized gaps");
    ops
}

/// Merges corrective operations into an existing operation collection and
/// re-sorts by `op_time`.
pub fn fill_missing_ops(trips: &[Trip], ops: Vec<Operation>) -> Vec<Operation> {
    let mut filled = synthesize_missing_ops(trips);
    filled.extend(ops);
    filled.sort_by_key(|op| op.op_time);
    filled
}

/// Scans one bike's time-ordered trips with a previous-trip cursor.
fn scan_partition(mut partition: Vec<&Trip>) -> Vec<Operation> {
    partition.sort_by_key(|trip| trip.start_time);

    let mut ops = Vec::new();
    let mut previous: Option<&Trip> = None;

    for trip in partition {
        if let Some(prev) = previous {
            if trip.start_station_id != prev.end_station_id {
                let time_gap = trip.start_time - prev.stop_time;
                if time_gap <= Duration::zero() {
                    tracing::warn!(
                        bike_id = %trip.bike_id,
                        prev_stop = %prev.stop_time,
                        next_start = %trip.start_time,
                        "non-positive gap, corrective pair will have a degenerate span"
                    );
                }

                let depart_at = prev.stop_time + time_gap / 2;
                ops.push(Operation::departure(
                    depart_at,
                    prev.end_station_id.clone(),
                    prev.end_station_name.clone(),
                    trip.bike_id.clone(),
                ));
                ops.push(Operation::arrival(
                    depart_at + Duration::milliseconds(1),
                    trip.start_station_id.clone(),
                    trip.start_station_name.clone(),
                    trip.bike_id.clone(),
                ));
            }
        }
        previous = Some(trip);
    }

    ops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::OpType;
    use crate::types::StationId;
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts(minutes: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2019, 9, 1)
            .unwrap()
            .and_hms_opt(9, minutes, 0)
            .unwrap()
    }

    fn trip(
        bike: &str,
        start: (&str, NaiveDateTime),
        stop: (&str, NaiveDateTime),
    ) -> Trip {
        Trip {
            start_time: start.1,
            stop_time: stop.1,
            start_station_id: StationId::new(start.0).unwrap(),
            start_station_name: format!("Station {}", start.0),
            end_station_id: StationId::new(stop.0).unwrap(),
            end_station_name: format!("Station {}", stop.0),
            bike_id: BikeId::new(bike).unwrap(),
            trip_duration: None,
            user_type: None,
        }
    }

    #[test]
    fn mismatched_stations_synthesize_one_pair() {
        // Bike x: A -> B at 0..10, then C -> D at 20..30. B != C is a gap.
        let trips = vec![
            trip("x", ("A", ts(0)), ("B", ts(10))),
            trip("x", ("C", ts(20)), ("D", ts(30))),
        ];

        let ops = synthesize_missing_ops(&trips);

        assert_eq!(ops.len(), 2);

        let departure = &ops[0];
        assert_eq!(departure.op_type, OpType::Departure);
        assert_eq!(departure.station_id.as_str(), "B");
        assert_eq!(departure.op_time, ts(15));
        assert_eq!(departure.net_bikes(), -1);
        assert_eq!(departure.bike_id.as_ref().unwrap().as_str(), "x");

        let arrival = &ops[1];
        assert_eq!(arrival.op_type, OpType::Arrival);
        assert_eq!(arrival.station_id.as_str(), "C");
        assert_eq!(arrival.op_time, ts(15) + Duration::milliseconds(1));
        assert_eq!(arrival.net_bikes(), 1);
        assert_eq!(arrival.bike_id.as_ref().unwrap().as_str(), "x");
    }

    #[test]
    fn matching_stations_synthesize_nothing() {
        let trips = vec![
            trip("x", ("A", ts(0)), ("B", ts(10))),
            trip("x", ("B", ts(20)), ("D", ts(30))),
        ];

        assert!(synthesize_missing_ops(&trips).is_empty());
    }

    #[test]
    fn first_trip_per_bike_is_never_flagged() {
        // No previous arrival exists, whatever station the bike starts at.
        let trips = vec![trip("x", ("Q", ts(0)), ("B", ts(10)))];

        assert!(synthesize_missing_ops(&trips).is_empty());
    }

    #[test]
    fn bikes_are_partitioned_independently() {
        // Bike y ends at B; bike z starts at C. No cross-bike comparison.
        let trips = vec![
            trip("y", ("A", ts(0)), ("B", ts(10))),
            trip("z", ("C", ts(20)), ("D", ts(30))),
        ];

        assert!(synthesize_missing_ops(&trips).is_empty());
    }

    #[test]
    fn partitions_order_by_start_time_not_input_order() {
        // Input order reversed; ordered by start_time the chain is
        // A -> B then B -> D, so no gap.
        let trips = vec![
            trip("x", ("B", ts(20)), ("D", ts(30))),
            trip("x", ("A", ts(0)), ("B", ts(10))),
        ];

        assert!(synthesize_missing_ops(&trips).is_empty());
    }

    #[test]
    fn midpoint_bisects_the_gap() {
        let trips = vec![
            trip("x", ("A", ts(0)), ("B", ts(10))),
            trip("x", ("C", ts(40)), ("D", ts(50))),
        ];

        let ops = synthesize_missing_ops(&trips);

        // Gap runs 10..40; midpoint at 25.
        assert_eq!(ops[0].op_time, ts(25));
        assert_eq!(ops[1].op_time, ts(25) + Duration::milliseconds(1));
    }

    #[test]
    fn multiple_gaps_for_one_bike() {
        let trips = vec![
            trip("x", ("A", ts(0)), ("B", ts(10))),
            trip("x", ("C", ts(20)), ("D", ts(30))),
            trip("x", ("E", ts(40)), ("F", ts(50))),
        ];

        let ops = synthesize_missing_ops(&trips);

        assert_eq!(ops.len(), 4);
        assert!(ops.windows(2).all(|w| w[0].op_time <= w[1].op_time));
    }

    #[test]
    fn non_positive_gap_still_synthesizes_degenerate_pair() {
        // Overlapping trips: next starts before previous stops. Known
        // data-quality caveat, preserved as-is.
        let trips = vec![
            trip("x", ("A", ts(0)), ("B", ts(30))),
            trip("x", ("C", ts(20)), ("D", ts(40))),
        ];

        let ops = synthesize_missing_ops(&trips);

        assert_eq!(ops.len(), 2);
        // time_gap = -10 min; departure at 30 - 5 = 25.
        assert_eq!(ops[0].op_time, ts(25));
        assert_eq!(ops[1].op_time, ts(25) + Duration::milliseconds(1));
    }

    #[test]
    fn fill_merges_corrective_ops_into_existing_ops() {
        let trips = vec![
            trip("x", ("A", ts(0)), ("B", ts(10))),
            trip("x", ("C", ts(20)), ("D", ts(30))),
        ];
        let converted = crate::convert::ops_from_trips(&trips);

        let filled = fill_missing_ops(&trips, converted);

        // 4 converted + 2 corrective.
        assert_eq!(filled.len(), 6);
        assert!(filled.windows(2).all(|w| w[0].op_time <= w[1].op_time));
    }

    #[test]
    fn empty_input_synthesizes_nothing() {
        assert!(synthesize_missing_ops(&[]).is_empty());
    }
}

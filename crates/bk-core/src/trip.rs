//! Trip records as supplied by the loader.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::types::{BikeId, StationId, ValidationError};

/// A single recorded trip: one bike moving from one station to another.
///
/// Trips are immutable once loaded; the pipeline only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    /// When the bike left the start station.
    pub start_time: NaiveDateTime,
    /// When the bike was docked at the end station.
    pub stop_time: NaiveDateTime,
    pub start_station_id: StationId,
    pub start_station_name: String,
    pub end_station_id: StationId,
    pub end_station_name: String,
    pub bike_id: BikeId,
    /// Recorded trip duration in seconds, if the feed provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_duration: Option<i64>,
    /// Subscriber/customer class, if the feed provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
}

impl Trip {
    /// Checks the start ≤ stop invariant.
    ///
    /// The loader calls this before handing trips to the pipeline; a trip
    /// that stops before it starts is a data-validation failure, never
    /// silently repaired.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.start_time > self.stop_time {
            return Err(ValidationError::StartAfterStop {
                bike_id: self.bike_id.to_string(),
                start: self.start_time,
                stop: self.stop_time,
            });
        }
        Ok(())
    }
}

//! Operations: the unifying timestamped event record of the pipeline.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::types::{BikeId, StationId};

/// The kind of station event an operation describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpType {
    /// A bike left the station.
    Departure,
    /// A bike was docked at the station.
    Arrival,
    /// A point-in-time report of the station's bike count.
    Status,
}

impl OpType {
    /// Net change in the station's bike count for this kind of operation.
    #[must_use]
    pub const fn net_bikes(self) -> i8 {
        match self {
            Self::Departure => -1,
            Self::Arrival => 1,
            Self::Status => 0,
        }
    }
}

impl fmt::Display for OpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Departure => "departure",
            Self::Arrival => "arrival",
            Self::Status => "status",
        };
        write!(f, "{s}")
    }
}

impl FromStr for OpType {
    type Err = UnknownOpType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "departure" => Ok(Self::Departure),
            "arrival" => Ok(Self::Arrival),
            "status" => Ok(Self::Status),
            _ => Err(UnknownOpType(s.to_string())),
        }
    }
}

impl Serialize for OpType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for OpType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown operation type strings.
#[derive(Debug, Clone)]
pub struct UnknownOpType(String);

impl fmt::Display for UnknownOpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown op type: {}", self.0)
    }
}

impl std::error::Error for UnknownOpType {}

/// A single bike-count-affecting event at a station.
///
/// Operations are created through [`Operation::departure`],
/// [`Operation::arrival`] and [`Operation::status`], which derive
/// `net_bikes` from the op type, and are never mutated afterwards. The
/// final artifact of the pipeline is a sequence of these sorted ascending
/// by `op_time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub op_time: NaiveDateTime,
    pub station_id: StationId,
    pub station_name: String,
    /// The bike involved. `None` for status reports, which concern the
    /// station as a whole.
    pub bike_id: Option<BikeId>,
    pub op_type: OpType,
    net_bikes: i8,
    /// Reported bike count, carried through from status snapshots for
    /// downstream consumers. Not used by the merge.
    ///
    /// Always serialized, even when absent, so every record in a CSV
    /// rendering of the log has the same width.
    #[serde(default)]
    pub available_bikes: Option<u32>,
}

impl Operation {
    /// A bike leaving a station.
    #[must_use]
    pub fn departure(
        op_time: NaiveDateTime,
        station_id: StationId,
        station_name: String,
        bike_id: BikeId,
    ) -> Self {
        Self::trip_op(OpType::Departure, op_time, station_id, station_name, bike_id)
    }

    /// A bike docking at a station.
    #[must_use]
    pub fn arrival(
        op_time: NaiveDateTime,
        station_id: StationId,
        station_name: String,
        bike_id: BikeId,
    ) -> Self {
        Self::trip_op(OpType::Arrival, op_time, station_id, station_name, bike_id)
    }

    /// A station status report. Affects no bike count.
    #[must_use]
    pub fn status(
        op_time: NaiveDateTime,
        station_id: StationId,
        station_name: String,
        available_bikes: u32,
    ) -> Self {
        Self {
            op_time,
            station_id,
            station_name,
            bike_id: None,
            op_type: OpType::Status,
            net_bikes: OpType::Status.net_bikes(),
            available_bikes: Some(available_bikes),
        }
    }

    fn trip_op(
        op_type: OpType,
        op_time: NaiveDateTime,
        station_id: StationId,
        station_name: String,
        bike_id: BikeId,
    ) -> Self {
        Self {
            op_time,
            station_id,
            station_name,
            bike_id: Some(bike_id),
            op_type,
            net_bikes: op_type.net_bikes(),
            available_bikes: None,
        }
    }

    /// Net change in the station's bike count: -1, 0 or +1.
    #[must_use]
    pub const fn net_bikes(&self) -> i8 {
        self.net_bikes
    }
}

//! Loading trip and station status files.
//!
//! The pipeline itself is pure; this module is the data-loading collaborator
//! that feeds it. It reads plain or gzip-compressed CSV, normalizes the
//! source feeds' header spellings to snake_case, and validates records
//! before any transformation begins.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use csv::StringRecord;
use flate2::read::GzDecoder;
use serde::Deserialize;

use bk_core::{BikeId, StationId, StationStatusSnapshot, Trip};

/// Trip record as it appears in the source CSV, after header normalization.
#[derive(Debug, Deserialize)]
struct RawTrip {
    start_time: String,
    stop_time: String,
    start_station_id: String,
    start_station_name: String,
    end_station_id: String,
    end_station_name: String,
    bike_id: String,
    #[serde(default)]
    trip_duration: Option<i64>,
    #[serde(default)]
    user_type: Option<String>,
}

/// Status record as it appears in the source CSV, after header normalization.
#[derive(Debug, Deserialize)]
struct RawStatus {
    report_time: String,
    station_id: String,
    station_name: String,
    available_bikes: u32,
}

/// Loads and validates one trip CSV file.
pub fn load_trips(path: &Path) -> Result<Vec<Trip>> {
    let mut reader = csv_reader(path)?;
    let headers = normalized_headers(&mut reader)
        .with_context(|| format!("failed to read headers from {}", path.display()))?;

    let mut trips = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        let raw: RawTrip = record
            .deserialize(Some(&headers))
            .with_context(|| format!("bad trip record {} in {}", index + 1, path.display()))?;
        let trip = trip_from_raw(raw)
            .with_context(|| format!("invalid trip record {} in {}", index + 1, path.display()))?;
        trips.push(trip);
    }

    tracing::debug!(path = %path.display(), trips = trips.len(), "loaded trips");
    Ok(trips)
}

/// Loads and validates one station status CSV file.
pub fn load_status(path: &Path) -> Result<Vec<StationStatusSnapshot>> {
    let mut reader = csv_reader(path)?;
    let headers = normalized_headers(&mut reader)
        .with_context(|| format!("failed to read headers from {}", path.display()))?;

    let mut snapshots = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        let raw: RawStatus = record
            .deserialize(Some(&headers))
            .with_context(|| format!("bad status record {} in {}", index + 1, path.display()))?;
        snapshots.push(StationStatusSnapshot {
            report_time: parse_timestamp(&raw.report_time)?,
            station_id: StationId::new(raw.station_id)?,
            station_name: raw.station_name,
            available_bikes: raw.available_bikes,
        });
    }

    tracing::debug!(path = %path.display(), snapshots = snapshots.len(), "loaded status snapshots");
    Ok(snapshots)
}

fn trip_from_raw(raw: RawTrip) -> Result<Trip> {
    let trip = Trip {
        start_time: parse_timestamp(&raw.start_time)?,
        stop_time: parse_timestamp(&raw.stop_time)?,
        start_station_id: StationId::new(raw.start_station_id)?,
        start_station_name: raw.start_station_name,
        end_station_id: StationId::new(raw.end_station_id)?,
        end_station_name: raw.end_station_name,
        bike_id: BikeId::new(raw.bike_id)?,
        trip_duration: raw.trip_duration,
        user_type: raw.user_type,
    };
    trip.validate()?;
    Ok(trip)
}

/// Opens a CSV reader over the file, transparently decompressing `.gz`.
fn csv_reader(path: &Path) -> Result<csv::Reader<Box<dyn Read>>> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "gz") {
        Box::new(GzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    Ok(csv::ReaderBuilder::new().from_reader(reader))
}

/// Reads the header row and normalizes each column name.
fn normalized_headers(reader: &mut csv::Reader<Box<dyn Read>>) -> Result<StringRecord> {
    let headers = reader.headers()?;
    Ok(headers.iter().map(normalize_header).collect())
}

/// Maps a source column name to its snake_case pipeline name.
///
/// Spaces become underscores, and the legacy single-word trip headers plus
/// the camelCase status-feed headers are renamed to the unified schema.
fn normalize_header(header: &str) -> String {
    let collapsed = header.trim().replace(' ', "_");
    match collapsed.as_str() {
        "starttime" => "start_time".to_string(),
        "stoptime" => "stop_time".to_string(),
        "bikeid" => "bike_id".to_string(),
        "tripduration" => "trip_duration".to_string(),
        "usertype" => "user_type".to_string(),
        "lastCommunicationTime" => "report_time".to_string(),
        "id" => "station_id".to_string(),
        "stationName" => "station_name".to_string(),
        "availableBikes" => "available_bikes".to_string(),
        _ => collapsed,
    }
}

/// Parses a feed timestamp, with or without the `T` separator and
/// fractional seconds.
fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    const FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .with_context(|| format!("unparseable timestamp: {value}"))
}

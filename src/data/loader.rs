//! CSV loading for `TimeSeriesTable`.
//!
//! The first column holds the timestamp; every other column is numeric.
//! Blank cells become missing values.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::io::Read;
use std::path::Path;

use super::table::{Column, TableError, TimeSeriesTable};

/// Datetime layouts tried in order when no explicit format is configured.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
/// Day-first hourly layout of the BATADAL exports (`06/01/14 00`), tried last.
const HOURLY_FORMAT: &str = "%d/%m/%y %H";

/// Parse a timestamp cell, optionally with a caller-supplied `strftime` layout.
pub fn parse_timestamp(value: &str, format: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Some(format) = format {
        return NaiveDateTime::parse_from_str(value, format)
            .map(|t| t.and_utc())
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(value, format)
                    .ok()
                    .map(|d| d.and_time(chrono::NaiveTime::MIN).and_utc())
            });
    }

    if let Ok(t) = DateTime::parse_from_rfc3339(value) {
        return Some(t.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(value, format) {
            return Some(t.and_utc());
        }
    }

    // chrono needs minutes to build a time, so append them for hour-only cells
    if let Ok(t) = NaiveDateTime::parse_from_str(&format!("{value}:00"), &format!("{HOURLY_FORMAT}:%M")) {
        return Some(t.and_utc());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(chrono::NaiveTime::MIN).and_utc())
}

/// Read a table from any CSV source.
///
/// # Errors
///
/// Returns a `TableError` for malformed CSV, unparseable cells, or a table
/// that violates the `TimeSeriesTable` invariants.
pub fn read_csv<R: Read>(reader: R, timestamp_format: Option<&str>) -> Result<TimeSeriesTable, TableError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let names: Vec<String> = reader
        .headers()?
        .iter()
        .skip(1)
        .map(ToString::to_string)
        .collect();

    let mut index = Vec::new();
    let mut values: Vec<Vec<Option<f64>>> = vec![Vec::new(); names.len()];

    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let raw_time = record.get(0).unwrap_or_default();
        let time = parse_timestamp(raw_time, timestamp_format).ok_or_else(|| TableError::Timestamp {
            row,
            value: raw_time.to_string(),
        })?;
        index.push(time);

        for (i, name) in names.iter().enumerate() {
            let cell = record.get(i + 1).unwrap_or_default();
            let value = if cell.is_empty() {
                None
            } else {
                Some(cell.parse::<f64>().map_err(|_| TableError::Value {
                    row,
                    column: name.clone(),
                    value: cell.to_string(),
                })?)
            };
            values[i].push(value);
        }
    }

    let columns = names
        .into_iter()
        .zip(values)
        .map(|(name, values)| Column::new(name, values))
        .collect();

    TimeSeriesTable::new(index, columns)
}

/// Load a table from a CSV file on disk.
///
/// # Errors
///
/// See [`read_csv`]; additionally fails if the file cannot be opened.
pub fn load_csv(path: impl AsRef<Path>, timestamp_format: Option<&str>) -> Result<TimeSeriesTable, TableError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let table = read_csv(file, timestamp_format)?;

    tracing::info!(
        path = %path.display(),
        rows = table.len(),
        columns = table.column_names().count(),
        first = %table.min_date(),
        last = %table.max_date(),
        "Loaded time series table"
    );

    Ok(table)
}

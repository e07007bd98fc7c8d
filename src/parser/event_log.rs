//! CSV event log loader.
//!
//! Reads the raw clickstream table into an [`EventLog`]. Any malformed row
//! aborts the load: there is no partial result and no silent correction.

use super::event::{Event, EventLog};
use crate::utils::config::{DATE_FORMAT, REQUIRED_COLUMNS, TIMESTAMP_FORMATS};
use crate::utils::error::LoadError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::{debug, info, warn};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Raw CSV row before validation
#[derive(Debug, Deserialize)]
struct RawEventRow {
    user: Option<String>,
    session: Option<String>,
    event_date: Option<String>,
    page_type: Option<String>,

    #[serde(default)]
    event_type: Option<String>,

    #[serde(default)]
    product: Option<String>,
}

/// Load an event log from a CSV file
///
/// **Public** - main entry point for input
///
/// # Errors
/// * `LoadError::Io` - file cannot be opened
/// * `LoadError::MissingColumn` - a required header is absent
/// * `LoadError::InvalidTimestamp` - `event_date` is not parseable
/// * `LoadError::EmptyField` - `user`, `session` or `page_type` is blank
///
/// A header-only file is a valid, empty log.
pub fn load_event_log(path: impl AsRef<Path>) -> Result<EventLog, LoadError> {
    let path = path.as_ref();
    info!("Loading event log from: {}", path.display());

    let file = File::open(path)?;
    read_event_log(file)
}

/// Read an event log from any CSV source
///
/// **Public** - used by `load_event_log` and by tests with in-memory input
pub fn read_event_log<R: Read>(source: R) -> Result<EventLog, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    check_required_columns(&headers)?;

    let mut events = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let raw: RawEventRow = record.deserialize(Some(&headers))?;
        events.push(build_event(raw, line)?);
    }

    if events.is_empty() {
        warn!("Event log has a header but no rows; every rate will be undefined");
    }

    let log = EventLog::new(events);
    debug!(
        "Loaded {} events ({} users, {} sessions)",
        log.len(),
        log.distinct_users(),
        log.distinct_sessions()
    );

    Ok(log)
}

/// Fail fast if any required header is absent
///
/// **Private** - schema check before reading rows
fn check_required_columns(headers: &csv::StringRecord) -> Result<(), LoadError> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(LoadError::MissingColumn((*column).to_string()));
        }
    }
    Ok(())
}

/// Validate a raw row and turn it into an enriched event
///
/// **Private** - internal conversion
fn build_event(raw: RawEventRow, line: u64) -> Result<Event, LoadError> {
    let user = required(raw.user, line, "user")?;
    let session = required(raw.session, line, "session")?;
    let page_type = required(raw.page_type, line, "page_type")?;
    let date_str = required(raw.event_date, line, "event_date")?;

    let event_date = parse_timestamp(&date_str).ok_or_else(|| LoadError::InvalidTimestamp {
        line,
        value: date_str.clone(),
    })?;

    let mut event = Event::new(user, session, event_date, page_type);
    if let Some(event_type) = raw.event_type {
        event = event.with_event_type(event_type);
    }
    if let Some(product) = raw.product {
        event = event.with_product(product);
    }

    Ok(event)
}

fn required(value: Option<String>, line: u64, column: &'static str) -> Result<String, LoadError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(LoadError::EmptyField { line, column }),
    }
}

/// Parse an event timestamp
///
/// **Public** - also handy for building events in tests
///
/// Accepts the naive layouts in `TIMESTAMP_FORMATS`, offset-carrying
/// timestamps (wall clock kept, offset dropped) and bare dates (midnight).
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    for format in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, format) {
            return Some(ts);
        }
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.naive_local());
    }
    if let Ok(ts) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(ts.naive_local());
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

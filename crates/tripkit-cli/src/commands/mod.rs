//! Subcommand implementations.

pub mod auth;
pub mod budget;
pub mod locate;
pub mod location;
pub mod schedule;
pub mod service;
pub mod trip;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, NaiveTime};

/// Parse a calendar date (`YYYY-MM-DD`) as midnight UTC, in Unix milliseconds.
pub fn date_millis(value: &str) -> Result<i64> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{value}', expected YYYY-MM-DD"))?;
    Ok(date.and_time(NaiveTime::MIN).and_utc().timestamp_millis())
}

/// Parse an RFC 3339 timestamp or a bare date, in Unix milliseconds.
pub fn timestamp_millis(value: &str) -> Result<i64> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.timestamp_millis());
    }
    date_millis(value).with_context(|| {
        format!("Invalid timestamp '{value}', expected RFC 3339 or YYYY-MM-DD")
    })
}

/// Parse a start/end date pair and check that it is ordered.
pub fn date_range(start: &str, end: &str) -> Result<(i64, i64)> {
    let start_at = date_millis(start)?;
    let end_at = date_millis(end)?;
    if end_at < start_at {
        bail!("Trip ends ({end}) before it starts ({start})");
    }
    Ok((start_at, end_at))
}

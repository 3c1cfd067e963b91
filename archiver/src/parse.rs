use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::{ArchiverError, Result};

/// Date format used throughout the gazette site, e.g. `01-02-2020`.
pub const SITE_DATE_FORMAT: &str = "%d-%m-%Y";

/// Fixed-width capture timestamp used by the archival index.
pub const SNAPSHOT_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Separator between number and date in a government order link text.
pub const GO_DATE_SEPARATOR: &str = " Dt: ";

pub fn parse_site_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), SITE_DATE_FORMAT).ok()
}

/// Splits an issue label like `"123 - 01-02-2020"` into its issue number and
/// date. The date is the trailing ten characters; the number is everything
/// before the first `-`.
pub fn parse_issue_label(label: &str) -> Result<(String, NaiveDate)> {
    let label = label.trim();
    let invalid = || ArchiverError::InvalidIssueLabel(label.to_string());

    let split_at = label
        .char_indices()
        .rev()
        .nth(9)
        .map(|(idx, _)| idx)
        .ok_or_else(invalid)?;
    let date = parse_site_date(&label[split_at..]).ok_or_else(invalid)?;

    let issue = label.split('-').next().unwrap_or("").trim();
    if issue.is_empty() {
        return Err(invalid());
    }

    Ok((issue.to_string(), date))
}

/// Parses a 14-digit `YYYYMMDDhhmmss` capture timestamp as UTC.
pub fn parse_snapshot_timestamp(timestamp: &str) -> Result<DateTime<Utc>> {
    if timestamp.len() != 14 || !timestamp.chars().all(|c| c.is_ascii_digit()) {
        return Err(ArchiverError::InvalidTimestamp(timestamp.to_string()));
    }
    NaiveDateTime::parse_from_str(timestamp, SNAPSHOT_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| ArchiverError::InvalidTimestamp(timestamp.to_string()))
}

/// Splits `"G.O. (Ms) No. 12 Dt: 05-01-2023"` into number and date. Text
/// without the separator is taken to be all number.
pub fn split_go_number_date(text: &str) -> (String, Option<String>) {
    match text.split_once(GO_DATE_SEPARATOR) {
        Some((number, date)) => (number.to_string(), Some(date.to_string())),
        None => (text.to_string(), None),
    }
}

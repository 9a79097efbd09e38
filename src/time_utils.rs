// SPDX-License-Identifier: MIT
// Copyright 2026 F3RVA

//! Shared helpers for date/time parsing and formatting.
//!
//! Workout dates are calendar dates. They are parsed field by field into a
//! [`NaiveDate`] and never pass through an instant, so the runtime time zone
//! cannot move a workout to a neighbouring day. All human-readable output
//! uses chrono's fixed English names rather than the host locale.

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Utc};
use serde::Serialize;

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// A calendar day with no time-of-day or zone attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    fn naive(self) -> NaiveDate {
        // Only constructed from a successfully built NaiveDate.
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).unwrap_or_default()
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

/// Zero-padded date components for building permalinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlDateParts {
    pub year: String,
    pub month: String,
    pub day: String,
}

impl UrlDateParts {
    /// Path prefix `/{YYYY}/{MM}/{DD}`.
    pub fn path(&self) -> String {
        format!("/{}/{}/{}", self.year, self.month, self.day)
    }
}

/// Errors from date parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("Malformed date: {0:?}")]
    Malformed(String),

    #[error("No such calendar date: {year}-{month}-{day}")]
    OutOfRange { year: i32, month: u32, day: u32 },
}

/// Parse a `YYYY-MM-DD` string into its calendar fields.
///
/// A trailing time component (`2024-03-15T00:00:00Z`, `2024-03-15 08:00`)
/// is ignored; only the date prefix is read. Dates that do not exist on the
/// proleptic Gregorian calendar are rejected rather than rolled over.
pub fn parse_calendar_date(date_string: &str) -> Result<CalendarDate, DateError> {
    let malformed = || DateError::Malformed(date_string.to_string());

    let date_part = date_string
        .trim()
        .split(['T', ' '])
        .next()
        .ok_or_else(malformed)?;

    let mut fields = date_part.split('-');
    let (Some(year), Some(month), Some(day), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(malformed());
    };

    let year: i32 = parse_field(year).ok_or_else(malformed)?;
    let month: u32 = parse_field(month).ok_or_else(malformed)?;
    let day: u32 = parse_field(day).ok_or_else(malformed)?;

    build_date(year, month, day)
}

/// Split a date string into zero-padded URL components.
pub fn format_for_url(date_string: &str) -> Result<UrlDateParts, DateError> {
    let date = parse_calendar_date(date_string)?;
    Ok(UrlDateParts {
        year: format!("{:04}", date.year),
        month: format!("{:02}", date.month),
        day: format!("{:02}", date.day),
    })
}

/// Short display form used on listing cards, e.g. `Mon, Jan 15, 2024`.
pub fn format_for_display(date_string: &str) -> Result<String, DateError> {
    let date = parse_calendar_date(date_string)?;
    Ok(date.naive().format("%a, %b %-d, %Y").to_string())
}

/// Long display form used on single-day archive headers,
/// e.g. `Monday, January 15, 2024`.
///
/// Accepts padded or unpadded numeric components (`"01"` and `"1"`).
pub fn format_full_display(year: &str, month: &str, day: &str) -> Result<String, DateError> {
    let date = date_from_components(year, month, day)?;
    Ok(date.naive().format("%A, %B %-d, %Y").to_string())
}

/// Month heading, e.g. `January 2024`.
pub fn format_month_year(year: &str, month: &str) -> Result<String, DateError> {
    let date = date_from_components(year, month, "1")?;
    Ok(date.naive().format("%B %Y").to_string())
}

/// Full month name on its own, e.g. `January`.
pub fn month_name(year: &str, month: &str) -> Result<String, DateError> {
    let date = date_from_components(year, month, "1")?;
    Ok(date.naive().format("%B").to_string())
}

fn date_from_components(year: &str, month: &str, day: &str) -> Result<CalendarDate, DateError> {
    let malformed = || DateError::Malformed(format!("{year}-{month}-{day}"));
    let year: i32 = parse_field(year).ok_or_else(malformed)?;
    let month: u32 = parse_field(month).ok_or_else(malformed)?;
    let day: u32 = parse_field(day).ok_or_else(malformed)?;
    build_date(year, month, day)
}

fn build_date(year: i32, month: u32, day: u32) -> Result<CalendarDate, DateError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .map(CalendarDate::from)
        .ok_or(DateError::OutOfRange { year, month, day })
}

fn parse_field<T: std::str::FromStr>(field: &str) -> Option<T> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_leap_day() {
        let date = parse_calendar_date("2024-02-29").unwrap();
        assert_eq!(
            date,
            CalendarDate {
                year: 2024,
                month: 2,
                day: 29
            }
        );
    }

    #[test]
    fn test_parse_ignores_time_component() {
        let expected = parse_calendar_date("2024-03-15").unwrap();
        assert_eq!(
            parse_calendar_date("2024-03-15T00:00:00Z").unwrap(),
            expected
        );
        assert_eq!(
            parse_calendar_date("2024-03-15T23:59:59-08:00").unwrap(),
            expected
        );
        assert_eq!(parse_calendar_date("2024-03-15 06:30").unwrap(), expected);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            parse_calendar_date("2023-02-29"),
            Err(DateError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse_calendar_date("2024-13-01"),
            Err(DateError::OutOfRange { .. })
        ));
        for bad in ["", "2024", "2024-03", "2024-03-15-01", "2024-xx-15", "-2024-03-15"] {
            assert!(
                matches!(parse_calendar_date(bad), Err(DateError::Malformed(_))),
                "expected malformed: {bad:?}"
            );
        }
    }

    #[test]
    fn test_format_for_url_pads() {
        let parts = format_for_url("2024-3-5").unwrap();
        assert_eq!(parts.year, "2024");
        assert_eq!(parts.month, "03");
        assert_eq!(parts.day, "05");
        assert_eq!(parts.path(), "/2024/03/05");
    }

    #[test]
    fn test_format_for_url_round_trip() {
        let mut date = NaiveDate::from_ymd_opt(1999, 12, 25).unwrap();
        let end = NaiveDate::from_ymd_opt(2030, 1, 10).unwrap();
        while date < end {
            let input = date.format("%Y-%m-%d").to_string();
            let parts = format_for_url(&input).unwrap();
            let rebuilt = format!("{}-{}-{}", parts.year, parts.month, parts.day);
            assert_eq!(rebuilt, input);
            date = date + chrono::Duration::days(3);
        }
    }

    #[test]
    fn test_format_for_display() {
        assert_eq!(format_for_display("2024-01-15").unwrap(), "Mon, Jan 15, 2024");
        assert_eq!(format_for_display("2024-05-20").unwrap(), "Mon, May 20, 2024");
        assert_eq!(format_for_display("2024-03-05").unwrap(), "Tue, Mar 5, 2024");
    }

    #[test]
    fn test_format_full_display() {
        assert_eq!(
            format_full_display("2024", "1", "15").unwrap(),
            "Monday, January 15, 2024"
        );
        assert_eq!(
            format_full_display("2024", "02", "29").unwrap(),
            "Thursday, February 29, 2024"
        );
        assert!(format_full_display("2024", "02", "30").is_err());
    }

    #[test]
    fn test_format_month_year() {
        assert_eq!(format_month_year("2024", "01").unwrap(), "January 2024");
        assert_eq!(format_month_year("2023", "12").unwrap(), "December 2023");
        assert_eq!(month_name("2023", "07").unwrap(), "July");
    }

    #[test]
    fn test_format_utc_rfc3339() {
        let date = DateTime::from_timestamp(1_704_103_200, 0).unwrap();
        assert_eq!(format_utc_rfc3339(date), "2024-01-01T10:00:00Z");
    }
}

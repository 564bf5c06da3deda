//! Presentation helpers for dates and times.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::str::FromStr;
use thiserror::Error;

/// Format used for show times on venue and artist pages.
pub const SHOW_TIME_FORMAT: &str = "%m/%d/%Y, %H:%M";

/// Format used for show times on the shows listing.
pub const LISTING_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    SHOW_TIME_FORMAT,
    "%m/%d/%Y %H:%M",
];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognised date/time: {0:?}")]
pub struct DateFormatError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateStyle {
    Full,
    #[default]
    Medium,
}

impl FromStr for DateStyle {
    type Err = std::convert::Infallible;

    // Anything other than "full" falls back to medium.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == "full" { DateStyle::Full } else { DateStyle::Medium })
    }
}

impl DateStyle {
    fn pattern(self) -> &'static str {
        match self {
            // EEEE MMMM, d, y 'at' h:mma
            DateStyle::Full => "%A %B, %-d, %Y at %-I:%M%p",
            // EE MM, dd, y h:mma
            DateStyle::Medium => "%a %m, %d, %Y %-I:%M%p",
        }
    }
}

/// Parses the date/time shapes accepted by the forms and produced by the pages.
///
/// Offsets are dropped after parsing: the wall-clock time is kept as written.
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, DateFormatError> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_local());
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| DateFormatError(value.to_string()))
}

/// Renders a date string in the given style (`"full"`, anything else is medium).
pub fn format_datetime(value: &str, style: &str) -> Result<String, DateFormatError> {
    let style = style.parse::<DateStyle>().unwrap_or_default();
    parse_datetime(value).map(|dt| render(dt, style))
}

pub fn render(dt: NaiveDateTime, style: DateStyle) -> String {
    dt.format(style.pattern()).to_string()
}

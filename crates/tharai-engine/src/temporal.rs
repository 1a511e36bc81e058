//! Deterministic parsing of almanac time ranges.
//!
//! The almanac writes time windows as free text in two shapes:
//!
//! - **Self-contained ranges**, used for asterism windows:
//!   `"Rohini - Mar 23 03:23 AM – Mar 24 02:10 AM"`. Each endpoint carries its
//!   own month and day, so the window may cross midnight or span several days.
//!   The year is optional and is filled in from a caller-supplied fallback.
//! - **Day-anchored ranges**, used for named periods: `"11:51 AM – 12:40 PM"`.
//!   Both clock times are combined with the calendar day the entry was listed
//!   under.
//!
//! All timestamps are naive local wall-clock times. The almanac reports local
//! times for one location, so no timezone is attached.
//!
//! # Design Principle
//!
//! A range whose end does not fall strictly after its start is rejected, never
//! corrected. In particular a day-anchored range such as `"11:51 PM – 12:10 AM"`
//! is an error: there is no midnight rollover.
//!
//! # Functions
//!
//! - [`parse_range`]: Self-contained `"<Name> - <start> – <end>"` text → [`ParsedRange`]
//! - [`parse_day_range`]: `"<H:MM AM/PM> – <H:MM AM/PM>"` + day → [`TimeInterval`]
//! - [`parse_day_key`]: ISO `YYYY-MM-DD` day key → `NaiveDate`

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::Serialize;

use crate::error::TharaiError;

/// Separates an entry name from its time range (`"Rohini - Mar 23 ..."`).
pub const NAME_SEPARATOR: &str = " - ";

/// Separates the two endpoints of a range. This is the en dash (U+2013), not
/// the ASCII hyphen used by [`NAME_SEPARATOR`].
pub const RANGE_SEPARATOR: char = '\u{2013}';

const ENDPOINT_FORMAT: &str = "%b %d %Y %I:%M %p";
const CLOCK_FORMAT: &str = "%I:%M %p";
const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

// ── TimeInterval ────────────────────────────────────────────────────────────

/// A half-open span of local wall-clock time with a strictly positive length.
///
/// The fields are private: the only way to build one is [`TimeInterval::new`],
/// which refuses empty and inverted ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TimeInterval {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeInterval {
    /// Build an interval, or `None` unless `end > start`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Option<Self> {
        (end > start).then_some(Self { start, end })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Length of the interval. Always positive.
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// The overlapping part of two intervals.
    ///
    /// Returns `None` when they are disjoint or only touch at an endpoint.
    pub fn intersection(&self, other: &TimeInterval) -> Option<TimeInterval> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        TimeInterval::new(start, end)
    }
}

// ── parse_range ─────────────────────────────────────────────────────────────

/// A named self-contained range, as produced by [`parse_range`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedRange {
    /// The text before [`NAME_SEPARATOR`], trimmed.
    pub name: String,
    pub interval: TimeInterval,
}

/// Parse a self-contained range such as
/// `"Rohini - Mar 23 2025 03:23 AM – Mar 24 2025 02:10 AM"`.
///
/// # Arguments
///
/// * `text`: `"<Name> - <Mon> <Day> [<Year>] <H:MM> <AM/PM> – <Mon> <Day> [<Year>] <H:MM> <AM/PM>"`
/// * `fallback_year`: Spliced in after the day token of any endpoint that
///   has no four-digit year of its own
///
/// The name is split off at the first `" - "`. The endpoints are split at the
/// first en dash after it. Each endpoint is parsed on its own, so the two may
/// fall on different calendar days. Both year-less endpoints take the same
/// fallback year, so a window written as `"Dec 31 ... – Jan 01 ..."` with no
/// years comes out inverted and is rejected.
///
/// # Errors
///
/// Returns [`TharaiError::InvalidRange`] if either separator is missing, the
/// name is empty, or the end is not after the start. Returns
/// [`TharaiError::InvalidDatetime`] if an endpoint cannot be parsed.
///
/// # Examples
///
/// ```
/// use tharai_engine::temporal::parse_range;
///
/// let parsed = parse_range("Rohini - Mar 23 03:23 AM – Mar 24 02:10 AM", 2025).unwrap();
/// assert_eq!(parsed.name, "Rohini");
/// assert_eq!(parsed.interval.start().to_string(), "2025-03-23 03:23:00");
/// assert_eq!(parsed.interval.end().to_string(), "2025-03-24 02:10:00");
/// ```
pub fn parse_range(text: &str, fallback_year: i32) -> Result<ParsedRange, TharaiError> {
    let (name, times) = text.split_once(NAME_SEPARATOR).ok_or_else(|| {
        TharaiError::InvalidRange(format!("missing name separator in '{}'", text.trim()))
    })?;

    let name = name.trim();
    if name.is_empty() {
        return Err(TharaiError::InvalidRange(format!(
            "empty name in '{}'",
            text.trim()
        )));
    }

    let (start_text, end_text) = times.split_once(RANGE_SEPARATOR).ok_or_else(|| {
        TharaiError::InvalidRange(format!("missing range separator in '{}'", text.trim()))
    })?;

    let start = parse_endpoint(start_text, fallback_year)?;
    let end = parse_endpoint(end_text, fallback_year)?;

    let interval = TimeInterval::new(start, end).ok_or_else(|| {
        TharaiError::InvalidRange(format!("'{}' does not end after it starts", times.trim()))
    })?;

    Ok(ParsedRange {
        name: name.to_string(),
        interval,
    })
}

// ── parse_day_range ─────────────────────────────────────────────────────────

/// Parse a day-anchored range such as `"11:51 AM – 12:40 PM"` on `day`.
///
/// Both clock times are placed on `day`. There is no cross-day inference.
///
/// # Errors
///
/// Returns [`TharaiError::InvalidRange`] if the en dash is missing or the end
/// is at or before the start (e.g. a window crossing midnight). Returns
/// [`TharaiError::InvalidDatetime`] if either clock time cannot be parsed.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use tharai_engine::temporal::parse_day_range;
///
/// let day = NaiveDate::from_ymd_opt(2025, 3, 24).unwrap();
/// let interval = parse_day_range("11:51 AM – 12:40 PM", day).unwrap();
/// assert_eq!(interval.duration().num_minutes(), 49);
///
/// assert!(parse_day_range("11:51 PM – 12:10 AM", day).is_err());
/// ```
pub fn parse_day_range(text: &str, day: NaiveDate) -> Result<TimeInterval, TharaiError> {
    let (start_text, end_text) = text.split_once(RANGE_SEPARATOR).ok_or_else(|| {
        TharaiError::InvalidRange(format!("missing range separator in '{}'", text.trim()))
    })?;

    let start = parse_clock_time(start_text)?;
    let end = parse_clock_time(end_text)?;

    TimeInterval::new(day.and_time(start), day.and_time(end)).ok_or_else(|| {
        TharaiError::InvalidRange(format!(
            "'{}' does not end after it starts on {day}",
            text.trim()
        ))
    })
}

// ── parse_day_key ───────────────────────────────────────────────────────────

/// Parse an almanac day key (`"2025-03-24"`).
///
/// # Errors
///
/// Returns [`TharaiError::InvalidDate`] for anything but an ISO calendar date.
pub fn parse_day_key(key: &str) -> Result<NaiveDate, TharaiError> {
    NaiveDate::parse_from_str(key.trim(), DAY_KEY_FORMAT)
        .map_err(|e| TharaiError::InvalidDate(format!("'{}': {}", key, e)))
}

// ── Internal helpers ────────────────────────────────────────────────────────

/// Parse one endpoint (`"Mar 23 03:23 AM"` or `"Mar 23 2025 03:23 AM"`).
fn parse_endpoint(text: &str, fallback_year: i32) -> Result<NaiveDateTime, TharaiError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() < 2 {
        return Err(TharaiError::InvalidDatetime(format!(
            "'{}': expected '<Mon> <Day> [<Year>] <H:MM> <AM/PM>'",
            text.trim()
        )));
    }

    let has_year = tokens.get(2).is_some_and(|t| is_year_token(t));
    let normalized = if has_year {
        tokens.join(" ")
    } else {
        let year = fallback_year.to_string();
        let mut spliced = Vec::with_capacity(tokens.len() + 1);
        spliced.extend_from_slice(&tokens[..2]);
        spliced.push(year.as_str());
        spliced.extend_from_slice(&tokens[2..]);
        spliced.join(" ")
    };

    NaiveDateTime::parse_from_str(&normalized, ENDPOINT_FORMAT)
        .map_err(|e| TharaiError::InvalidDatetime(format!("'{}': {}", text.trim(), e)))
}

/// Parse a 12-hour clock time (`"11:51 AM"`).
fn parse_clock_time(text: &str) -> Result<NaiveTime, TharaiError> {
    NaiveTime::parse_from_str(text.trim(), CLOCK_FORMAT)
        .map_err(|e| TharaiError::InvalidDatetime(format!("'{}': {}", text.trim(), e)))
}

/// A four-digit year token.
fn is_year_token(token: &str) -> bool {
    token.len() == 4 && token.bytes().all(|b| b.is_ascii_digit())
}

// ── Tests ───────────────────────────────────────────────────────────────────

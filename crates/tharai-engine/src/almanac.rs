//! Input model for page-extractor output.
//!
//! The extractor that scrapes almanac pages writes one JSON object per run:
//!
//! ```json
//! {
//!   "2025-03-24": {
//!     "details": {
//!       "Nakshatram": [ { "name": "Uthiradam", "time": "Mar 23 03:23 AM – Mar 24 02:10 AM" } ],
//!       "Auspicious Period": [ { "name": "Abhijit Muhurtham", "time": "11:51 AM – 12:40 PM", "auspicious": true } ],
//!       "Tithi": [ { "text": "Dashami" } ]
//!     }
//!   }
//! }
//! ```
//!
//! Day keys and section labels keep their document order. Other keys of a
//! day record (headers, Gowri tables, ...) are ignored. Malformed day keys are
//! kept as written and skipped when days are enumerated.

use std::io::Read;

use chrono::{Days, NaiveDate};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::TharaiError;
use crate::ordered;
use crate::temporal::parse_day_key;

// ── Favorability ────────────────────────────────────────────────────────────

/// The extractor's verdict for a listed window.
///
/// Deserialized from the entry's `auspicious` flag: `true`, `false`, or
/// `null`/absent for [`Favorability::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", rename_all = "lowercase")]
pub enum Favorability {
    Favorable,
    Unfavorable,
    #[default]
    Unknown,
}

impl From<Option<bool>> for Favorability {
    fn from(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => Favorability::Favorable,
            Some(false) => Favorability::Unfavorable,
            None => Favorability::Unknown,
        }
    }
}

// ── AlmanacEntry ────────────────────────────────────────────────────────────

/// One list item of a section: either `{name, time}` or free `{text}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AlmanacEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub auspicious: Favorability,
}

impl AlmanacEntry {
    pub fn timed(name: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            time: Some(time.into()),
            ..Self::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn with_flag(mut self, flag: Favorability) -> Self {
        self.auspicious = flag;
        self
    }

    /// `(name, time)` when the entry has both.
    pub fn name_and_time(&self) -> Option<(&str, &str)> {
        Some((self.name.as_deref()?, self.time.as_deref()?))
    }
}

// ── AlmanacDay ──────────────────────────────────────────────────────────────

/// One day's record: labeled sections of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AlmanacDay {
    #[serde(default, deserialize_with = "ordered::deserialize")]
    details: Vec<(String, Vec<AlmanacEntry>)>,
}

impl AlmanacDay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_section(mut self, label: impl Into<String>, entries: Vec<AlmanacEntry>) -> Self {
        self.details.push((label.into(), entries));
        self
    }

    /// Sections in document order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &[AlmanacEntry])> {
        self.details
            .iter()
            .map(|(label, entries)| (label.as_str(), entries.as_slice()))
    }
}

// ── Almanac ─────────────────────────────────────────────────────────────────

/// A multi-day extractor run, keyed by ISO day strings in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Almanac {
    #[serde(deserialize_with = "ordered::deserialize")]
    days: Vec<(String, AlmanacDay)>,
}

impl Almanac {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_day(mut self, key: impl Into<String>, day: AlmanacDay) -> Self {
        self.days.push((key.into(), day));
        self
    }

    /// # Errors
    ///
    /// Returns [`TharaiError::InvalidAlmanac`] if the document is not an object of day records.
    pub fn from_json_str(json: &str) -> Result<Self, TharaiError> {
        serde_json::from_str(json).map_err(|e| TharaiError::InvalidAlmanac(e.to_string()))
    }

    /// # Errors
    ///
    /// Returns [`TharaiError::InvalidAlmanac`] on read failures or malformed JSON.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TharaiError> {
        serde_json::from_reader(reader).map_err(|e| TharaiError::InvalidAlmanac(e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Days whose key parses as an ISO date, in document order.
    ///
    /// Other keys are logged and skipped; they contribute nothing.
    pub fn dated_days(&self) -> impl Iterator<Item = (NaiveDate, &AlmanacDay)> {
        self.days
            .iter()
            .filter_map(|(key, day)| match parse_day_key(key) {
                Ok(date) => Some((date, day)),
                Err(e) => {
                    warn!("skipping almanac day: {e}");
                    None
                }
            })
    }

    /// Keep only the days in `[start, start + days)`.
    ///
    /// Keys that are not dates are dropped.
    pub fn window(&self, start: NaiveDate, days: u32) -> Almanac {
        let end = start.checked_add_days(Days::new(u64::from(days)));
        let days = self
            .days
            .iter()
            .filter(|(key, _)| {
                parse_day_key(key)
                    .is_ok_and(|date| date >= start && end.is_none_or(|end| date < end))
            })
            .cloned()
            .collect();
        Almanac { days }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

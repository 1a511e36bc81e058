//! Interval extraction from almanac day records.
//!
//! Walks each labeled section of a day and turns its entries into two
//! independent collections:
//!
//! - [`AsterismInterval`]s from asterism sections, parsed as self-contained
//!   ranges and classified against the chart.
//! - [`PeriodInterval`]s from period sections, parsed as ranges anchored to
//!   the day key and tagged with a [`Favorability`].
//!
//! Entries that fail to parse are logged and skipped. One bad entry never
//! stops the rest of the day, and one bad day never stops the rest of the run.

use chrono::{Datelike, NaiveDate};
use log::debug;
use serde::Serialize;

use crate::almanac::{Almanac, AlmanacDay, AlmanacEntry, Favorability};
use crate::chart::{Classification, FavorabilityChart};
use crate::temporal::{parse_day_range, parse_range, TimeInterval, NAME_SEPARATOR};

/// Label fragments that mark an asterism section (`"Nakshatram"`, `"Asterism"`).
const ASTERISM_MARKERS: &[&str] = &["nakshatra", "asterism"];

// ── Records ─────────────────────────────────────────────────────────────────

/// An asterism window as listed on one almanac day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AsterismInterval {
    pub asterism_name: String,
    /// The day key the almanac listed this window under.
    pub source_day: NaiveDate,
    pub interval: TimeInterval,
    /// Chart classification; `None` when the chart does not know the name.
    pub category: Option<Classification>,
}

impl AsterismInterval {
    /// Favorable per the chart. Unclassified asterisms are never favorable.
    pub fn favorable(&self) -> bool {
        self.category.as_ref().is_some_and(|c| c.favorable)
    }

    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.category_name.as_str())
    }
}

/// A named period window on one almanac day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodInterval {
    pub period_name: String,
    pub period_day: NaiveDate,
    pub interval: TimeInterval,
    pub favorability: Favorability,
}

impl PeriodInterval {
    pub fn is_favorable(&self) -> bool {
        self.favorability == Favorability::Favorable
    }
}

/// Both interval collections, each in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub asterisms: Vec<AsterismInterval>,
    pub periods: Vec<PeriodInterval>,
}

impl Extraction {
    pub fn append(&mut self, mut other: Extraction) {
        self.asterisms.append(&mut other.asterisms);
        self.periods.append(&mut other.periods);
    }
}

// ── Section classification ──────────────────────────────────────────────────

/// What a section label says about its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Asterism,
    /// A period section and the verdict its label carries. Sections whose
    /// label carries none are [`Favorability::Unknown`] and are listed but
    /// never intersected.
    Period(Favorability),
}

/// Classify a section label, case-insensitively.
///
/// Asterism markers are checked first, so `"Nakshatra Period"` is an asterism
/// section. `"inauspicious period"` is checked before `"auspicious period"`,
/// since the former contains the latter.
///
/// # Examples
///
/// ```
/// use tharai_engine::almanac::Favorability;
/// use tharai_engine::extract::{classify_section, SectionKind};
///
/// assert_eq!(classify_section("Nakshatram"), Some(SectionKind::Asterism));
/// assert_eq!(
///     classify_section("Inauspicious Period Today"),
///     Some(SectionKind::Period(Favorability::Unfavorable))
/// );
/// assert_eq!(classify_section("Tithi"), None);
/// ```
pub fn classify_section(label: &str) -> Option<SectionKind> {
    let label = label.to_lowercase();
    if ASTERISM_MARKERS.iter().any(|m| label.contains(m)) {
        Some(SectionKind::Asterism)
    } else if label.contains("inauspicious period") {
        Some(SectionKind::Period(Favorability::Unfavorable))
    } else if label.contains("auspicious period") {
        Some(SectionKind::Period(Favorability::Favorable))
    } else if label.contains("period") {
        Some(SectionKind::Period(Favorability::Unknown))
    } else {
        None
    }
}

// ── extract ─────────────────────────────────────────────────────────────────

/// Extract asterism and period intervals from one day's record.
///
/// Asterism entries are rebuilt as `"<name> - <time>"` and parsed with the
/// year of `day_key` as fallback. Period entries are anchored to `day_key`.
/// Only entries with both a name and a time are considered.
pub fn extract(day_key: NaiveDate, day: &AlmanacDay, chart: &FavorabilityChart) -> Extraction {
    let mut out = Extraction::default();

    for (label, entries) in day.sections() {
        match classify_section(label) {
            Some(SectionKind::Asterism) => {
                for entry in entries {
                    if let Some(interval) = asterism_interval(day_key, label, entry, chart) {
                        out.asterisms.push(interval);
                    }
                }
            }
            Some(SectionKind::Period(verdict)) => {
                for entry in entries {
                    if let Some(interval) = period_interval(day_key, label, entry, verdict) {
                        out.periods.push(interval);
                    }
                }
            }
            None => {}
        }
    }

    out
}

/// Run [`extract`] over every dated day of the almanac, in document order.
pub fn extract_all(almanac: &Almanac, chart: &FavorabilityChart) -> Extraction {
    let mut out = Extraction::default();
    for (day_key, day) in almanac.dated_days() {
        out.append(extract(day_key, day, chart));
    }
    out
}

fn asterism_interval(
    day_key: NaiveDate,
    label: &str,
    entry: &AlmanacEntry,
    chart: &FavorabilityChart,
) -> Option<AsterismInterval> {
    let (name, time) = entry.name_and_time()?;
    let line = format!("{name}{NAME_SEPARATOR}{time}");

    match parse_range(&line, day_key.year()) {
        Ok(parsed) => Some(AsterismInterval {
            category: chart.lookup(&parsed.name),
            asterism_name: parsed.name,
            source_day: day_key,
            interval: parsed.interval,
        }),
        Err(e) => {
            debug!("skipping entry in '{label}' on {day_key}: {e}");
            None
        }
    }
}

fn period_interval(
    day_key: NaiveDate,
    label: &str,
    entry: &AlmanacEntry,
    verdict: Favorability,
) -> Option<PeriodInterval> {
    let (name, time) = entry.name_and_time()?;

    // Only an auspicious section can yield a favorable period; an entry there
    // explicitly flagged unfavorable is demoted.
    let favorability = match (verdict, entry.auspicious) {
        (Favorability::Favorable, Favorability::Unfavorable) => Favorability::Unfavorable,
        (verdict, _) => verdict,
    };

    match parse_day_range(time, day_key) {
        Ok(interval) => Some(PeriodInterval {
            period_name: name.trim().to_string(),
            period_day: day_key,
            interval,
            favorability,
        }),
        Err(e) => {
            debug!("skipping entry '{name}' in '{label}' on {day_key}: {e}");
            None
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

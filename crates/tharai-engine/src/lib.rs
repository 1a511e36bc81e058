//! # tharai-engine
//!
//! Deterministic Panchang interval planning.
//!
//! The engine reads a multi-day almanac (the JSON written by the page
//! extractor), classifies each listed asterism against a personal Tharai
//! chart, and reports the exact windows where a favorable asterism coincides
//! with a period the almanac itself labels favorable.
//!
//! ## Modules
//!
//! - [`temporal`]: Time-range text → concrete intervals, interval arithmetic
//! - [`chart`]: Tharai charts and case-insensitive asterism lookup
//! - [`almanac`]: Order-preserving model of the extractor's JSON
//! - [`extract`]: Almanac day → asterism and period intervals
//! - [`reassign`]: Re-key intervals by start day or listing day
//! - [`intersect`]: Favorable asterism × favorable period overlaps
//! - [`analysis`]: The full pipeline plus per-day summaries and verdicts
//! - [`error`]: Error types

pub mod almanac;
pub mod analysis;
pub mod chart;
pub mod error;
pub mod extract;
pub mod intersect;
pub mod reassign;
pub mod temporal;

mod ordered;

pub use almanac::{Almanac, AlmanacDay, AlmanacEntry, Favorability};
pub use analysis::{
    daily_summaries, day_verdicts, plan, DayKey, DaySummary, DayVerdict, Plan, PlanOptions,
};
pub use chart::{lookup, CategoryEntry, ChartBook, Classification, FavorabilityChart};
pub use error::TharaiError;
pub use extract::{
    classify_section, extract, extract_all, AsterismInterval, Extraction, PeriodInterval,
    SectionKind,
};
pub use intersect::{intersect_all, intersect_day, OverlapRecord};
pub use reassign::{group_by_source_day, group_periods, reassign};
pub use temporal::{parse_day_key, parse_day_range, parse_range, ParsedRange, TimeInterval};

//! Day keying for extracted intervals.
//!
//! An almanac page lists the asterism window that is current on the page's
//! day, which usually began the day before. [`reassign`] re-keys asterism
//! windows by the calendar day their parsed start falls on. The other helpers
//! key by the listing day, and are the inputs to
//! [`intersect_all`](crate::intersect::intersect_all).
//!
//! All of these are pure re-indexing: timestamps are never touched, and the
//! input order is kept within each day.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::extract::{AsterismInterval, PeriodInterval};

/// Group asterism intervals by the date of their start timestamp.
///
/// The listing day (`source_day`) is ignored. Applying this to its own
/// flattened output yields the same grouping.
pub fn reassign(intervals: &[AsterismInterval]) -> BTreeMap<NaiveDate, Vec<AsterismInterval>> {
    group_by(intervals, |a| a.interval.start().date())
}

/// Group asterism intervals by the day the almanac listed them under.
pub fn group_by_source_day(
    intervals: &[AsterismInterval],
) -> BTreeMap<NaiveDate, Vec<AsterismInterval>> {
    group_by(intervals, |a| a.source_day)
}

/// Group period intervals by their anchoring day.
pub fn group_periods(periods: &[PeriodInterval]) -> BTreeMap<NaiveDate, Vec<PeriodInterval>> {
    group_by(periods, |p| p.period_day)
}

fn group_by<T, F>(items: &[T], key: F) -> BTreeMap<NaiveDate, Vec<T>>
where
    T: Clone,
    F: Fn(&T) -> NaiveDate,
{
    let mut groups: BTreeMap<NaiveDate, Vec<T>> = BTreeMap::new();
    for item in items {
        groups.entry(key(item)).or_default().push(item.clone());
    }
    groups
}

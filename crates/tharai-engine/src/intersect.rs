//! Intersection of favorable asterism windows with favorable periods.
//!
//! For each day, every favorable asterism interval is compared with every
//! favorable period interval of the same day. Each pair that overlaps for a
//! positive duration yields one [`OverlapRecord`]. The work is O(A·P) per day,
//! and A and P are a handful at most.
//!
//! Output order is fixed: ascending day, then asterisms in input order, then
//! periods in input order. Identical input always gives identical output.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::chart::Classification;
use crate::extract::{AsterismInterval, PeriodInterval};
use crate::temporal::TimeInterval;

/// A window where a favorable asterism and a favorable period coincide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlapRecord {
    pub date: NaiveDate,
    pub asterism_name: String,
    pub category_name: String,
    pub category_meaning: Option<String>,
    pub asterism_interval: TimeInterval,
    pub period_name: String,
    pub period_interval: TimeInterval,
    pub overlap: TimeInterval,
    pub justification: String,
}

/// Intersect one day's asterism and period intervals.
///
/// Asterisms that are unclassified or unfavorable are skipped, as are periods
/// that are not [`Favorable`](crate::almanac::Favorability::Favorable).
pub fn intersect_day(
    date: NaiveDate,
    asterisms: &[AsterismInterval],
    periods: &[PeriodInterval],
) -> Vec<OverlapRecord> {
    let mut records = Vec::new();

    for asterism in asterisms {
        let Some(category) = asterism.category.as_ref().filter(|c| c.favorable) else {
            continue;
        };

        for period in periods.iter().filter(|p| p.is_favorable()) {
            let Some(overlap) = asterism.interval.intersection(&period.interval) else {
                continue;
            };

            records.push(OverlapRecord {
                date,
                asterism_name: asterism.asterism_name.clone(),
                category_name: category.category_name.clone(),
                category_meaning: category.meaning.clone(),
                asterism_interval: asterism.interval,
                period_name: period.period_name.clone(),
                period_interval: period.interval,
                overlap,
                justification: justification(asterism, category, period),
            });
        }
    }

    records
}

/// Intersect across every day present in either map, in ascending order.
///
/// A day present in only one map contributes nothing, but is still visited.
pub fn intersect_all(
    asterisms_by_day: &BTreeMap<NaiveDate, Vec<AsterismInterval>>,
    periods_by_day: &BTreeMap<NaiveDate, Vec<PeriodInterval>>,
) -> Vec<OverlapRecord> {
    let days: BTreeSet<NaiveDate> = asterisms_by_day
        .keys()
        .chain(periods_by_day.keys())
        .copied()
        .collect();

    days.into_iter()
        .flat_map(|date| {
            let asterisms = asterisms_by_day.get(&date).map_or(&[][..], Vec::as_slice);
            let periods = periods_by_day.get(&date).map_or(&[][..], Vec::as_slice);
            intersect_day(date, asterisms, periods)
        })
        .collect()
}

fn justification(
    asterism: &AsterismInterval,
    category: &Classification,
    period: &PeriodInterval,
) -> String {
    format!(
        "Asterism '{}' is favorable per the selected Tharai chart ({}), \
         and period '{}' is independently labeled favorable by the almanac.",
        asterism.asterism_name, category.category_name, period.period_name
    )
}

// ── Tests ───────────────────────────────────────────────────────────────────

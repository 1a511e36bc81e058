//! End-to-end planning over an almanac run.
//!
//! [`plan`] chains the pipeline: extract every day, key the asterism windows
//! (by listing day or by start day), key the periods, and intersect. The
//! [`Plan`] also carries the two coarser views a planner shows next to the
//! exact overlaps:
//!
//! - [`daily_summaries`]: favorable asterisms and favorable periods side by
//!   side for each listed day, without intersecting them
//! - [`day_verdicts`]: asterism windows regrouped by start day, with the day
//!   marked favorable if any of its windows is

use chrono::NaiveDate;
use log::debug;
use serde::Serialize;

use crate::almanac::Almanac;
use crate::chart::FavorabilityChart;
use crate::extract::{extract_all, AsterismInterval, Extraction, PeriodInterval};
use crate::intersect::{intersect_all, OverlapRecord};
use crate::reassign::{group_by_source_day, group_periods, reassign};

// ── Options ─────────────────────────────────────────────────────────────────

/// Which calendar day an asterism window is intersected under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DayKey {
    /// The day the almanac listed the window under.
    #[default]
    Listed,
    /// The day the window starts on.
    Start,
}

/// Options for [`plan`].
#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    pub day_key: DayKey,
}

// ── Views ───────────────────────────────────────────────────────────────────

/// Favorable asterisms and favorable periods listed on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub favorable_asterisms: Vec<AsterismInterval>,
    pub favorable_periods: Vec<PeriodInterval>,
}

/// Asterism windows starting on one day, and whether any is favorable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayVerdict {
    pub date: NaiveDate,
    pub favorable: bool,
    pub asterisms: Vec<AsterismInterval>,
}

/// The complete result of [`plan`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct Plan {
    pub asterisms: Vec<AsterismInterval>,
    pub periods: Vec<PeriodInterval>,
    pub overlaps: Vec<OverlapRecord>,
    pub summaries: Vec<DaySummary>,
    pub verdicts: Vec<DayVerdict>,
}

// ── plan ────────────────────────────────────────────────────────────────────

/// Run the whole pipeline over `almanac` with `chart`.
///
/// Days whose key is not an ISO date, and entries that fail to parse, are
/// skipped. The result is deterministic for a given input.
pub fn plan(almanac: &Almanac, chart: &FavorabilityChart, options: &PlanOptions) -> Plan {
    let extraction = extract_all(almanac, chart);

    let asterisms_by_day = match options.day_key {
        DayKey::Listed => group_by_source_day(&extraction.asterisms),
        DayKey::Start => reassign(&extraction.asterisms),
    };
    let periods_by_day = group_periods(&extraction.periods);
    let overlaps = intersect_all(&asterisms_by_day, &periods_by_day);

    debug!(
        "planned {} days: {} asterism windows, {} periods, {} overlaps",
        almanac.len(),
        extraction.asterisms.len(),
        extraction.periods.len(),
        overlaps.len()
    );

    let summaries = daily_summaries(&extraction);
    let verdicts = day_verdicts(&extraction.asterisms);

    Plan {
        asterisms: extraction.asterisms,
        periods: extraction.periods,
        overlaps,
        summaries,
        verdicts,
    }
}

/// Favorable asterisms and favorable periods per listing day, ascending.
///
/// Only days with at least one of either appear.
pub fn daily_summaries(extraction: &Extraction) -> Vec<DaySummary> {
    let asterisms = group_by_source_day(&extraction.asterisms);
    let periods = group_periods(&extraction.periods);

    let mut days: Vec<NaiveDate> = asterisms.keys().chain(periods.keys()).copied().collect();
    days.sort();
    days.dedup();

    days.into_iter()
        .filter_map(|date| {
            let favorable_asterisms: Vec<AsterismInterval> = asterisms
                .get(&date)
                .into_iter()
                .flatten()
                .filter(|a| a.favorable())
                .cloned()
                .collect();
            let favorable_periods: Vec<PeriodInterval> = periods
                .get(&date)
                .into_iter()
                .flatten()
                .filter(|p| p.is_favorable())
                .cloned()
                .collect();

            if favorable_asterisms.is_empty() && favorable_periods.is_empty() {
                return None;
            }
            Some(DaySummary {
                date,
                favorable_asterisms,
                favorable_periods,
            })
        })
        .collect()
}

/// Asterism windows regrouped by start day, with a per-day verdict.
pub fn day_verdicts(asterisms: &[AsterismInterval]) -> Vec<DayVerdict> {
    reassign(asterisms)
        .into_iter()
        .map(|(date, asterisms)| DayVerdict {
            date,
            favorable: asterisms.iter().any(AsterismInterval::favorable),
            asterisms,
        })
        .collect()
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::almanac::{AlmanacDay, AlmanacEntry, Favorability};
    use crate::chart::CategoryEntry;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn chart() -> FavorabilityChart {
        let entry = |category: &str, names: &[&str], favorable: bool| CategoryEntry {
            category_name: category.to_string(),
            asterism_numbers: Vec::new(),
            asterism_names: names.iter().map(|n| n.to_string()).collect(),
            favorable,
            meaning: None,
        };
        FavorabilityChart::new(vec![
            entry("Success Tharai", &["Uthiradam"], true),
            entry("Struggle Tharai", &["Thiruvonam"], false),
            entry("Friendship Tharai", &["Avittam"], true),
        ])
    }

    fn almanac() -> Almanac {
        Almanac::new()
            .with_day(
                "2025-03-24",
                AlmanacDay::new()
                    .with_section(
                        "Nakshatram",
                        vec![
                            AlmanacEntry::timed("Uthiradam", "Mar 23 03:23 AM – Mar 24 02:10 AM"),
                            AlmanacEntry::timed("Thiruvonam", "Mar 24 02:10 AM – Mar 25 01:05 AM"),
                        ],
                    )
                    .with_section(
                        "Auspicious Period",
                        vec![
                            AlmanacEntry::timed("Abhijit Muhurtham", "11:51 AM – 12:40 PM"),
                            AlmanacEntry::timed("Amrit Kalam", "01:00 AM – 02:30 AM"),
                        ],
                    )
                    .with_section(
                        "Inauspicious Period",
                        vec![AlmanacEntry::timed("Rahu", "07:30 AM – 09:00 AM")],
                    ),
            )
            .with_day(
                "2025-03-25",
                AlmanacDay::new()
                    .with_section(
                        "Nakshatram",
                        vec![AlmanacEntry::timed("Avittam", "Mar 25 01:05 AM – Mar 26 12:20 AM")],
                    )
                    .with_section(
                        "Auspicious Period",
                        vec![AlmanacEntry::timed("Abhijit Muhurtham", "11:50 AM – 12:39 PM")],
                    ),
            )
    }

    #[test]
    fn test_plan_by_listed_day() {
        let result = plan(&almanac(), &chart(), &PlanOptions::default());

        assert_eq!(result.asterisms.len(), 3);
        assert_eq!(result.periods.len(), 4);

        let pairs: Vec<(NaiveDate, &str, &str)> = result
            .overlaps
            .iter()
            .map(|r| (r.date, r.asterism_name.as_str(), r.period_name.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (day(2025, 3, 24), "Uthiradam", "Amrit Kalam"),
                (day(2025, 3, 25), "Avittam", "Abhijit Muhurtham"),
            ]
        );
        assert_eq!(
            result.overlaps[0].overlap.end(),
            day(2025, 3, 24).and_hms_opt(2, 10, 0).unwrap()
        );
    }

    #[test]
    fn test_plan_by_start_day() {
        let options = PlanOptions {
            day_key: DayKey::Start,
        };
        let result = plan(&almanac(), &chart(), &options);

        // Uthiradam now starts on Mar 23, which lists no periods
        assert_eq!(result.overlaps.len(), 1);
        assert_eq!(result.overlaps[0].asterism_name, "Avittam");
    }

    #[test]
    fn test_daily_summaries() {
        let extraction = extract_all(&almanac(), &chart());
        let summaries = daily_summaries(&extraction);

        assert_eq!(summaries.len(), 2);
        let first = &summaries[0];
        assert_eq!(first.date, day(2025, 3, 24));
        assert_eq!(first.favorable_asterisms.len(), 1);
        assert_eq!(first.favorable_asterisms[0].asterism_name, "Uthiradam");
        // Rahu comes from an inauspicious section and is left out
        assert_eq!(first.favorable_periods.len(), 2);
        assert!(first
            .favorable_periods
            .iter()
            .all(|p| p.favorability == Favorability::Favorable));
    }

    #[test]
    fn test_daily_summaries_skip_days_without_favorable_items() {
        let only_struggle = Almanac::new().with_day(
            "2025-03-24",
            AlmanacDay::new().with_section(
                "Nakshatram",
                vec![AlmanacEntry::timed("Thiruvonam", "Mar 24 02:10 AM – Mar 25 01:05 AM")],
            ),
        );
        let extraction = extract_all(&only_struggle, &chart());
        assert!(daily_summaries(&extraction).is_empty());
    }

    #[test]
    fn test_day_verdicts_by_start_day() {
        let extraction = extract_all(&almanac(), &chart());
        let verdicts = day_verdicts(&extraction.asterisms);

        let summary: Vec<(NaiveDate, bool, usize)> = verdicts
            .iter()
            .map(|v| (v.date, v.favorable, v.asterisms.len()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (day(2025, 3, 23), true, 1),
                (day(2025, 3, 24), false, 1),
                (day(2025, 3, 25), true, 1),
            ]
        );
    }

    #[test]
    fn test_plan_single_day_single_overlap() {
        let almanac = Almanac::new().with_day(
            "2025-03-24",
            AlmanacDay::new()
                .with_section(
                    "Nakshatram",
                    vec![AlmanacEntry::timed("Avittam", "Mar 24 08:00 AM – Mar 24 02:00 PM")],
                )
                .with_section(
                    "Auspicious Period",
                    vec![AlmanacEntry::timed("Abhijit", "09:00 AM – 10:00 AM")],
                )
                .with_section(
                    "Inauspicious Period",
                    vec![AlmanacEntry::timed("Rahu", "01:00 PM – 03:00 PM")],
                ),
        );
        let result = plan(&almanac, &chart(), &PlanOptions::default());

        assert_eq!(result.overlaps.len(), 1);
        let overlap = result.overlaps[0].overlap;
        assert_eq!(overlap.start(), day(2025, 3, 24).and_hms_opt(9, 0, 0).unwrap());
        assert_eq!(overlap.end(), day(2025, 3, 24).and_hms_opt(10, 0, 0).unwrap());
    }

    #[test]
    fn test_plan_neutral_section_flag_yields_no_overlap() {
        let almanac = Almanac::new().with_day(
            "2025-03-24",
            AlmanacDay::new()
                .with_section(
                    "Nakshatram",
                    vec![AlmanacEntry::timed("Avittam", "Mar 24 08:00 AM – Mar 24 02:00 PM")],
                )
                .with_section(
                    "Gowri Period",
                    vec![AlmanacEntry::timed("Amirdha", "09:00 AM – 10:00 AM")
                        .with_flag(Favorability::Favorable)],
                ),
        );
        let result = plan(&almanac, &chart(), &PlanOptions::default());

        assert!(result.overlaps.is_empty());
        assert_eq!(result.periods.len(), 1);
        assert_eq!(result.periods[0].favorability, Favorability::Unknown);
        assert!(result.summaries[0].favorable_periods.is_empty());
    }

    #[test]
    fn test_plan_empty_almanac() {
        let result = plan(&Almanac::new(), &chart(), &PlanOptions::default());
        assert!(result.overlaps.is_empty());
        assert!(result.summaries.is_empty());
        assert!(result.verdicts.is_empty());
    }
}

//! Text and JSON presentation of planner output.

use std::collections::BTreeMap;
use std::io::{self, Write};

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;
use tharai_engine::{
    DaySummary, DayVerdict, FavorabilityChart, OverlapRecord, PeriodInterval, TimeInterval,
};

const CLOCK_FORMAT: &str = "%b %d %I:%M %p";
const UNKNOWN_CATEGORY: &str = "Unknown Tharai";
const RULE: &str = "---";

/// `"24th March 2025 - Monday"`.
pub fn day_label(date: NaiveDate) -> String {
    format!(
        "{}{} {} - {}",
        date.day(),
        ordinal_suffix(date.day()),
        date.format("%B %Y"),
        date.format("%A")
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 100, day % 10) {
        (11..=13, _) => "th",
        (_, 1) => "st",
        (_, 2) => "nd",
        (_, 3) => "rd",
        _ => "th",
    }
}

fn clock(t: NaiveDateTime) -> String {
    t.format(CLOCK_FORMAT).to_string()
}

/// `"Mar 23 03:23 AM – Mar 24 02:10 AM"`.
pub fn span(interval: &TimeInterval) -> String {
    format!("{} \u{2013} {}", clock(interval.start()), clock(interval.end()))
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

// ── Overlaps ────────────────────────────────────────────────────────────────

/// Overlaps grouped by day, then by asterism, each group sorted by start.
pub fn write_overlaps<W: Write>(out: &mut W, records: &[OverlapRecord]) -> io::Result<()> {
    if records.is_empty() {
        return writeln!(out, "No overlapping favorable intervals found.");
    }

    let mut by_day: BTreeMap<NaiveDate, BTreeMap<&str, Vec<&OverlapRecord>>> = BTreeMap::new();
    for record in records {
        by_day
            .entry(record.date)
            .or_default()
            .entry(record.asterism_name.as_str())
            .or_default()
            .push(record);
    }

    for (date, by_asterism) in by_day {
        writeln!(out, "Date: {}", day_label(date))?;
        for (_, mut group) in by_asterism {
            group.sort_by_key(|r| r.overlap.start());
            let first = group[0];
            match &first.category_meaning {
                Some(meaning) => writeln!(
                    out,
                    "  Asterism: {} ({}) - {}",
                    first.asterism_name, first.category_name, meaning
                )?,
                None => writeln!(out, "  Asterism: {} ({})", first.asterism_name, first.category_name)?,
            }
            writeln!(out, "  Asterism interval: {}", span(&first.asterism_interval))?;
            writeln!(out, "  Favorable periods overlapping:")?;
            for record in group {
                writeln!(out, "    - {}: {}", record.period_name, span(&record.overlap))?;
            }
            writeln!(out, "  {RULE}")?;
        }
    }
    Ok(())
}

// ── Verdicts ────────────────────────────────────────────────────────────────

pub fn write_verdicts<W: Write>(out: &mut W, verdicts: &[DayVerdict]) -> io::Result<()> {
    if verdicts.is_empty() {
        return writeln!(out, "No asterism windows found.");
    }

    for verdict in verdicts {
        let label = if verdict.favorable {
            "Favorable"
        } else {
            "Unfavorable"
        };
        writeln!(out, "Date: {} - {}", day_label(verdict.date), label)?;
        for asterism in &verdict.asterisms {
            writeln!(
                out,
                "  Asterism: {} | Time: {} | Tharai: {} | Favorable: {}",
                asterism.asterism_name,
                span(&asterism.interval),
                asterism.category_name().unwrap_or(UNKNOWN_CATEGORY),
                yes_no(asterism.favorable())
            )?;
        }
        writeln!(out, "  {RULE}")?;
    }
    Ok(())
}

// ── Periods ─────────────────────────────────────────────────────────────────

pub fn write_periods<W: Write>(out: &mut W, periods: &[PeriodInterval]) -> io::Result<()> {
    if periods.is_empty() {
        return writeln!(out, "No period details found.");
    }

    let mut by_day: BTreeMap<NaiveDate, Vec<&PeriodInterval>> = BTreeMap::new();
    for period in periods {
        by_day.entry(period.period_day).or_default().push(period);
    }

    for (date, group) in by_day {
        writeln!(out, "Date: {}", day_label(date))?;
        for period in group {
            writeln!(
                out,
                "  {}: {} (Type: {:?})",
                period.period_name,
                span(&period.interval),
                period.favorability
            )?;
        }
        writeln!(out, "  {RULE}")?;
    }
    Ok(())
}

// ── Summaries ───────────────────────────────────────────────────────────────

pub fn write_summaries<W: Write>(out: &mut W, summaries: &[DaySummary]) -> io::Result<()> {
    if summaries.is_empty() {
        return writeln!(out, "No favorable days found.");
    }

    for summary in summaries {
        let asterisms: Vec<String> = summary
            .favorable_asterisms
            .iter()
            .map(|a| format!("{} ({})", a.asterism_name, span(&a.interval)))
            .collect();
        let periods: Vec<String> = summary
            .favorable_periods
            .iter()
            .map(|p| format!("{} ({})", p.period_name, span(&p.interval)))
            .collect();

        writeln!(out, "Date: {}", day_label(summary.date))?;
        writeln!(out, "  Favorable asterisms: {}", joined_or_none(&asterisms))?;
        writeln!(out, "  Favorable periods: {}", joined_or_none(&periods))?;
    }
    Ok(())
}

fn joined_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

// ── Charts ──────────────────────────────────────────────────────────────────

pub fn write_chart<W: Write>(out: &mut W, name: &str, chart: &FavorabilityChart) -> io::Result<()> {
    writeln!(out, "Chart: {name}")?;
    writeln!(out, "Tharai | Numbers | Names | Meaning | Favorable")?;
    for entry in chart.entries() {
        let numbers: Vec<String> = entry.asterism_numbers.iter().map(u32::to_string).collect();
        writeln!(
            out,
            "{} | {} | {} | {} | {}",
            entry.category_name,
            numbers.join(", "),
            entry.asterism_names.join(", "),
            entry.meaning.as_deref().unwrap_or("N/A"),
            yes_no(entry.favorable)
        )?;
    }
    Ok(())
}

pub fn write_chart_names<W: Write>(out: &mut W, names: &[&str]) -> io::Result<()> {
    for name in names {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

// ── Tests ───────────────────────────────────────────────────────────────────

use std::hint::black_box;

use chrono::{Duration, NaiveDate};
use criterion::{criterion_group, criterion_main, Criterion};
use tharai_engine::{
    extract_all, parse_range, plan, reassign, Almanac, AlmanacDay, AlmanacEntry, CategoryEntry,
    DayKey, FavorabilityChart, PlanOptions,
};

const NAMES: &[&str] = &[
    "Aswini", "Parani", "Karthikai", "Rohini", "Mirugaseeridam", "Thiruvadhirai", "Punarpoosam",
    "Poosam", "Ayilyam", "Magam", "Pooram", "Uthiram", "Astham", "Chithirai", "Swathi",
    "Vishakam", "Anusham", "Kettai", "Moolam", "Pooradam", "Uthiradam", "Thiruvonam", "Avittam",
    "Sadhayam", "Poorattathi", "Uthirattathi", "Revathi",
];

fn chart() -> FavorabilityChart {
    let entries = (0..9)
        .map(|i| CategoryEntry {
            category_name: format!("Tharai {}", i + 1),
            asterism_numbers: vec![i + 1, i + 10, i + 19],
            asterism_names: (0..3).map(|k| NAMES[(i + 9 * k) as usize].to_string()).collect(),
            favorable: i % 2 == 0,
            meaning: None,
        })
        .collect();
    FavorabilityChart::new(entries)
}

/// A month of days, each listing two asterism windows and four periods.
fn almanac(days: i64) -> Almanac {
    let first = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let mut almanac = Almanac::new();
    for i in 0..days {
        let date = first + Duration::days(i);
        let prev = date - Duration::days(1);
        let next = date + Duration::days(1);
        let current = NAMES[i as usize % NAMES.len()];
        let following = NAMES[(i as usize + 1) % NAMES.len()];

        let day = AlmanacDay::new()
            .with_section(
                "Nakshatram",
                vec![
                    AlmanacEntry::timed(
                        current,
                        format!("{} 03:23 AM – {} 02:10 AM", prev.format("%b %d"), date.format("%b %d")),
                    ),
                    AlmanacEntry::timed(
                        following,
                        format!("{} 02:10 AM – {} 01:05 AM", date.format("%b %d"), next.format("%b %d")),
                    ),
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
                vec![
                    AlmanacEntry::timed("Rahu", "07:30 AM – 09:00 AM"),
                    AlmanacEntry::timed("Yamagandam", "10:30 AM – 12:00 PM"),
                ],
            );
        almanac = almanac.with_day(date.format("%Y-%m-%d").to_string(), day);
    }
    almanac
}

fn parse_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    group.bench_function("parse_range", |b| {
        b.iter(|| parse_range(black_box("Rohini - Mar 23 03:23 AM – Mar 24 02:10 AM"), 2025))
    });
    group.finish();
}

fn pipeline_bench(c: &mut Criterion) {
    let chart = chart();
    let almanac = almanac(30);
    let extraction = extract_all(&almanac, &chart);

    let mut group = c.benchmark_group("pipeline");
    group.bench_function("extract_all_30_days", |b| {
        b.iter(|| extract_all(black_box(&almanac), &chart))
    });
    group.bench_function("reassign_30_days", |b| {
        b.iter(|| reassign(black_box(&extraction.asterisms)))
    });
    group.bench_function("plan_listed_30_days", |b| {
        b.iter(|| plan(black_box(&almanac), &chart, &PlanOptions::default()))
    });
    group.bench_function("plan_start_30_days", |b| {
        let options = PlanOptions {
            day_key: DayKey::Start,
        };
        b.iter(|| plan(black_box(&almanac), &chart, &options))
    });
    group.finish();
}

criterion_group!(benches, parse_bench, pipeline_bench);
criterion_main!(benches);

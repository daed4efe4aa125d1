//! Criterion benchmarks for the scoring hot paths.
//!
//! Benchmarks:
//! 1. Race ranking (single race, growing fleet)
//! 2. Correction pass over a whole series
//! 3. Full pipeline (correct → rank → aggregate) on a snapshot

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use sailrace_core::domain::{
    BoatType, BoatTypeId, Individual, IndividualId, Race, RaceId, RaceResult, RaceTime, ResultId,
    Series, SeriesId,
};
use sailrace_core::scoring::{correct_series, rank_race};
use sailrace_core::{score_snapshot, SeriesSnapshot};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_times(n: usize) -> Vec<(ResultId, RaceTime)> {
    (0..n)
        .map(|i| {
            let time = if i % 17 == 16 {
                RaceTime::DID_NOT_FINISH
            } else {
                RaceTime::from_seconds((2200.0 + (i as f64 * 0.7).sin() * 400.0) as u32)
            };
            (ResultId(i as u32 + 1), time)
        })
        .collect()
}

fn make_snapshot(races: u32, sailors: u32) -> SeriesSnapshot {
    let base = chrono::NaiveDate::from_ymd_opt(2024, 4, 6).unwrap();
    let boat_types = vec![
        BoatType {
            id: BoatTypeId(1),
            name: "Laser".into(),
            fleet: "Fast".into(),
            pyn: 1100,
        },
        BoatType {
            id: BoatTypeId(2),
            name: "RS Aero 7".into(),
            fleet: "Fast".into(),
            pyn: 1063,
        },
        BoatType {
            id: BoatTypeId(3),
            name: "Topper".into(),
            fleet: "Slow".into(),
            pyn: 1365,
        },
        BoatType {
            id: BoatTypeId(4),
            name: "Solo".into(),
            fleet: "Slow".into(),
            pyn: 1142,
        },
    ];
    let individuals: Vec<Individual> = (1..=sailors)
        .map(|i| Individual {
            id: IndividualId(i),
            boat_type_id: BoatTypeId(1 + i % 4),
            name: format!("Sailor {i:03}"),
            boat_number: Some(format!("{}", 1000 + i)),
            ph: None,
        })
        .collect();

    let mut results = Vec::new();
    for race in 1..=races {
        for sailor in 1..=sailors {
            let wave = ((race * 31 + sailor * 7) as f64).sin();
            let raw = if (race + sailor) % 13 == 0 {
                RaceTime::DID_NOT_FINISH
            } else {
                RaceTime::from_seconds((2700.0 + wave * 300.0) as u32)
            };
            results.push(RaceResult::new(
                ResultId(results.len() as u32 + 1),
                RaceId(race),
                IndividualId(sailor),
                2 + sailor % 2,
                raw,
            ));
        }
    }

    SeriesSnapshot {
        series: Series {
            id: SeriesId(1),
            name: "Bench Series".into(),
            counted_races: races / 2,
            weight: 0,
        },
        races: (1..=races)
            .map(|i| {
                let date = base + chrono::Duration::days(i as i64 * 7);
                Race::new(RaceId(i), SeriesId(1), date, 2)
            })
            .collect(),
        results,
        individuals,
        boat_types,
    }
}

// ── 1. Race ranking ──────────────────────────────────────────────────

fn bench_rank_race(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_race");

    for &fleet_size in &[10, 50, 250] {
        let times = make_times(fleet_size);
        group.bench_with_input(
            BenchmarkId::new("boats", fleet_size),
            &fleet_size,
            |b, _| {
                b.iter(|| rank_race(black_box(&times)));
            },
        );
    }

    group.finish();
}

// ── 2. Correction pass ───────────────────────────────────────────────

fn bench_correct_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("correct_series");

    let snapshot = make_snapshot(20, 40);
    group.bench_function("20_races_40_sailors", |b| {
        b.iter(|| correct_series(black_box(&snapshot)));
    });

    group.finish();
}

// ── 3. Full pipeline ─────────────────────────────────────────────────

fn bench_score_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_snapshot");

    for &(races, sailors) in &[(10u32, 20u32), (30, 60)] {
        let snapshot = make_snapshot(races, sailors);
        group.bench_with_input(
            BenchmarkId::new("races_x_sailors", format!("{races}x{sailors}")),
            &snapshot,
            |b, snapshot| {
                b.iter(|| {
                    let mut snapshot = snapshot.clone();
                    score_snapshot(black_box(&mut snapshot))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_rank_race,
    bench_correct_series,
    bench_score_snapshot,
);
criterion_main!(benches);

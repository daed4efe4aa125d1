//! Property tests for scoring invariants.
//!
//! Uses proptest to verify:
//! 1. Rank consistency: position is 1 + the number of strictly faster times
//! 2. DNF floor: non-finishers always get max(15, fleet size + 1)
//! 3. Discard rule: counted score sums exactly the best results
//! 4. Qualification monotonicity in the counted-race count
//! 5. Tie-break order: better position sequences never sort later
//! 6. Determinism: scoring twice gives identical output

use chrono::NaiveDate;
use proptest::prelude::*;
use sailrace_core::domain::{
    BoatType, BoatTypeId, Individual, IndividualId, Race, RaceId, RaceResult, RaceScore,
    RaceTime, ResultId, Series, SeriesId, SeriesPosition,
};
use sailrace_core::scoring::{compare_standings, rank_race, score_standing};
use sailrace_core::{score_snapshot, SeriesSnapshot};

// ── Strategies (proptest) ────────────────────────────────────────────

/// Adjusted times with roughly one in eight non-finishers.
fn arb_race_times() -> impl Strategy<Value = Vec<RaceTime>> {
    prop::collection::vec(
        prop_oneof![
            7 => (600u32..4000).prop_map(RaceTime::from_seconds),
            1 => Just(RaceTime::DID_NOT_FINISH),
        ],
        0..40,
    )
}

fn arb_positions() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(1u32..40, 1..12)
}

fn standing_from(positions: &[u32]) -> SeriesPosition {
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    SeriesPosition {
        rank: 0,
        name: "P".into(),
        fleet: "Fast".into(),
        boat_type: "Laser".into(),
        boat_number: None,
        has_conflict: false,
        races: positions
            .iter()
            .enumerate()
            .map(|(i, &position)| RaceScore {
                race_id: RaceId(i as u32 + 1),
                race_date: base + chrono::Duration::days(7 * i as i64),
                position,
                discarded: false,
            })
            .collect(),
        total_score: 0,
        counted_score: 0,
        tie_break: String::new(),
        average_position: 0.0,
        qualified: false,
    }
}

fn scored(positions: &[u32], counted_races: usize) -> SeriesPosition {
    let mut standing = standing_from(positions);
    score_standing(&mut standing, counted_races);
    standing
}

// ── 1 & 2. Ranking ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn position_is_one_plus_strictly_faster(times in arb_race_times()) {
        let input: Vec<(ResultId, RaceTime)> = times
            .iter()
            .enumerate()
            .map(|(i, &t)| (ResultId(i as u32), t))
            .collect();
        let ranked = rank_race(&input);
        prop_assert_eq!(ranked.len(), times.len());

        for (i, &(id, position)) in ranked.iter().enumerate() {
            prop_assert_eq!(id, ResultId(i as u32));
            let time = times[i];
            if time.is_unscored() {
                prop_assert_eq!(position, 15u32.max(times.len() as u32 + 1));
            } else {
                let faster = times
                    .iter()
                    .filter(|t| !t.is_unscored() && **t < time)
                    .count() as u32;
                prop_assert_eq!(position, faster + 1);
            }
        }
    }

    #[test]
    fn equal_times_share_positions(times in arb_race_times()) {
        let input: Vec<(ResultId, RaceTime)> = times
            .iter()
            .enumerate()
            .map(|(i, &t)| (ResultId(i as u32), t))
            .collect();
        let ranked = rank_race(&input);
        for a in 0..times.len() {
            for b in 0..times.len() {
                if times[a] == times[b] {
                    prop_assert_eq!(ranked[a].1, ranked[b].1);
                }
            }
        }
    }
}

// ── 3 & 4. Discards and qualification ────────────────────────────────

proptest! {
    #[test]
    fn counted_score_sums_best_results(positions in arb_positions(), counted in 0usize..10) {
        let standing = scored(&positions, counted);

        let mut sorted = positions.clone();
        sorted.sort_unstable();
        let take = counted.min(positions.len());
        let best: u32 = sorted[..take].iter().sum();

        prop_assert_eq!(standing.counted_score, best);
        prop_assert_eq!(standing.total_score, positions.iter().sum::<u32>());
        prop_assert_eq!(standing.discard_count(), positions.len().saturating_sub(counted));
        prop_assert_eq!(standing.races_sailed(), positions.len());
    }

    #[test]
    fn raising_counted_races_never_qualifies_anyone(
        positions in arb_positions(),
        low in 0usize..10,
        extra in 0usize..5,
    ) {
        let before = scored(&positions, low);
        let after = scored(&positions, low + extra);
        prop_assert_eq!(before.qualified, positions.len() >= low);
        if after.qualified {
            prop_assert!(before.qualified);
        }
    }

    #[test]
    fn races_stay_in_date_order(positions in arb_positions(), counted in 0usize..10) {
        let standing = scored(&positions, counted);
        let dates: Vec<NaiveDate> = standing.races.iter().map(|r| r.race_date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        prop_assert_eq!(dates, sorted);
    }
}

// ── 5. Tie-break order ───────────────────────────────────────────────

proptest! {
    #[test]
    fn dominating_sequence_never_sorts_later(
        positions in prop::collection::vec(2u32..40, 1..8),
        improve_at in 0usize..8,
    ) {
        let counted = positions.len();
        let mut better = positions.clone();
        better.sort_unstable();
        let idx = improve_at % better.len();
        better[idx] -= 1;

        let worse_standing = scored(&positions, counted);
        let better_standing = scored(&better, counted);
        prop_assert!(better_standing.counted_score < worse_standing.counted_score);
        prop_assert_ne!(
            compare_standings(&better_standing, &worse_standing),
            std::cmp::Ordering::Greater
        );
    }

    #[test]
    fn unqualified_always_behind_qualified(
        qualified_positions in prop::collection::vec(1u32..40, 3..6),
        short_positions in prop::collection::vec(1u32..40, 1..3),
    ) {
        let q = scored(&qualified_positions, 3);
        let u = scored(&short_positions, 3);
        prop_assert!(q.qualified);
        prop_assert!(!u.qualified);
        prop_assert_eq!(compare_standings(&q, &u), std::cmp::Ordering::Less);
    }
}

// ── 6. Determinism ───────────────────────────────────────────────────

fn series_from(times: &[Vec<u32>]) -> SeriesSnapshot {
    let base = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let sailors = times.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
    let mut results = Vec::new();
    for (race, race_times) in times.iter().enumerate() {
        for (sailor, &secs) in race_times.iter().enumerate() {
            let raw = if secs == 0 {
                RaceTime::DID_NOT_FINISH
            } else {
                RaceTime::from_seconds(secs)
            };
            results.push(RaceResult::new(
                ResultId(results.len() as u32 + 1),
                RaceId(race as u32 + 1),
                IndividualId(sailor as u32 + 1),
                1 + (sailor as u32 % 2),
                raw,
            ));
        }
    }
    SeriesSnapshot {
        series: Series {
            id: SeriesId(1),
            name: "Prop".into(),
            counted_races: 2,
            weight: 0,
        },
        races: (0..times.len())
            .map(|i| {
                Race::new(
                    RaceId(i as u32 + 1),
                    SeriesId(1),
                    base + chrono::Duration::days(i as i64),
                    3,
                )
            })
            .collect(),
        results,
        individuals: (1..=sailors)
            .map(|i| Individual {
                id: IndividualId(i),
                boat_type_id: BoatTypeId(1 + i % 3),
                name: format!("Sailor {}", i % 5),
                boat_number: Some(format!("{i}")),
                ph: None,
            })
            .collect(),
        boat_types: vec![
            BoatType {
                id: BoatTypeId(1),
                name: "Laser".into(),
                fleet: "Fast".into(),
                pyn: 1100,
            },
            BoatType {
                id: BoatTypeId(2),
                name: "Topper".into(),
                fleet: "Slow".into(),
                pyn: 1300,
            },
            BoatType {
                id: BoatTypeId(3),
                name: "Solo".into(),
                fleet: "Slow".into(),
                pyn: 1140,
            },
        ],
    }
}

proptest! {
    #[test]
    fn scoring_twice_is_identical(
        times in prop::collection::vec(
            prop::collection::vec(prop_oneof![9 => 600u32..4000, 1 => Just(0u32)], 1..12),
            1..6,
        )
    ) {
        let mut first = series_from(&times);
        let standings_1 = score_snapshot(&mut first).unwrap();
        let mut second = first.clone();
        let standings_2 = score_snapshot(&mut second).unwrap();

        prop_assert_eq!(&first.results, &second.results);
        prop_assert_eq!(standings_1, standings_2);
    }
}

//! Synthetic club data for demos, tests and benchmarks.
//!
//! Everything is drawn from a `StdRng` seeded with the BLAKE3 hash of the
//! seed, so the same arguments always produce the same records. The data is
//! shaped like a real club season: two fleets, several boat classes, a few
//! non-finishers and one sailor who switches boats part way through.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sailrace_core::domain::{
    BoatType, BoatTypeId, Individual, IndividualId, Race, RaceId, RaceResult, RaceTime, ResultId,
    Series, SeriesId,
};
use sailrace_core::{SeriesSnapshot, Tables};

const BOAT_CLASSES: &[(&str, &str, u32)] = &[
    ("Laser", "Fast", 1100),
    ("RS Aero 7", "Fast", 1063),
    ("Laser Radial", "Fast", 1150),
    ("Topper", "Slow", 1365),
    ("Solo", "Slow", 1142),
    ("Mirror", "Slow", 1390),
];

/// Boat type the boat-switching sailor starts in, and the one they move to.
const SWITCH_FROM: u32 = 1;
const SWITCH_TO: u32 = 3;

const FIRST_NAMES: &[&str] = &[
    "Alex", "Bea", "Cal", "Dana", "Eli", "Fran", "Gus", "Hana", "Ivo", "Jo", "Kit", "Lou",
];
const SURNAMES: &[&str] = &["Archer", "Brook", "Cole", "Drake", "Ellis", "Frost", "Gale"];
const SERIES_NAMES: &[&str] = &["Spring Series", "Summer Evenings", "Autumn Pursuit", "Frostbite"];

const DNF_PROBABILITY: f64 = 0.06;
const ATTENDANCE: f64 = 0.8;

fn seeded_rng(seed: u64) -> StdRng {
    let seed_bytes = blake3::hash(format!("sailrace-demo-{seed}").as_bytes());
    StdRng::from_seed(*seed_bytes.as_bytes())
}

fn season_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, 6).unwrap_or(NaiveDate::MIN)
}

fn demo_series(index: u32, races: u32) -> Series {
    Series {
        id: SeriesId(index),
        name: SERIES_NAMES[(index as usize - 1) % SERIES_NAMES.len()].to_string(),
        counted_races: races.div_ceil(2).max(1),
        weight: index as i32 * 10,
    }
}

fn sailor_name(i: usize) -> String {
    let first = FIRST_NAMES[i % FIRST_NAMES.len()];
    let surname = SURNAMES[(i / FIRST_NAMES.len() + i) % SURNAMES.len()];
    let cycle = i / (FIRST_NAMES.len() * SURNAMES.len());
    if cycle == 0 {
        format!("{first} {surname}")
    } else {
        format!("{first} {surname} {}", cycle + 1)
    }
}

/// Generate `series_count` series of `races` races each, sailed by the same
/// `sailors` people.
pub fn generate_demo_tables(seed: u64, series_count: u32, races: u32, sailors: u32) -> Tables {
    let mut rng = seeded_rng(seed);

    let boat_types: Vec<BoatType> = BOAT_CLASSES
        .iter()
        .enumerate()
        .map(|(i, &(name, fleet, pyn))| BoatType {
            id: BoatTypeId(i as u32 + 1),
            name: name.to_string(),
            fleet: fleet.to_string(),
            pyn,
        })
        .collect();

    let mut individuals: Vec<Individual> = (0..sailors)
        .map(|i| {
            let boat_type = if i == 0 {
                SWITCH_FROM
            } else {
                rng.gen_range(1..=BOAT_CLASSES.len() as u32)
            };
            Individual {
                id: IndividualId(i + 1),
                boat_type_id: BoatTypeId(boat_type),
                name: sailor_name(i as usize),
                boat_number: Some(rng.gen_range(100..220_000u32).to_string()),
                ph: None,
            }
        })
        .collect();
    // The first sailor's second boat: same name, same fleet, different class.
    let switcher = (sailors > 0).then(|| IndividualId(sailors + 1));
    if let Some(id) = switcher {
        individuals.push(Individual {
            id,
            boat_type_id: BoatTypeId(SWITCH_TO),
            name: sailor_name(0),
            boat_number: Some(rng.gen_range(100..220_000u32).to_string()),
            ph: None,
        });
    }

    let mut tables = Tables {
        boat_types,
        ..Tables::default()
    };
    let mut next_race = 1u32;
    let mut next_result = 1u32;

    for s in 1..=series_count {
        tables.series.push(demo_series(s, races));
        let series_start = season_start() + chrono::Duration::days(91 * i64::from(s - 1));

        for r in 1..=races {
            let race = Race {
                name: Some(format!("Race {r}")),
                ..Race::new(
                    RaceId(next_race),
                    SeriesId(s),
                    series_start + chrono::Duration::days(7 * i64::from(r - 1)),
                    rng.gen_range(2..=4),
                )
            };
            next_race += 1;
            let laps = rng.gen_range(2..=4u32);
            let lap_seconds = rng.gen_range(420.0..660.0_f64);

            for i in 0..sailors {
                if !rng.gen_bool(ATTENDANCE) {
                    continue;
                }
                let individual = match switcher {
                    Some(second_boat) if i == 0 && r > races / 2 => second_boat,
                    _ => IndividualId(i + 1),
                };
                let pyn = individuals
                    .iter()
                    .find(|ind| ind.id == individual)
                    .map(|ind| BOAT_CLASSES[ind.boat_type_id.0 as usize - 1].2)
                    .unwrap_or(1100);
                let slow = pyn > 1200;
                let sailed_laps = if slow { laps.saturating_sub(1).max(1) } else { laps };

                let raw_time = if rng.gen_bool(DNF_PROBABILITY) {
                    RaceTime::DID_NOT_FINISH
                } else {
                    let noise = 1.0 + rng.gen_range(-0.08..0.08);
                    let seconds =
                        lap_seconds * f64::from(pyn) / 1000.0 * f64::from(sailed_laps) * noise;
                    RaceTime::from_seconds(seconds.round() as u32)
                };

                tables.results.push(RaceResult::new(
                    ResultId(next_result),
                    race.id,
                    individual,
                    sailed_laps,
                    raw_time,
                ));
                next_result += 1;
            }
            tables.races.push(race);
        }
    }

    tables.individuals = individuals;
    tables
}

/// One synthetic series, ready to score without a store.
pub fn generate_demo_snapshot(seed: u64, races: u32, sailors: u32) -> SeriesSnapshot {
    let tables = generate_demo_tables(seed, 1, races, sailors);
    SeriesSnapshot {
        series: demo_series(1, races),
        races: tables.races,
        results: tables.results,
        individuals: tables.individuals,
        boat_types: tables.boat_types,
    }
}

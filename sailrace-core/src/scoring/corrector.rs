//! Handicap time corrector.
//!
//! Normalizes each raw elapsed time against the fleet's series-wide best
//! performance number and rescales it to the race's longest lap count:
//!
//! ```text
//! adjusted = raw × 1200 / minPyn / (laps × wholeLegs + partLegs) × wholeLegs × maxLaps
//! ```
//!
//! The did-not-finish sentinel passes through untouched. Zero or absent
//! ratings, lap counts and leg counts are reported as degenerate input.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{RaceId, RaceTime, ResultId};
use crate::error::{DegenerateInput, ScoringError};
use crate::snapshot::{Entry, SeriesSnapshot};

/// Scale constant of the correction formula.
pub const CORRECTION_FACTOR: f64 = 1200.0;

/// Corrector output for one result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    pub result_id: ResultId,
    pub adjusted_time: RaceTime,
    pub fleet: String,
}

/// Minimum `pyn` per fleet over every boat type that produced a result.
pub fn fleet_baselines<'a>(entries: &[Entry<'a>]) -> BTreeMap<&'a str, u32> {
    let mut baselines: BTreeMap<&str, u32> = BTreeMap::new();
    for entry in entries {
        let pyn = entry.boat_type.pyn;
        baselines
            .entry(entry.boat_type.fleet.as_str())
            .and_modify(|min| *min = (*min).min(pyn))
            .or_insert(pyn);
    }
    baselines
}

/// Longest lap count recorded in each race.
pub fn max_laps_by_race(entries: &[Entry<'_>]) -> BTreeMap<RaceId, u32> {
    let mut max_laps: BTreeMap<RaceId, u32> = BTreeMap::new();
    for entry in entries {
        let laps = entry.result.laps.unwrap_or(0);
        let slot = max_laps.entry(entry.race.id).or_insert(0);
        *slot = (*slot).max(laps);
    }
    max_laps
}

/// Compute the adjusted time of every result in the series.
///
/// Returns one [`Correction`] per result, in snapshot order. Nothing is
/// written; the caller applies the batch.
pub fn correct_series(snapshot: &SeriesSnapshot) -> Result<Vec<Correction>, ScoringError> {
    let entries = snapshot.entries()?;
    let baselines = fleet_baselines(&entries);
    let max_laps = max_laps_by_race(&entries);

    let corrections = entries
        .iter()
        .map(|entry| {
            let fleet = entry.boat_type.fleet.as_str();
            let adjusted_time = correct_entry(
                entry,
                baselines.get(fleet).copied().unwrap_or(0),
                max_laps.get(&entry.race.id).copied().unwrap_or(0),
            )?;
            Ok(Correction {
                result_id: entry.result.id,
                adjusted_time,
                fleet: fleet.to_string(),
            })
        })
        .collect::<Result<Vec<_>, ScoringError>>()?;

    debug!(
        series = %snapshot.series.id,
        results = corrections.len(),
        fleets = baselines.len(),
        "corrected race times"
    );
    Ok(corrections)
}

fn correct_entry(entry: &Entry<'_>, min_pyn: u32, max_laps: u32) -> Result<RaceTime, ScoringError> {
    let result = entry.result;
    if result.did_not_finish() {
        return Ok(RaceTime::DID_NOT_FINISH);
    }

    let laps = result
        .laps
        .ok_or(DegenerateInput::MissingLapCount { result: result.id })?;
    let whole_legs = entry
        .race
        .whole_legs
        .filter(|&legs| legs > 0)
        .ok_or(DegenerateInput::MissingCourseLegs {
            race: entry.race.id,
        })?;
    let part_legs = entry.race.part_legs.unwrap_or(0);

    if min_pyn == 0 {
        warn!(fleet = %entry.boat_type.fleet, "fleet baseline rating is zero");
        return Err(DegenerateInput::ZeroFleetRating {
            fleet: entry.boat_type.fleet.clone(),
        }
        .into());
    }
    let legs_sailed = u64::from(laps) * u64::from(whole_legs) + u64::from(part_legs);
    if legs_sailed == 0 {
        return Err(DegenerateInput::ZeroCourseLength { result: result.id }.into());
    }
    if max_laps == 0 {
        return Err(DegenerateInput::ZeroMaxLaps {
            race: entry.race.id,
        }
        .into());
    }

    let adjusted = adjusted_seconds(
        result.raw_time.seconds(),
        min_pyn,
        legs_sailed,
        whole_legs,
        max_laps,
    );
    RaceTime::from_seconds_f64(adjusted)
        .ok_or_else(|| DegenerateInput::AdjustedTimeOverflow { result: result.id }.into())
}

/// The bare formula. Callers guarantee non-zero divisors.
pub fn adjusted_seconds(
    raw_seconds: u32,
    min_pyn: u32,
    legs_sailed: u64,
    whole_legs: u32,
    max_laps: u32,
) -> f64 {
    f64::from(raw_seconds) * CORRECTION_FACTOR / f64::from(min_pyn) / legs_sailed as f64
        * f64::from(whole_legs)
        * f64::from(max_laps)
}

//! Race position ranker.
//!
//! Positions are recomputed from scratch for the whole series and returned as
//! one replacement map; nothing is patched in place.

use tracing::debug;

use crate::domain::{RaceTime, ResultId};
use crate::error::{DegenerateInput, ScoringError};
use crate::snapshot::{PositionMap, SeriesSnapshot};

/// Lowest position a non-finisher can receive, however small the race.
pub const DNF_POSITION_FLOOR: u32 = 15;

/// Position given to every non-finisher in a race of `competitors` boats.
pub fn dnf_position(competitors: usize) -> u32 {
    let behind_everyone = u32::try_from(competitors).unwrap_or(u32::MAX).saturating_add(1);
    DNF_POSITION_FLOOR.max(behind_everyone)
}

/// Rank one race's adjusted times.
///
/// Finishers get `1 + count(strictly smaller)` over every competitor in the
/// race, the sentinel included, so equal times share a place. Non-finishers
/// get [`dnf_position`]. An empty race yields no positions.
pub fn rank_race(times: &[(ResultId, RaceTime)]) -> Vec<(ResultId, u32)> {
    let mut sorted: Vec<RaceTime> = times.iter().map(|&(_, t)| t).collect();
    sorted.sort_unstable();

    let dnf = dnf_position(times.len());
    times
        .iter()
        .map(|&(id, time)| {
            let position = if time.is_unscored() {
                dnf
            } else {
                let faster = sorted.partition_point(|&other| other < time);
                faster as u32 + 1
            };
            (id, position)
        })
        .collect()
}

/// Rank every race of the series from the results' adjusted times.
pub fn rank_series(snapshot: &SeriesSnapshot) -> Result<PositionMap, ScoringError> {
    let mut positions = PositionMap::new();
    let by_race = snapshot.results_by_race();

    for (race_id, results) in &by_race {
        let times = results
            .iter()
            .map(|r| {
                r.adjusted_time
                    .map(|t| (r.id, t))
                    .ok_or(DegenerateInput::Uncorrected { result: r.id })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let ranked = rank_race(&times);
        debug!(race = %race_id, competitors = ranked.len(), "ranked race");
        positions.extend(ranked);
    }

    Ok(positions)
}

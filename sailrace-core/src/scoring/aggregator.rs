//! Series aggregator — merges per-race positions into ranked standings.
//!
//! Rows are sorted by (name, fleet, boat type) and folded into one
//! [`SeriesPosition`] per (name, fleet), so a sailor who changed boats is
//! scored as one entry. Each entry then gets its discards, tie-break key and
//! qualification, and the entries are sorted by the composite key.

use std::cmp::Ordering;

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{RaceId, RaceScore, SeriesPosition};
use crate::error::{DegenerateInput, ScoringError};
use crate::snapshot::SeriesSnapshot;

/// Appended to every tie-break key so a shorter run of good results still
/// sorts behind a longer one that matches it position for position.
pub const TIE_BREAK_TERMINATOR: &str = "99";

/// One scored result, flattened for grouping.
#[derive(Debug, Clone)]
struct Row<'a> {
    name: &'a str,
    fleet: &'a str,
    boat_type: &'a str,
    boat_number: Option<&'a str>,
    race_id: RaceId,
    race_date: NaiveDate,
    position: u32,
}

/// Build the final standings for a series whose finished races are ranked.
pub fn aggregate(snapshot: &SeriesSnapshot) -> Result<Vec<SeriesPosition>, ScoringError> {
    let mut rows = collect_rows(snapshot)?;
    rows.sort_by(|a, b| {
        (a.name, a.fleet, a.boat_type)
            .cmp(&(b.name, b.fleet, b.boat_type))
            .then_with(|| a.boat_number.cmp(&b.boat_number))
            .then_with(|| (a.race_date, a.race_id).cmp(&(b.race_date, b.race_id)))
    });

    let counted_races = snapshot.series.counted_races as usize;
    let mut standings: Vec<SeriesPosition> = group_rows(&rows);
    for standing in &mut standings {
        score_standing(standing, counted_races);
    }
    rank_standings(&mut standings);

    debug!(
        series = %snapshot.series.id,
        entries = standings.len(),
        "aggregated series standings"
    );
    Ok(standings)
}

fn collect_rows(snapshot: &SeriesSnapshot) -> Result<Vec<Row<'_>>, ScoringError> {
    let mut rows = Vec::with_capacity(snapshot.results.len());
    for entry in snapshot.entries()? {
        if !entry.race.finished {
            continue;
        }
        let position = entry
            .result
            .position
            .filter(|&p| p > 0)
            .ok_or(DegenerateInput::Unranked {
                result: entry.result.id,
            })?;
        rows.push(Row {
            name: entry.individual.name.as_str(),
            fleet: entry.boat_type.fleet.as_str(),
            boat_type: entry.boat_type.name.as_str(),
            boat_number: entry.individual.boat_number.as_deref(),
            race_id: entry.race.id,
            race_date: entry.race.date,
            position,
        });
    }
    Ok(rows)
}

/// Streaming group-by over sorted rows: a new entry starts whenever name or
/// fleet changes.
fn group_rows(rows: &[Row<'_>]) -> Vec<SeriesPosition> {
    rows.iter().fold(Vec::new(), |mut standings, row| {
        let continues = standings
            .last()
            .is_some_and(|s: &SeriesPosition| s.name == row.name && s.fleet == row.fleet);
        if !continues {
            standings.push(SeriesPosition {
                rank: 0,
                name: row.name.to_string(),
                fleet: row.fleet.to_string(),
                boat_type: row.boat_type.to_string(),
                boat_number: row.boat_number.map(str::to_string),
                has_conflict: false,
                races: Vec::new(),
                total_score: 0,
                counted_score: 0,
                tie_break: String::new(),
                average_position: 0.0,
                qualified: false,
            });
        }
        if let Some(current) = standings.last_mut() {
            if current.boat_type != row.boat_type
                || current.boat_number.as_deref() != row.boat_number
            {
                current.has_conflict = true;
            }
            current.races.push(RaceScore {
                race_id: row.race_id,
                race_date: row.race_date,
                position: row.position,
                discarded: false,
            });
        }
        standings
    })
}

/// Apply discards, totals, tie-break key and qualification to one entry.
///
/// Leaves `races` in race-date order.
pub fn score_standing(standing: &mut SeriesPosition, counted_races: usize) {
    standing
        .races
        .sort_by(|a, b| a.position.cmp(&b.position).then(a.race_date.cmp(&b.race_date)));

    let mut total = 0u32;
    let mut counted = 0u32;
    let mut tie_break = String::with_capacity(counted_races * 2 + TIE_BREAK_TERMINATOR.len());
    for (i, race) in standing.races.iter_mut().enumerate() {
        total += race.position;
        race.discarded = i >= counted_races;
        if !race.discarded {
            counted += race.position;
            tie_break.push_str(&format!("{:02}", race.position));
        }
    }
    tie_break.push_str(TIE_BREAK_TERMINATOR);

    let sailed = standing.races.len();
    standing.total_score = total;
    standing.counted_score = counted;
    standing.tie_break = tie_break;
    standing.qualified = sailed >= counted_races;
    standing.average_position = if sailed == 0 {
        0.0
    } else {
        f64::from(total) / sailed as f64
    };

    standing
        .races
        .sort_by(|a, b| (a.race_date, a.race_id).cmp(&(b.race_date, b.race_id)));
}

/// Composite ordering: primary score, then tie-break key.
pub fn compare_standings(a: &SeriesPosition, b: &SeriesPosition) -> Ordering {
    a.primary_score()
        .cmp(&b.primary_score())
        .then_with(|| a.tie_break.cmp(&b.tie_break))
}

/// Stable sort by [`compare_standings`] and number the places from 1.
pub fn rank_standings(standings: &mut [SeriesPosition]) {
    standings.sort_by(compare_standings);
    for (i, standing) in standings.iter_mut().enumerate() {
        standing.rank = i as u32 + 1;
    }
}

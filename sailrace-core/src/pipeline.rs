//! Scoring pipeline — runs corrector, ranker and aggregator in order.
//!
//! Two entry points:
//! - `score_snapshot()`: scores an already-fetched snapshot in place. No I/O.
//! - `score_series()`: reads a snapshot from a store, writes corrections and
//!   positions back, and returns the standings.
//!
//! A failure after the correction write leaves adjusted times updated and
//! positions stale. That state is recoverable by scoring again.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{Series, SeriesId, SeriesPosition};
use crate::error::ScoringError;
use crate::fingerprint::{fingerprint, Fingerprint};
use crate::scoring::{aggregate, correct_series, rank_series};
use crate::snapshot::SeriesSnapshot;
use crate::store::ResultsStore;

/// Final standings of one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standings {
    pub series: Series,
    /// Fingerprint of the inputs these standings were computed from.
    pub fingerprint: Fingerprint,
    /// Number of results corrected and ranked.
    pub result_count: usize,
    /// Entries in final order.
    pub entries: Vec<SeriesPosition>,
}

impl Standings {
    pub fn qualified(&self) -> impl Iterator<Item = &SeriesPosition> {
        self.entries.iter().filter(|e| e.qualified)
    }

    pub fn fleets(&self) -> Vec<&str> {
        let mut fleets: Vec<&str> = self.entries.iter().map(|e| e.fleet.as_str()).collect();
        fleets.sort_unstable();
        fleets.dedup();
        fleets
    }
}

/// Score a snapshot in place: corrections and positions are applied to its
/// results, and the standings are returned.
pub fn score_snapshot(snapshot: &mut SeriesSnapshot) -> Result<Standings, ScoringError> {
    snapshot.validate()?;
    let fingerprint = fingerprint(snapshot);

    let corrections = correct_series(snapshot)?;
    snapshot.apply_corrections(&corrections);

    let positions = rank_series(snapshot)?;
    snapshot.apply_positions(&positions);

    let entries = aggregate(snapshot)?;
    Ok(Standings {
        series: snapshot.series.clone(),
        fingerprint,
        result_count: snapshot.results.len(),
        entries,
    })
}

/// Score one series from a store.
///
/// Unknown series ids return `Ok(None)`. Each stage's output is computed in
/// full before it is written, and written as one batch.
pub fn score_series(
    store: &dyn ResultsStore,
    series_id: SeriesId,
) -> Result<Option<Standings>, ScoringError> {
    let Some(mut snapshot) = store.load_series(series_id)? else {
        debug!(series = %series_id, store = store.name(), "series not found");
        return Ok(None);
    };
    snapshot.validate()?;
    let fingerprint = fingerprint(&snapshot);

    let corrections = correct_series(&snapshot)?;
    store.write_corrections(series_id, &corrections)?;
    snapshot.apply_corrections(&corrections);

    let positions = rank_series(&snapshot)?;
    store.write_positions(series_id, &positions)?;
    snapshot.apply_positions(&positions);

    let entries = aggregate(&snapshot)?;
    info!(
        series = %series_id,
        results = snapshot.results.len(),
        entries = entries.len(),
        fingerprint = fingerprint.short(),
        "scored series"
    );

    Ok(Some(Standings {
        series: snapshot.series,
        fingerprint,
        result_count: snapshot.results.len(),
        entries,
    }))
}

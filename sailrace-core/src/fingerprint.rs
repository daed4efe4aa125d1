//! Snapshot fingerprint — BLAKE3 hash of the scoring inputs.
//!
//! Computed results (adjusted time, position, fleet) are excluded, so a
//! snapshot hashes the same before and after it has been scored.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::snapshot::SeriesSnapshot;

/// Hex-encoded BLAKE3 digest of a snapshot's inputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(pub String);

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Fingerprint {
    /// First 12 hex characters, for log lines.
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(12)]
    }
}

/// Hash the inputs of a snapshot.
///
/// Records are sorted by id before hashing, so store row order does not
/// affect the result.
pub fn fingerprint(snapshot: &SeriesSnapshot) -> Fingerprint {
    let mut races: Vec<_> = snapshot.races.iter().collect();
    races.sort_by_key(|r| r.id);
    let mut individuals: Vec<_> = snapshot.individuals.iter().collect();
    individuals.sort_by_key(|i| i.id);
    let mut boat_types: Vec<_> = snapshot.boat_types.iter().collect();
    boat_types.sort_by_key(|b| b.id);
    let mut results: Vec<_> = snapshot
        .results
        .iter()
        .map(|r| {
            json!({
                "id": r.id,
                "race_id": r.race_id,
                "individual_id": r.individual_id,
                "laps": r.laps,
                "raw_time": r.raw_time,
            })
        })
        .collect();
    results.sort_by_key(|r| r["id"].as_u64());

    let canonical = json!({
        "series": &snapshot.series,
        "races": races,
        "individuals": individuals,
        "boat_types": boat_types,
        "results": results,
    });
    Fingerprint(blake3::hash(canonical.to_string().as_bytes()).to_hex().to_string())
}

//! SeriesSnapshot — the already-fetched records of one series.
//!
//! The store hands the engine a snapshot; the engine never reads anything
//! else. Lookups go through a borrowed [`SnapshotIndex`] so the stages can
//! compute against immutable data and apply their output afterwards.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::{
    BoatType, BoatTypeId, Individual, IndividualId, Race, RaceId, RaceResult, ResultId, Series,
};
use crate::error::{DegenerateInput, ReferenceKind, ScoringError};
use crate::scoring::Correction;

/// Map of result id to finishing position, the ranker's complete output.
pub type PositionMap = BTreeMap<ResultId, u32>;

/// Everything needed to score one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSnapshot {
    pub series: Series,
    pub races: Vec<Race>,
    pub results: Vec<RaceResult>,
    pub individuals: Vec<Individual>,
    pub boat_types: Vec<BoatType>,
}

/// A result joined with its race, individual and boat type.
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    pub result: &'a RaceResult,
    pub race: &'a Race,
    pub individual: &'a Individual,
    pub boat_type: &'a BoatType,
}

/// Borrowed id lookups over a snapshot.
#[derive(Debug)]
pub struct SnapshotIndex<'a> {
    races: HashMap<RaceId, &'a Race>,
    individuals: HashMap<IndividualId, &'a Individual>,
    boat_types: HashMap<BoatTypeId, &'a BoatType>,
}

impl<'a> SnapshotIndex<'a> {
    pub fn race(&self, id: RaceId) -> Option<&'a Race> {
        self.races.get(&id).copied()
    }

    pub fn individual(&self, id: IndividualId) -> Option<&'a Individual> {
        self.individuals.get(&id).copied()
    }

    pub fn boat_type(&self, id: BoatTypeId) -> Option<&'a BoatType> {
        self.boat_types.get(&id).copied()
    }

    /// Join a result with its race, individual and boat type.
    pub fn resolve(&self, result: &'a RaceResult) -> Result<Entry<'a>, ScoringError> {
        let race = self
            .race(result.race_id)
            .ok_or_else(|| ScoringError::missing(ReferenceKind::Race, result.race_id, result.id))?;
        let individual = self.individual(result.individual_id).ok_or_else(|| {
            ScoringError::missing(ReferenceKind::Individual, result.individual_id, result.id)
        })?;
        let boat_type = self.boat_type(individual.boat_type_id).ok_or_else(|| {
            ScoringError::missing(ReferenceKind::BoatType, individual.boat_type_id, result.id)
        })?;
        Ok(Entry {
            result,
            race,
            individual,
            boat_type,
        })
    }
}

impl SeriesSnapshot {
    pub fn index(&self) -> SnapshotIndex<'_> {
        SnapshotIndex {
            races: self
                .races
                .iter()
                .filter(|r| r.series_id == self.series.id)
                .map(|r| (r.id, r))
                .collect(),
            individuals: self.individuals.iter().map(|i| (i.id, i)).collect(),
            boat_types: self.boat_types.iter().map(|b| (b.id, b)).collect(),
        }
    }

    /// Resolve every result, failing on the first dangling reference.
    pub fn entries(&self) -> Result<Vec<Entry<'_>>, ScoringError> {
        let index = self.index();
        self.results.iter().map(|r| index.resolve(r)).collect()
    }

    /// Check the snapshot can be scored at all.
    pub fn validate(&self) -> Result<(), ScoringError> {
        if !self.races.iter().any(|r| r.series_id == self.series.id) {
            return Err(DegenerateInput::NoRaces {
                series: self.series.id,
            }
            .into());
        }
        self.entries().map(|_| ())
    }

    /// Results grouped by race, in race-id order.
    pub fn results_by_race(&self) -> BTreeMap<RaceId, Vec<&RaceResult>> {
        let mut by_race: BTreeMap<RaceId, Vec<&RaceResult>> = BTreeMap::new();
        for result in &self.results {
            by_race.entry(result.race_id).or_default().push(result);
        }
        by_race
    }

    pub fn apply_corrections(&mut self, corrections: &[Correction]) {
        let by_id: HashMap<ResultId, &Correction> =
            corrections.iter().map(|c| (c.result_id, c)).collect();
        for result in &mut self.results {
            if let Some(correction) = by_id.get(&result.id) {
                result.adjusted_time = Some(correction.adjusted_time);
                result.fleet = Some(correction.fleet.clone());
            }
        }
    }

    /// Replace every position: results missing from `positions` are reset.
    pub fn apply_positions(&mut self, positions: &PositionMap) {
        for result in &mut self.results {
            result.position = positions.get(&result.id).copied();
        }
    }
}

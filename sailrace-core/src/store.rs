//! ResultsStore trait — the boundary with the CRUD layer.
//!
//! The engine reads a whole [`SeriesSnapshot`] before scoring and writes two
//! batches back (corrections, then positions). Implementations decide how a
//! batch is made atomic; the engine never writes single rows.

use std::collections::BTreeMap;
use std::sync::RwLock;

use thiserror::Error;

use crate::domain::{BoatType, Individual, Race, RaceResult, ResultId, Series, SeriesId};
use crate::scoring::Correction;
use crate::snapshot::{PositionMap, SeriesSnapshot};

/// Structured store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(String),

    #[error("store data is corrupt: {0}")]
    Corrupt(String),

    #[error("result {result} does not belong to series {series}")]
    UnknownResult { series: SeriesId, result: ResultId },

    #[error("store lock poisoned")]
    Poisoned,
}

/// Read/write access to persisted series records.
pub trait ResultsStore: Send + Sync {
    /// Human-readable name of this store.
    fn name(&self) -> &str;

    /// All known series ids, ascending.
    fn series_ids(&self) -> Result<Vec<SeriesId>, StoreError>;

    /// Fetch a series with its races, results, individuals and boat types.
    /// Unknown ids return `Ok(None)`.
    fn load_series(&self, id: SeriesId) -> Result<Option<SeriesSnapshot>, StoreError>;

    /// Persist adjusted time and fleet for every corrected result.
    fn write_corrections(
        &self,
        series: SeriesId,
        corrections: &[Correction],
    ) -> Result<(), StoreError>;

    /// Replace the position of every result in the series. Results absent from
    /// `positions` are cleared.
    fn write_positions(&self, series: SeriesId, positions: &PositionMap)
        -> Result<(), StoreError>;
}

/// All five record tables, as the CRUD layer keeps them.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tables {
    #[serde(default)]
    pub series: Vec<Series>,
    #[serde(default)]
    pub races: Vec<Race>,
    #[serde(default)]
    pub results: Vec<RaceResult>,
    #[serde(default)]
    pub individuals: Vec<Individual>,
    #[serde(default)]
    pub boat_types: Vec<BoatType>,
}

impl Tables {
    pub fn series_ids(&self) -> Vec<SeriesId> {
        let mut ids: Vec<SeriesId> = self.series.iter().map(|s| s.id).collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// Join one series out of the tables.
    ///
    /// Individuals and boat types are filtered to those referenced; dangling
    /// references are left dangling so scoring reports them.
    pub fn snapshot(&self, id: SeriesId) -> Option<SeriesSnapshot> {
        let series = self.series.iter().find(|s| s.id == id)?.clone();
        let races: Vec<Race> = self
            .races
            .iter()
            .filter(|r| r.series_id == id)
            .cloned()
            .collect();
        let results: Vec<RaceResult> = self
            .results
            .iter()
            .filter(|r| races.iter().any(|race| race.id == r.race_id))
            .cloned()
            .collect();
        let individuals: Vec<Individual> = self
            .individuals
            .iter()
            .filter(|i| results.iter().any(|r| r.individual_id == i.id))
            .cloned()
            .collect();
        let boat_types: Vec<BoatType> = self
            .boat_types
            .iter()
            .filter(|b| individuals.iter().any(|i| i.boat_type_id == b.id))
            .cloned()
            .collect();
        Some(SeriesSnapshot {
            series,
            races,
            results,
            individuals,
            boat_types,
        })
    }

    /// Apply a correction batch. Validates every id before touching any row.
    pub fn apply_corrections(
        &mut self,
        series: SeriesId,
        corrections: &[Correction],
    ) -> Result<(), StoreError> {
        let rows = self.result_rows(series);
        for correction in corrections {
            if !rows.contains_key(&correction.result_id) {
                return Err(StoreError::UnknownResult {
                    series,
                    result: correction.result_id,
                });
            }
        }
        for correction in corrections {
            let row = rows[&correction.result_id];
            self.results[row].adjusted_time = Some(correction.adjusted_time);
            self.results[row].fleet = Some(correction.fleet.clone());
        }
        Ok(())
    }

    /// Apply a full replacement position map. Validates before writing.
    pub fn apply_positions(
        &mut self,
        series: SeriesId,
        positions: &PositionMap,
    ) -> Result<(), StoreError> {
        let rows = self.result_rows(series);
        if let Some(unknown) = positions.keys().find(|id| !rows.contains_key(id)) {
            return Err(StoreError::UnknownResult {
                series,
                result: *unknown,
            });
        }
        for (id, row) in rows {
            self.results[row].position = positions.get(&id).copied();
        }
        Ok(())
    }

    /// Row index of every result belonging to the series.
    fn result_rows(&self, series: SeriesId) -> BTreeMap<ResultId, usize> {
        let race_ids: Vec<_> = self
            .races
            .iter()
            .filter(|r| r.series_id == series)
            .map(|r| r.id)
            .collect();
        self.results
            .iter()
            .enumerate()
            .filter(|(_, r)| race_ids.contains(&r.race_id))
            .map(|(row, r)| (r.id, row))
            .collect()
    }
}

/// In-memory store over [`Tables`], for tests and for callers that already
/// hold all records.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new(tables: Tables) -> Self {
        Self {
            tables: RwLock::new(tables),
        }
    }

    /// Copy of the current tables.
    pub fn tables(&self) -> Result<Tables, StoreError> {
        self.tables
            .read()
            .map(|t| t.clone())
            .map_err(|_| StoreError::Poisoned)
    }
}

impl ResultsStore for InMemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn series_ids(&self) -> Result<Vec<SeriesId>, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::Poisoned)?;
        Ok(tables.series_ids())
    }

    fn load_series(&self, id: SeriesId) -> Result<Option<SeriesSnapshot>, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::Poisoned)?;
        Ok(tables.snapshot(id))
    }

    fn write_corrections(
        &self,
        series: SeriesId,
        corrections: &[Correction],
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.write().map_err(|_| StoreError::Poisoned)?;
        tables.apply_corrections(series, corrections)
    }

    fn write_positions(
        &self,
        series: SeriesId,
        positions: &PositionMap,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.write().map_err(|_| StoreError::Poisoned)?;
        tables.apply_positions(series, positions)
    }
}

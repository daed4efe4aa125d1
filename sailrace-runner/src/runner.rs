//! Series runner — serializes scoring per series over a shared store.
//!
//! The engine assumes nobody else scores the same series while it runs. The
//! runner enforces that with one lock per series id, held across the whole
//! read → correct → write → rank → write → aggregate cycle. Different series
//! do not contend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use thiserror::Error;
use tracing::{info, warn};

use sailrace_core::domain::SeriesId;
use sailrace_core::{score_series, ResultsStore, ScoringError, Standings, StoreError};

use crate::config::{ConfigError, RunnerConfig};
use crate::json_store::JsonFileStore;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("scoring error: {0}")]
    Scoring(#[from] ScoringError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("series {0} not found")]
    SeriesNotFound(SeriesId),
}

/// Scores series from one store, one at a time per series.
pub struct SeriesRunner {
    store: Arc<dyn ResultsStore>,
    locks: Mutex<HashMap<SeriesId, Arc<Mutex<()>>>>,
}

impl SeriesRunner {
    pub fn new(store: Arc<dyn ResultsStore>) -> Self {
        Self {
            store,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Runner over the JSON store named in the config.
    pub fn from_config(config: &RunnerConfig) -> Result<Self, RunError> {
        config.validate()?;
        let store = JsonFileStore::open(&config.store.path)?;
        Ok(Self::new(Arc::new(store)))
    }

    pub fn store(&self) -> &dyn ResultsStore {
        self.store.as_ref()
    }

    pub fn series_ids(&self) -> Result<Vec<SeriesId>, RunError> {
        Ok(self.store.series_ids()?)
    }

    fn series_lock(&self, id: SeriesId) -> Result<Arc<Mutex<()>>, RunError> {
        let mut locks = self.locks.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(Arc::clone(locks.entry(id).or_default()))
    }

    /// Score one series and write its corrections and positions back.
    pub fn run(&self, id: SeriesId) -> Result<Standings, RunError> {
        let lock = self.series_lock(id)?;
        let _guard = lock.lock().map_err(|_| StoreError::Poisoned)?;

        let started = Instant::now();
        let outcome = score_series(self.store.as_ref(), id);
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(Some(standings)) => {
                info!(
                    series = %id,
                    entries = standings.entries.len(),
                    elapsed_ms,
                    "series run complete"
                );
                Ok(standings)
            }
            Ok(None) => Err(RunError::SeriesNotFound(id)),
            Err(e) => {
                warn!(series = %id, error = %e, "series run failed");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::generate_demo_tables;
    use sailrace_core::InMemoryStore;

    fn runner() -> SeriesRunner {
        let store = InMemoryStore::new(generate_demo_tables(11, 2, 4, 8));
        SeriesRunner::new(Arc::new(store))
    }

    #[test]
    fn runs_known_series() {
        let runner = runner();
        let standings = runner.run(SeriesId(1)).unwrap();
        assert_eq!(standings.series.id, SeriesId(1));
        assert!(!standings.entries.is_empty());
    }

    #[test]
    fn unknown_series_is_not_found() {
        let err = runner().run(SeriesId(77)).unwrap_err();
        assert!(matches!(err, RunError::SeriesNotFound(SeriesId(77))));
    }

    #[test]
    fn same_series_shares_one_lock() {
        let runner = runner();
        let a = runner.series_lock(SeriesId(1)).unwrap();
        let b = runner.series_lock(SeriesId(1)).unwrap();
        let c = runner.series_lock(SeriesId(2)).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
    }

    #[test]
    fn concurrent_runs_of_one_series_agree() {
        let runner = Arc::new(runner());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let runner = Arc::clone(&runner);
                std::thread::spawn(move || runner.run(SeriesId(2)).unwrap())
            })
            .collect();
        let results: Vec<Standings> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.windows(2).all(|w| w[0] == w[1]));
    }
}

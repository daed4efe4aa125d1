//! Batch scoring of many series, optionally in parallel.
//!
//! Series share no mutable state inside the engine, so they fan out over the
//! rayon pool. Each series succeeds or fails on its own; one bad series does
//! not stop the rest.

use rayon::prelude::*;
use tracing::info;

use sailrace_core::domain::SeriesId;
use sailrace_core::Standings;

use crate::runner::{RunError, SeriesRunner};

/// Batch executor over a [`SeriesRunner`].
pub struct BatchScorer<'a> {
    runner: &'a SeriesRunner,
    parallel: bool,
}

impl<'a> BatchScorer<'a> {
    pub fn new(runner: &'a SeriesRunner) -> Self {
        Self {
            runner,
            parallel: true,
        }
    }

    /// Enables or disables parallel execution.
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Score every listed series. Outcomes come back in input order.
    pub fn score_many(&self, ids: &[SeriesId]) -> BatchResults {
        let outcomes: Vec<(SeriesId, Result<Standings, RunError>)> = if self.parallel {
            ids.par_iter().map(|&id| (id, self.runner.run(id))).collect()
        } else {
            ids.iter().map(|&id| (id, self.runner.run(id))).collect()
        };

        let results = BatchResults { outcomes };
        info!(
            requested = ids.len(),
            scored = results.scored().count(),
            failed = results.failures().count(),
            parallel = self.parallel,
            "batch scoring complete"
        );
        results
    }

    /// Score every series the store knows about.
    pub fn score_all(&self) -> Result<BatchResults, RunError> {
        let ids = self.runner.series_ids()?;
        Ok(self.score_many(&ids))
    }
}

/// Per-series outcomes of a batch, in request order.
#[derive(Debug)]
pub struct BatchResults {
    outcomes: Vec<(SeriesId, Result<Standings, RunError>)>,
}

impl BatchResults {
    pub fn outcomes(&self) -> &[(SeriesId, Result<Standings, RunError>)] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn scored(&self) -> impl Iterator<Item = &Standings> {
        self.outcomes.iter().filter_map(|(_, r)| r.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (SeriesId, &RunError)> {
        self.outcomes
            .iter()
            .filter_map(|(id, r)| r.as_ref().err().map(|e| (*id, e)))
    }
}

//! Scoring error taxonomy.
//!
//! Every stage either completes for the whole series or returns one of these.
//! Unknown series ids are not errors: the pipeline returns `Ok(None)`.

use std::fmt;

use thiserror::Error;

use crate::domain::{RaceId, ResultId, SeriesId};
use crate::store::StoreError;

/// Which kind of record a dangling reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Race,
    Individual,
    BoatType,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Race => "race",
            Self::Individual => "individual",
            Self::BoatType => "boat type",
        };
        f.write_str(name)
    }
}

/// Inputs that would make the arithmetic undefined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DegenerateInput {
    #[error("series {series} has no races")]
    NoRaces { series: SeriesId },

    #[error("fleet '{fleet}' has a minimum performance number of zero")]
    ZeroFleetRating { fleet: String },

    #[error("result {result} has no lap count")]
    MissingLapCount { result: ResultId },

    #[error("race {race} has no whole-leg count")]
    MissingCourseLegs { race: RaceId },

    #[error("result {result} sailed a course of zero legs")]
    ZeroCourseLength { result: ResultId },

    #[error("no competitor in race {race} completed a lap")]
    ZeroMaxLaps { race: RaceId },

    #[error("adjusted time for result {result} is not representable")]
    AdjustedTimeOverflow { result: ResultId },

    #[error("result {result} has no adjusted time; run the corrector first")]
    Uncorrected { result: ResultId },

    #[error("result {result} has no position; run the ranker first")]
    Unranked { result: ResultId },
}

/// Errors from a scoring run.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("result {result} references unknown {kind} {id}")]
    MissingReference {
        kind: ReferenceKind,
        id: u32,
        result: ResultId,
    },

    #[error("degenerate input: {0}")]
    DegenerateInput(#[from] DegenerateInput),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl ScoringError {
    pub fn missing(kind: ReferenceKind, id: impl Into<u32>, result: ResultId) -> Self {
        Self::MissingReference {
            kind,
            id: id.into(),
            result,
        }
    }
}

//! Scoring stages: corrector → ranker → aggregator.
//!
//! Each stage reads a [`SeriesSnapshot`](crate::snapshot::SeriesSnapshot) and
//! returns its complete output; applying that output is a separate step, so a
//! stage never observes its own half-written results.

pub mod aggregator;
pub mod corrector;
pub mod ranker;

pub use aggregator::{aggregate, compare_standings, rank_standings, score_standing};
pub use corrector::{correct_series, fleet_baselines, max_laps_by_race, Correction};
pub use ranker::{dnf_position, rank_race, rank_series, DNF_POSITION_FLOOR};

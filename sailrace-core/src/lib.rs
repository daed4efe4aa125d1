//! Sailrace Core — domain types and the series scoring engine.
//!
//! This crate contains the scoring engine for club sail-racing series:
//! - Domain types (series, races, boat types, individuals, results, standings)
//! - `H:MM:SS` race-time codec with the did-not-finish sentinel
//! - Handicap time corrector (fleet baseline + lap normalization)
//! - Race position ranker (shared ranks, DNF floor)
//! - Series aggregator (boat merging, discards, tie-break key, qualification)
//! - `ResultsStore` boundary trait and an in-memory store
//!
//! The engine does no I/O of its own: it scores a [`snapshot::SeriesSnapshot`]
//! and hands complete output batches back to the store.

pub mod domain;
pub mod error;
pub mod fingerprint;
pub mod pipeline;
pub mod scoring;
pub mod snapshot;
pub mod store;

pub use error::{DegenerateInput, ReferenceKind, ScoringError};
pub use fingerprint::{fingerprint, Fingerprint};
pub use pipeline::{score_series, score_snapshot, Standings};
pub use snapshot::{PositionMap, SeriesSnapshot};
pub use store::{InMemoryStore, ResultsStore, StoreError, Tables};

//! Sailrace Runner — scoring orchestration around `sailrace-core`.
//!
//! This crate builds on `sailrace-core` to provide:
//! - TOML runner configuration (`sailrace.toml`)
//! - A JSON file `ResultsStore` with atomic writes
//! - A series runner that serializes scoring per series
//! - Parallel batch scoring of many series
//! - Standings export to JSON, CSV and Markdown
//! - Seeded synthetic club data for demos and tests

pub mod batch;
pub mod config;
pub mod export;
pub mod json_store;
pub mod runner;
pub mod synthetic;

pub use batch::{BatchResults, BatchScorer};
pub use config::{ConfigError, ExportFormat, RunnerConfig, DEFAULT_CONFIG_FILE};
pub use export::{
    export_csv, export_json, generate_report, import_json, load_standings, render,
    save_standings, StandingsReport, SCHEMA_VERSION,
};
pub use json_store::JsonFileStore;
pub use runner::{RunError, SeriesRunner};
pub use synthetic::{generate_demo_snapshot, generate_demo_tables};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn runner_is_send_sync() {
        assert_send::<SeriesRunner>();
        assert_sync::<SeriesRunner>();
    }

    #[test]
    fn json_store_is_send_sync() {
        assert_send::<JsonFileStore>();
        assert_sync::<JsonFileStore>();
    }

    #[test]
    fn run_error_is_send_sync() {
        assert_send::<RunError>();
        assert_sync::<RunError>();
    }

    #[test]
    fn config_types_are_send_sync() {
        assert_send::<RunnerConfig>();
        assert_sync::<RunnerConfig>();
        assert_send::<ExportFormat>();
        assert_sync::<ExportFormat>();
    }

    #[test]
    fn batch_results_are_send_sync() {
        assert_send::<BatchResults>();
        assert_sync::<BatchResults>();
        assert_send::<StandingsReport>();
        assert_sync::<StandingsReport>();
    }
}

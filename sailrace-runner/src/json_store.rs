//! JSON file store — all five record tables in one JSON document.
//!
//! Every call reads the file fresh. Writes are read-modify-write under a
//! process-local mutex and land atomically (write to `.tmp`, rename into
//! place), so a failed write leaves the previous document intact.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::debug;

use sailrace_core::domain::SeriesId;
use sailrace_core::scoring::Correction;
use sailrace_core::{PositionMap, ResultsStore, SeriesSnapshot, StoreError, Tables};

/// Current schema version of the store document.
pub const STORE_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default = "default_schema_version")]
    schema_version: u32,
    #[serde(flatten)]
    tables: Tables,
}

fn default_schema_version() -> u32 {
    STORE_SCHEMA_VERSION
}

/// [`ResultsStore`] backed by a single JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open an existing store file.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if !path.exists() {
            return Err(StoreError::Io(format!(
                "store file not found: {}",
                path.display()
            )));
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Create (or overwrite) a store file holding `tables`.
    pub fn create(path: impl Into<PathBuf>, tables: &Tables) -> Result<Self, StoreError> {
        let store = Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        };
        if let Some(parent) = store.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::Io(format!("failed to create dir: {e}")))?;
        }
        store.persist(tables)?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every table from disk.
    pub fn read_tables(&self) -> Result<Tables, StoreError> {
        let text = fs::read_to_string(&self.path).map_err(|e| {
            StoreError::Io(format!("failed to read {}: {e}", self.path.display()))
        })?;
        let document: StoreDocument = serde_json::from_str(&text)
            .map_err(|e| StoreError::Corrupt(format!("{}: {e}", self.path.display())))?;
        if document.schema_version > STORE_SCHEMA_VERSION {
            return Err(StoreError::Corrupt(format!(
                "unsupported store schema version {} (max supported: {})",
                document.schema_version, STORE_SCHEMA_VERSION
            )));
        }
        Ok(document.tables)
    }

    fn persist(&self, tables: &Tables) -> Result<(), StoreError> {
        #[derive(Serialize)]
        struct Borrowed<'a> {
            schema_version: u32,
            #[serde(flatten)]
            tables: &'a Tables,
        }

        let json = serde_json::to_string_pretty(&Borrowed {
            schema_version: STORE_SCHEMA_VERSION,
            tables,
        })
        .map_err(|e| StoreError::Corrupt(format!("serialize store: {e}")))?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|e| io_error("write temp file", &tmp_path, e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            io_error("atomic rename", &self.path, e)
        })?;
        debug!(path = %self.path.display(), "store file written");
        Ok(())
    }

    /// Read, modify and atomically rewrite the document.
    fn update<F>(&self, apply: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Tables) -> Result<(), StoreError>,
    {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut tables = self.read_tables()?;
        apply(&mut tables)?;
        self.persist(&tables)
    }
}

fn io_error(action: &str, path: &Path, e: io::Error) -> StoreError {
    StoreError::Io(format!("{action} failed for {}: {e}", path.display()))
}

impl ResultsStore for JsonFileStore {
    fn name(&self) -> &str {
        "json"
    }

    fn series_ids(&self) -> Result<Vec<SeriesId>, StoreError> {
        Ok(self.read_tables()?.series_ids())
    }

    fn load_series(&self, id: SeriesId) -> Result<Option<SeriesSnapshot>, StoreError> {
        Ok(self.read_tables()?.snapshot(id))
    }

    fn write_corrections(
        &self,
        series: SeriesId,
        corrections: &[Correction],
    ) -> Result<(), StoreError> {
        self.update(|tables| tables.apply_corrections(series, corrections))
    }

    fn write_positions(
        &self,
        series: SeriesId,
        positions: &PositionMap,
    ) -> Result<(), StoreError> {
        self.update(|tables| tables.apply_positions(series, positions))
    }
}

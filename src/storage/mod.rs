//! Local persistence of the calendar.
//!
//! The whole calendar is one JSON document, `{ "workData": {...},
//! "settings": {...} }`, the same shape the browser keeps under its
//! storage key, so an existing browser export can be dropped in as the
//! snapshot file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;
use tracing::{debug, info};

use crate::error::{CalendarError, CalendarResult};
use crate::models::{Settings, WorkEntry, WorkStore};

/// Everything the application persists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Entries keyed by date.
    #[serde(default)]
    pub work_data: WorkStore,
    /// User defaults.
    #[serde(default)]
    pub settings: Settings,
}

impl Snapshot {
    /// An empty calendar with the given settings.
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            work_data: WorkStore::new(),
            settings,
        }
    }

    /// The entries alone, as the document a download would contain.
    pub fn export_work_data(&self) -> CalendarResult<Value> {
        serde_json::to_value(&self.work_data).map_err(|e| CalendarError::StorageError {
            path: "workData".to_string(),
            message: e.to_string(),
        })
    }

    /// Replaces every entry with the contents of an exported document.
    ///
    /// The document must be a JSON object keyed by date. Keys that are not
    /// dates are dropped; entry fields are coerced leniently. Settings are
    /// left alone. Returns the number of entries now stored.
    ///
    /// # Example
    ///
    /// ```
    /// use gongsu_calendar::storage::Snapshot;
    /// use serde_json::json;
    ///
    /// let mut snapshot = Snapshot::default();
    /// let count = snapshot
    ///     .import_work_data(json!({"2024-03-01": {"workDays": 1, "rate": 150000}}))
    ///     .unwrap();
    /// assert_eq!(count, 1);
    /// assert!(snapshot.import_work_data(json!([1, 2, 3])).is_err());
    /// ```
    pub fn import_work_data(&mut self, document: Value) -> CalendarResult<usize> {
        let Value::Object(map) = document else {
            return Err(CalendarError::ImportError {
                message: "expected a JSON object keyed by YYYY-MM-DD".to_string(),
            });
        };

        let mut raw = Vec::with_capacity(map.len());
        for (key, value) in map {
            let entry: WorkEntry =
                serde_json::from_value(value).map_err(|e| CalendarError::ImportError {
                    message: format!("entry '{key}': {e}"),
                })?;
            raw.push((key, entry));
        }

        self.work_data = WorkStore::from_keyed(raw);
        Ok(self.work_data.len())
    }

    /// Removes every entry and restores `defaults` as the settings.
    pub fn clear(&mut self, defaults: Settings) {
        self.work_data.clear();
        self.settings = defaults;
    }
}

/// A snapshot stored as a JSON file.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    /// Points at `path`; nothing is read until [`SnapshotFile::load`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the snapshot, or returns an empty one with `defaults` when the
    /// file does not exist yet.
    pub async fn load(&self, defaults: &Settings) -> CalendarResult<Snapshot> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No snapshot yet, starting empty");
                return Ok(Snapshot::with_settings(defaults.clone()));
            }
            Err(e) => return Err(self.storage_error(e)),
        };

        let snapshot: Snapshot = serde_json::from_str(&content).map_err(|e| self.storage_error(e))?;
        info!(
            path = %self.path.display(),
            entries = snapshot.work_data.len(),
            "Loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Writes the snapshot to a sibling temp file, then renames it over the
    /// target.
    pub async fn save(&self, snapshot: &Snapshot) -> CalendarResult<()> {
        let body = serde_json::to_vec(snapshot).map_err(|e| self.storage_error(e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| self.storage_error(e))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &body).await.map_err(|e| self.storage_error(e))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.storage_error(e))?;

        debug!(
            path = %self.path.display(),
            bytes = body.len(),
            entries = snapshot.work_data.len(),
            "Saved snapshot"
        );
        Ok(())
    }

    fn storage_error(&self, error: impl std::fmt::Display) -> CalendarError {
        CalendarError::StorageError {
            path: self.path.display().to_string(),
            message: error.to_string(),
        }
    }
}

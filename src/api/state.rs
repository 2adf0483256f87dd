//! Application state for the calendar API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::CalendarResult;
use crate::models::{Settings, WorkEntry};
use crate::storage::{Snapshot, SnapshotFile};
use crate::sync::{RemoteMirror, RestMirror};

/// A mirror together with the identity its rows are written under.
#[derive(Clone)]
pub struct MirrorHandle {
    mirror: Arc<dyn RemoteMirror>,
    user_id: String,
}

impl MirrorHandle {
    /// Wraps `mirror` for `user_id`.
    pub fn new(mirror: Arc<dyn RemoteMirror>, user_id: impl Into<String>) -> Self {
        Self {
            mirror,
            user_id: user_id.into(),
        }
    }

    /// The underlying mirror.
    pub fn mirror(&self) -> &dyn RemoteMirror {
        self.mirror.as_ref()
    }

    /// The identity rows are stored under.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Mirrors an entry write in the background.
    pub fn spawn_upsert(&self, date: NaiveDate, entry: WorkEntry) {
        let mirror = Arc::clone(&self.mirror);
        let user_id = self.user_id.clone();
        tokio::spawn(async move {
            if let Err(e) = mirror.upsert_entry(&user_id, date, &entry).await {
                warn!(date = %date, error = %e, "Remote mirror upsert failed");
            }
        });
    }

    /// Mirrors an entry removal in the background.
    pub fn spawn_delete(&self, date: NaiveDate) {
        let mirror = Arc::clone(&self.mirror);
        let user_id = self.user_id.clone();
        tokio::spawn(async move {
            if let Err(e) = mirror.delete_entry(&user_id, date).await {
                warn!(date = %date, error = %e, "Remote mirror delete failed");
            }
        });
    }

    /// Mirrors a settings save in the background.
    pub fn spawn_settings(&self, settings: Settings) {
        let mirror = Arc::clone(&self.mirror);
        let user_id = self.user_id.clone();
        tokio::spawn(async move {
            if let Err(e) = mirror.upsert_settings(&user_id, &settings).await {
                warn!(error = %e, "Remote mirror settings save failed");
            }
        });
    }
}

struct Inner {
    calendar: RwLock<Snapshot>,
    snapshot_file: SnapshotFile,
    defaults: Settings,
    monthly_target_days: Decimal,
    mirror: Option<MirrorHandle>,
}

/// Shared application state.
///
/// Holds the in-memory calendar behind a lock, the file it is persisted to,
/// and the optional remote mirror.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

impl AppState {
    /// Loads the snapshot named by `config` and connects the remote mirror
    /// when one is configured.
    pub async fn open(config: &AppConfig) -> CalendarResult<Self> {
        let snapshot_file = SnapshotFile::new(config.storage.path.clone());
        let snapshot = snapshot_file.load(&config.defaults).await?;

        let mirror = match &config.remote {
            Some(remote) => {
                info!(url = %remote.url, "Remote mirror enabled");
                let rest: Arc<dyn RemoteMirror> = Arc::new(RestMirror::new(remote)?);
                Some(MirrorHandle::new(rest, remote.user_id.clone()))
            }
            None => None,
        };

        Ok(Self::new(snapshot, snapshot_file, config, mirror))
    }

    /// Builds state from an already loaded snapshot.
    pub fn new(
        snapshot: Snapshot,
        snapshot_file: SnapshotFile,
        config: &AppConfig,
        mirror: Option<MirrorHandle>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                calendar: RwLock::new(snapshot),
                snapshot_file,
                defaults: config.defaults.clone(),
                monthly_target_days: config.statistics.monthly_target_days,
                mirror,
            }),
        }
    }

    /// Locks the calendar for reading.
    pub async fn read(&self) -> RwLockReadGuard<'_, Snapshot> {
        self.inner.calendar.read().await
    }

    /// Locks the calendar for writing. Hold the guard until
    /// [`AppState::commit`] returns so saves land in order.
    pub async fn write(&self) -> RwLockWriteGuard<'_, Snapshot> {
        self.inner.calendar.write().await
    }

    /// Writes `updated` to the snapshot file, then installs it as `current`.
    ///
    /// On failure `current` is left exactly as it was.
    pub async fn commit(&self, current: &mut Snapshot, updated: Snapshot) -> CalendarResult<()> {
        self.inner.snapshot_file.save(&updated).await?;
        *current = updated;
        Ok(())
    }

    /// Settings restored by a clear.
    pub fn defaults(&self) -> &Settings {
        &self.inner.defaults
    }

    /// Labor-day target for the monthly insight.
    pub fn monthly_target_days(&self) -> Decimal {
        self.inner.monthly_target_days
    }

    /// The remote mirror, if configured.
    pub fn mirror(&self) -> Option<&MirrorHandle> {
        self.inner.mirror.as_ref()
    }
}

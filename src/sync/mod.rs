//! Mirroring the calendar to a remote store.
//!
//! The local snapshot is always authoritative for reads. Every write is
//! repeated against a [`RemoteMirror`] in the background, and a pull merges
//! remote rows back in per date with [`merge_remote`].
//!
//! Remote rows carry no pay amount; converting a row back into an entry
//! recomputes it with the current pay rule.

mod memory;
mod rest;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculation::compute_pay;
use crate::error::CalendarResult;
use crate::models::{
    Settings, WorkEntry, WorkStore, decimal_number, hours_number, lenient_text,
};
use crate::storage::Snapshot;

pub use memory::InMemoryMirror;
pub use rest::RestMirror;

/// One row of the remote `work_records` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkRecordRow {
    /// Owner of the row.
    pub user_id: String,
    /// Date the labor was done.
    pub work_date: NaiveDate,
    /// Labor-days credited.
    #[serde(default, with = "decimal_number")]
    pub work_days: Decimal,
    /// Hours worked.
    #[serde(default, with = "hours_number")]
    pub work_hours: u32,
    /// Daily rate in effect.
    #[serde(default, with = "decimal_number")]
    pub daily_rate: Decimal,
    /// Free-text annotation.
    #[serde(default, deserialize_with = "lenient_text")]
    pub memo: String,
    /// Last write time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl WorkRecordRow {
    /// Builds the row mirroring `entry` at `date`.
    pub fn from_entry(user_id: &str, date: NaiveDate, entry: &WorkEntry) -> Self {
        Self {
            user_id: user_id.to_string(),
            work_date: date,
            work_days: entry.work_days,
            work_hours: entry.work_hours,
            daily_rate: entry.rate,
            memo: entry.memo.clone(),
            updated_at: entry.updated_at,
        }
    }

    /// Converts the row back into a dated entry with a freshly computed
    /// amount.
    pub fn into_entry(self) -> (NaiveDate, WorkEntry) {
        let entry = WorkEntry {
            work_days: self.work_days,
            work_hours: self.work_hours,
            rate: self.daily_rate,
            total_amount: Some(compute_pay(self.work_days, self.daily_rate)),
            memo: self.memo,
            updated_at: self.updated_at,
        };
        (self.work_date, entry)
    }
}

/// One row of the remote `user_settings` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettingsRow {
    /// Owner of the row.
    pub user_id: String,
    /// Daily rate.
    #[serde(with = "decimal_number")]
    pub default_daily_rate: Decimal,
    /// Hourly rate.
    #[serde(with = "decimal_number")]
    pub default_hourly_rate: Decimal,
    /// Labor-days preselected for new entries.
    #[serde(with = "decimal_number")]
    pub default_work_days: Decimal,
}

impl UserSettingsRow {
    /// Builds the row mirroring `settings`.
    pub fn from_settings(user_id: &str, settings: &Settings) -> Self {
        Self {
            user_id: user_id.to_string(),
            default_daily_rate: settings.default_daily_rate,
            default_hourly_rate: settings.default_hourly_rate,
            default_work_days: settings.default_work_days,
        }
    }
}

/// A remote copy of one user's calendar.
///
/// Implementations must be safe to call from spawned tasks.
#[async_trait]
pub trait RemoteMirror: Send + Sync {
    /// Inserts or replaces the entry at `date`.
    async fn upsert_entry(
        &self,
        user_id: &str,
        date: NaiveDate,
        entry: &WorkEntry,
    ) -> CalendarResult<()>;

    /// Removes the entry at `date`; removing a missing entry succeeds.
    async fn delete_entry(&self, user_id: &str, date: NaiveDate) -> CalendarResult<()>;

    /// Returns every entry dated within `from..=to`.
    async fn load_range(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> CalendarResult<WorkStore>;

    /// Inserts or replaces the user's settings.
    async fn upsert_settings(&self, user_id: &str, settings: &Settings) -> CalendarResult<()>;
}

/// Outcome of merging remote entries into the local store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    /// Dates that existed only remotely.
    pub added: usize,
    /// Local entries replaced by a newer remote one.
    pub replaced: usize,
    /// Dates where the local entry was kept.
    pub kept_local: usize,
}

/// Outcome of uploading the whole snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushReport {
    /// Writes that succeeded, settings included.
    pub succeeded: usize,
    /// Writes that failed.
    pub failed: usize,
}

/// Returns true when `remote` should replace `local` for the same date.
///
/// The newer `updated_at` wins and a timestamped entry beats one without.
/// Ties, and two entries without timestamps, keep the local entry.
pub fn remote_wins(local: &WorkEntry, remote: &WorkEntry) -> bool {
    match (local.updated_at, remote.updated_at) {
        (Some(l), Some(r)) => r > l,
        (None, Some(_)) => true,
        (Some(_), None) | (None, None) => false,
    }
}

/// Folds `remote` into `local` date by date.
///
/// # Example
///
/// ```
/// use gongsu_calendar::models::{WorkEntry, WorkStore};
/// use gongsu_calendar::sync::merge_remote;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let entry = WorkEntry {
///     work_days: Decimal::ONE,
///     work_hours: 8,
///     rate: Decimal::from(150000),
///     total_amount: Some(Decimal::from(150000)),
///     memo: String::new(),
///     updated_at: None,
/// };
/// let mut local = WorkStore::new();
/// let remote: WorkStore = [(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), entry)]
///     .into_iter()
///     .collect();
///
/// let report = merge_remote(&mut local, remote);
/// assert_eq!(report.added, 1);
/// assert_eq!(local.len(), 1);
/// ```
pub fn merge_remote(local: &mut WorkStore, remote: WorkStore) -> MergeReport {
    let mut report = MergeReport::default();

    for (date, remote_entry) in remote {
        match local.get(&date) {
            None => {
                local.insert(date, remote_entry);
                report.added += 1;
            }
            Some(local_entry) if remote_wins(local_entry, &remote_entry) => {
                local.insert(date, remote_entry);
                report.replaced += 1;
            }
            Some(_) => report.kept_local += 1,
        }
    }

    info!(
        added = report.added,
        replaced = report.replaced,
        kept_local = report.kept_local,
        "Merged remote entries"
    );
    report
}

/// Uploads the settings and every entry, counting failures instead of
/// stopping at the first one.
pub async fn push_all(
    mirror: &dyn RemoteMirror,
    user_id: &str,
    snapshot: &Snapshot,
) -> PushReport {
    let mut report = PushReport::default();

    match mirror.upsert_settings(user_id, &snapshot.settings).await {
        Ok(()) => report.succeeded += 1,
        Err(e) => {
            warn!(error = %e, "Failed to push settings");
            report.failed += 1;
        }
    }

    for (date, entry) in &snapshot.work_data {
        match mirror.upsert_entry(user_id, *date, entry).await {
            Ok(()) => report.succeeded += 1,
            Err(e) => {
                warn!(date = %date, error = %e, "Failed to push entry");
                report.failed += 1;
            }
        }
    }

    info!(
        succeeded = report.succeeded,
        failed = report.failed,
        "Pushed snapshot to remote"
    );
    report
}

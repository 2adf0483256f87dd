//! An in-process mirror for tests and offline runs.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;

use crate::error::{CalendarError, CalendarResult};
use crate::models::{Settings, WorkEntry, WorkStore};

use super::{RemoteMirror, UserSettingsRow, WorkRecordRow};

/// Keeps rows in memory, stored exactly as a remote table would hold them.
#[derive(Debug, Default)]
pub struct InMemoryMirror {
    records: Mutex<BTreeMap<(String, NaiveDate), WorkRecordRow>>,
    settings: Mutex<HashMap<String, UserSettingsRow>>,
    failing: AtomicBool,
}

impl InMemoryMirror {
    /// Creates an empty mirror.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of records held for `user_id`.
    pub async fn record_count(&self, user_id: &str) -> usize {
        self.records
            .lock()
            .await
            .keys()
            .filter(|(user, _)| user == user_id)
            .count()
    }

    /// The settings stored for `user_id`, if any.
    pub async fn settings_for(&self, user_id: &str) -> Option<Settings> {
        self.settings.lock().await.get(user_id).map(|row| Settings {
            default_daily_rate: row.default_daily_rate,
            default_hourly_rate: row.default_hourly_rate,
            default_work_days: row.default_work_days,
        })
    }

    fn check(&self) -> CalendarResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CalendarError::RemoteError {
                message: "in-memory mirror set to fail".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteMirror for InMemoryMirror {
    async fn upsert_entry(
        &self,
        user_id: &str,
        date: NaiveDate,
        entry: &WorkEntry,
    ) -> CalendarResult<()> {
        self.check()?;
        let row = WorkRecordRow::from_entry(user_id, date, entry);
        self.records
            .lock()
            .await
            .insert((user_id.to_string(), date), row);
        Ok(())
    }

    async fn delete_entry(&self, user_id: &str, date: NaiveDate) -> CalendarResult<()> {
        self.check()?;
        self.records
            .lock()
            .await
            .remove(&(user_id.to_string(), date));
        Ok(())
    }

    async fn load_range(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> CalendarResult<WorkStore> {
        self.check()?;
        let records = self.records.lock().await;
        Ok(records
            .values()
            .filter(|row| row.user_id == user_id && row.work_date >= from && row.work_date <= to)
            .cloned()
            .map(WorkRecordRow::into_entry)
            .collect())
    }

    async fn upsert_settings(&self, user_id: &str, settings: &Settings) -> CalendarResult<()> {
        self.check()?;
        self.settings.lock().await.insert(
            user_id.to_string(),
            UserSettingsRow::from_settings(user_id, settings),
        );
        Ok(())
    }
}

//! A PostgREST-style HTTP mirror (e.g. a Supabase project).

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use tracing::debug;

use crate::config::RemoteConfig;
use crate::error::{CalendarError, CalendarResult};
use crate::models::{Settings, WorkEntry, WorkStore, format_date_key};

use super::{RemoteMirror, UserSettingsRow, WorkRecordRow};

const WORK_RECORDS: &str = "work_records";
const USER_SETTINGS: &str = "user_settings";

/// Talks to the `work_records` and `user_settings` tables over REST.
#[derive(Debug, Clone)]
pub struct RestMirror {
    client: Client,
    base_url: String,
}

impl RestMirror {
    /// Builds a client that sends the API key on every request.
    pub fn new(config: &RemoteConfig) -> CalendarResult<Self> {
        let client = make_client(&config.api_key)?;
        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    async fn check(response: Response) -> CalendarResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(CalendarError::RemoteError {
            message: format!("HTTP {}: {}", status, body),
        })
    }
}

fn make_client(api_key: &str) -> CalendarResult<Client> {
    let header = |value: String| {
        HeaderValue::from_str(&value).map_err(|e| CalendarError::RemoteError {
            message: format!("invalid API key header: {}", e),
        })
    };

    let mut default_headers = HeaderMap::new();
    default_headers.insert("apikey", header(api_key.to_string())?);
    default_headers.insert(AUTHORIZATION, header(format!("Bearer {}", api_key))?);

    Ok(Client::builder()
        .user_agent(concat!("gongsu-calendar/", env!("CARGO_PKG_VERSION")))
        .default_headers(default_headers)
        .build()?)
}

fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{}", value)
}

#[async_trait]
impl RemoteMirror for RestMirror {
    async fn upsert_entry(
        &self,
        user_id: &str,
        date: NaiveDate,
        entry: &WorkEntry,
    ) -> CalendarResult<()> {
        let row = WorkRecordRow::from_entry(user_id, date, entry);
        let response = self
            .client
            .post(self.table_url(WORK_RECORDS))
            .query(&[("on_conflict", "user_id,work_date")])
            .header("Prefer", "resolution=merge-duplicates")
            .json(&row)
            .send()
            .await?;
        Self::check(response).await?;
        debug!(date = %date, "Mirrored entry");
        Ok(())
    }

    async fn delete_entry(&self, user_id: &str, date: NaiveDate) -> CalendarResult<()> {
        let response = self
            .client
            .delete(self.table_url(WORK_RECORDS))
            .query(&[
                ("user_id", eq(user_id)),
                ("work_date", eq(format_date_key(date))),
            ])
            .send()
            .await?;
        Self::check(response).await?;
        debug!(date = %date, "Deleted mirrored entry");
        Ok(())
    }

    async fn load_range(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> CalendarResult<WorkStore> {
        let response = self
            .client
            .get(self.table_url(WORK_RECORDS))
            .query(&[
                ("select", "*".to_string()),
                ("user_id", eq(user_id)),
                ("work_date", format!("gte.{}", format_date_key(from))),
                ("work_date", format!("lte.{}", format_date_key(to))),
                ("order", "work_date.asc".to_string()),
            ])
            .send()
            .await?;
        let rows: Vec<WorkRecordRow> = Self::check(response).await?.json().await?;
        debug!(rows = rows.len(), "Loaded mirrored entries");
        Ok(rows.into_iter().map(WorkRecordRow::into_entry).collect())
    }

    async fn upsert_settings(&self, user_id: &str, settings: &Settings) -> CalendarResult<()> {
        let row = UserSettingsRow::from_settings(user_id, settings);
        let response = self
            .client
            .post(self.table_url(USER_SETTINGS))
            .query(&[("on_conflict", "user_id")])
            .header("Prefer", "resolution=merge-duplicates")
            .json(&row)
            .send()
            .await?;
        Self::check(response).await?;
        debug!("Mirrored settings");
        Ok(())
    }
}

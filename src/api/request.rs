//! Request types for the calendar API.
//!
//! Entry saves use [`EntryInput`](crate::calculation::EntryInput) directly;
//! the types here cover the remaining endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::ReapplyScope;
use crate::models::{SettingsUpdate, decimal_number, optional_decimal_number};

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    /// Labor-days to price.
    #[serde(with = "decimal_number")]
    pub work_days: Decimal,
    /// Daily rate; the saved default when absent or zero.
    #[serde(default, with = "optional_decimal_number")]
    pub rate: Option<Decimal>,
}

/// Request body for `PUT /settings`.
///
/// ```json
/// { "defaultDailyRate": 200000, "reapply": { "scope": "month", "month": "2024-03" } }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSettingsRequest {
    /// Fields to change.
    #[serde(flatten)]
    pub update: SettingsUpdate,
    /// Existing entries to rewrite with the new daily rate.
    #[serde(default)]
    pub reapply: Option<ReapplyScope>,
}

/// Query string for `GET /entries`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntriesQuery {
    /// Calendar year; must come with `month`.
    pub year: Option<i32>,
    /// Month 1-12; must come with `year`.
    pub month: Option<u32>,
}

/// Query string for `POST /sync/pull`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullQuery {
    /// First date to pull (inclusive).
    pub from: Option<NaiveDate>,
    /// Last date to pull (inclusive).
    pub to: Option<NaiveDate>,
}

impl PullQuery {
    /// The requested range, open ends widened to the whole calendar.
    pub fn range(&self) -> (NaiveDate, NaiveDate) {
        let from = self
            .from
            .or_else(|| NaiveDate::from_ymd_opt(1970, 1, 1))
            .unwrap_or(NaiveDate::MIN);
        let to = self
            .to
            .or_else(|| NaiveDate::from_ymd_opt(9999, 12, 31))
            .unwrap_or(NaiveDate::MAX);
        (from, to)
    }
}

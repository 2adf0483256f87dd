//! Response types for the calendar API.
//!
//! This module defines the response bodies, the error response structure
//! and the mapping from [`CalendarError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{DayPayResult, PayTier, ReapplyReport, format_won};
use crate::error::CalendarError;
use crate::models::{
    AuditStep, MonthInsight, MonthSummary, Settings, WorkEntry, YearMonth, decimal_number,
};

/// One entry together with its resolved pay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryView {
    /// The entry's date.
    pub date: NaiveDate,
    /// The stored entry.
    #[serde(flatten)]
    pub entry: WorkEntry,
    /// Stored amount, or the legacy fallback.
    #[serde(with = "decimal_number")]
    pub pay_amount: Decimal,
    /// True when `pay_amount` is the legacy fallback.
    pub legacy: bool,
}

impl EntryView {
    /// Wraps `entry` dated `date`.
    pub fn new(date: NaiveDate, entry: WorkEntry) -> Self {
        let pay_amount = entry.pay_amount();
        let legacy = entry.is_legacy();
        Self {
            date,
            entry,
            pay_amount,
            legacy,
        }
    }
}

/// Response body for `POST /calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    /// Labor-days priced.
    #[serde(with = "decimal_number")]
    pub work_days: Decimal,
    /// Daily rate used.
    #[serde(with = "decimal_number")]
    pub rate: Decimal,
    /// Total pay.
    #[serde(with = "decimal_number")]
    pub amount: Decimal,
    /// `amount` formatted as won, e.g. `262,500원`.
    pub formatted: String,
    /// Which branch of the rule applied.
    pub tier: PayTier,
    /// Pay for the first labor-day (or the proportional amount).
    #[serde(with = "decimal_number")]
    pub base_amount: Decimal,
    /// Premium pay beyond one labor-day.
    #[serde(with = "decimal_number")]
    pub overtime_amount: Decimal,
    /// How the amount was reached.
    pub audit_step: AuditStep,
}

impl CalculateResponse {
    /// Builds the response from a day pay result.
    pub fn new(work_days: Decimal, rate: Decimal, result: DayPayResult) -> Self {
        Self {
            work_days,
            rate,
            amount: result.amount,
            formatted: format_won(result.amount),
            tier: result.tier,
            base_amount: result.base_amount,
            overtime_amount: result.overtime_amount,
            audit_step: result.audit_step,
        }
    }
}

/// Response body for `GET /summary/{year}/{month}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummaryResponse {
    /// The month summarized.
    pub month: YearMonth,
    /// Totals.
    #[serde(flatten)]
    pub summary: MonthSummary,
    /// Labor-days with one decimal, as displayed.
    pub work_days_display: String,
    /// Progress toward the monthly target.
    pub insight: MonthInsight,
}

/// Response body for `PUT /settings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSettingsResponse {
    /// Settings now in effect.
    pub settings: Settings,
    /// Present when existing entries were rewritten.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reapplied: Option<ReapplyReport>,
}

/// Response body for `POST /data/import`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    /// Entries stored after the import.
    pub imported: usize,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with `error` as the body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }

    /// The response for sync endpoints when no mirror is configured.
    pub fn remote_not_configured() -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            error: ApiError::with_details(
                "REMOTE_NOT_CONFIGURED",
                "No remote mirror is configured",
                "Add a 'remote' section to the configuration file to enable sync",
            ),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<CalendarError> for ApiErrorResponse {
    fn from(error: CalendarError) -> Self {
        let message = error.to_string();
        match error {
            CalendarError::ConfigNotFound { .. } | CalendarError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
            CalendarError::InvalidDateKey { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_DATE_KEY", message))
            }
            CalendarError::InvalidMonth { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_MONTH", message))
            }
            CalendarError::EntryNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("ENTRY_NOT_FOUND", message),
            },
            CalendarError::ImportError { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_IMPORT", message))
            }
            CalendarError::StorageError { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "STORAGE_ERROR",
                    "Failed to persist calendar data",
                    message,
                ),
            },
            CalendarError::RemoteError { .. } => ApiErrorResponse {
                status: StatusCode::BAD_GATEWAY,
                error: ApiError::with_details("REMOTE_ERROR", "Remote mirror failed", message),
            },
        }
    }
}

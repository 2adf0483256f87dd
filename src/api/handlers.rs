//! HTTP request handlers for the calendar API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    EntryInput, build_entry, calculate_day_pay, month_insight, reapply_rate, summarize_lifetime,
    summarize_month,
};
use crate::error::CalendarError;
use crate::models::{YearMonth, parse_date_key};
use crate::sync::{merge_remote, push_all};

use super::request::{CalculateRequest, EntriesQuery, PullQuery, SaveSettingsRequest};
use super::response::{
    ApiError, ApiErrorResponse, CalculateResponse, EntryView, ImportResponse,
    MonthSummaryResponse, SaveSettingsResponse,
};
use super::state::AppState;

type ApiResult = Result<Response, ApiErrorResponse>;

/// Name offered to browsers for the export download.
const EXPORT_FILE_NAME: &str = "work-calendar-data.json";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/entries", get(list_entries_handler))
        .route(
            "/entries/:date",
            get(get_entry_handler)
                .put(save_entry_handler)
                .delete(delete_entry_handler),
        )
        .route("/summary/lifetime", get(lifetime_summary_handler))
        .route("/summary/:year/:month", get(month_summary_handler))
        .route("/settings", get(get_settings_handler).put(save_settings_handler))
        .route("/data/export", get(export_handler))
        .route("/data/import", post(import_handler))
        .route("/data", delete(clear_handler))
        .route("/sync/pull", post(pull_handler))
        .route("/sync/push", post(push_handler))
        .with_state(state)
}

/// Turns a body rejection into a 400 response, logging the cause.
fn reject_json(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

/// Logs a failed operation and converts it to a response.
fn fail(correlation_id: Uuid, error: CalendarError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %error, "Request failed");
    error.into()
}

fn json_ok<T: serde::Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Handler for POST /calculate.
///
/// Prices a labor-day count without storing anything.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|r| reject_json(correlation_id, r))?;

    let rate = match request.rate.filter(|r| !r.is_zero()) {
        Some(rate) => rate,
        None => state.read().await.settings.default_daily_rate,
    };
    let result = calculate_day_pay(request.work_days, rate, 1);

    info!(
        correlation_id = %correlation_id,
        work_days = %request.work_days,
        rate = %rate,
        amount = %result.amount,
        "Calculated day pay"
    );
    Ok(json_ok(CalculateResponse::new(request.work_days, rate, result)))
}

/// Handler for GET /entries.
///
/// Lists every entry, or one month's when `year` and `month` are given.
async fn list_entries_handler(
    State(state): State<AppState>,
    Query(query): Query<EntriesQuery>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let calendar = state.read().await;

    let entries: Vec<EntryView> = match (query.year, query.month) {
        (Some(year), Some(month)) => {
            let month = YearMonth::new(year, month).map_err(|e| fail(correlation_id, e))?;
            calendar
                .work_data
                .entries_in_month(month)
                .map(|(date, entry)| EntryView::new(*date, entry.clone()))
                .collect()
        }
        (None, None) => calendar
            .work_data
            .iter()
            .map(|(date, entry)| EntryView::new(*date, entry.clone()))
            .collect(),
        _ => {
            warn!(correlation_id = %correlation_id, "Incomplete month filter");
            return Err(ApiErrorResponse::bad_request(ApiError::validation_error(
                "year and month must be given together",
            )));
        }
    };

    info!(
        correlation_id = %correlation_id,
        count = entries.len(),
        "Listed entries"
    );
    Ok(json_ok(entries))
}

/// Handler for GET /entries/{date}.
async fn get_entry_handler(State(state): State<AppState>, Path(key): Path<String>) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let date = parse_date_key(&key).map_err(|e| fail(correlation_id, e))?;

    let calendar = state.read().await;
    let entry = calendar
        .work_data
        .get(&date)
        .cloned()
        .ok_or_else(|| fail(correlation_id, CalendarError::EntryNotFound { date }))?;

    Ok(json_ok(EntryView::new(date, entry)))
}

/// Handler for PUT /entries/{date}.
///
/// Builds the entry from the submitted values and the saved defaults,
/// replacing whatever was stored for the date.
async fn save_entry_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    payload: Result<Json<EntryInput>, JsonRejection>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let date = parse_date_key(&key).map_err(|e| fail(correlation_id, e))?;
    let Json(input) = payload.map_err(|r| reject_json(correlation_id, r))?;

    let mut calendar = state.write().await;
    let entry = build_entry(&input, &calendar.settings, Utc::now());
    let mut updated = calendar.clone();
    updated.work_data.insert(date, entry.clone());
    state
        .commit(&mut calendar, updated)
        .await
        .map_err(|e| fail(correlation_id, e))?;
    drop(calendar);

    if let Some(mirror) = state.mirror() {
        mirror.spawn_upsert(date, entry.clone());
    }

    info!(
        correlation_id = %correlation_id,
        date = %date,
        work_days = %entry.work_days,
        total_amount = ?entry.total_amount,
        "Saved entry"
    );
    Ok(json_ok(EntryView::new(date, entry)))
}

/// Handler for DELETE /entries/{date}.
async fn delete_entry_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let date = parse_date_key(&key).map_err(|e| fail(correlation_id, e))?;

    let mut calendar = state.write().await;
    let mut updated = calendar.clone();
    if updated.work_data.remove(&date).is_none() {
        return Err(fail(correlation_id, CalendarError::EntryNotFound { date }));
    }
    state
        .commit(&mut calendar, updated)
        .await
        .map_err(|e| fail(correlation_id, e))?;
    drop(calendar);

    if let Some(mirror) = state.mirror() {
        mirror.spawn_delete(date);
    }

    info!(correlation_id = %correlation_id, date = %date, "Deleted entry");
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Handler for GET /summary/{year}/{month}.
async fn month_summary_handler(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let month = YearMonth::new(year, month).map_err(|e| fail(correlation_id, e))?;

    let summary = summarize_month(&state.read().await.work_data, month.year(), month.month());
    let insight = month_insight(&summary, state.monthly_target_days());

    info!(
        correlation_id = %correlation_id,
        month = %month,
        work_days = %summary.work_days,
        salary = %summary.salary,
        "Summarized month"
    );
    Ok(json_ok(MonthSummaryResponse {
        month,
        work_days_display: summary.work_days_display(),
        summary,
        insight,
    }))
}

/// Handler for GET /summary/lifetime.
async fn lifetime_summary_handler(State(state): State<AppState>) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let summary = summarize_lifetime(&state.read().await.work_data);

    info!(
        correlation_id = %correlation_id,
        months = summary.total.months,
        salary = %summary.total.salary,
        "Summarized lifetime"
    );
    Ok(json_ok(summary))
}

/// Handler for GET /settings.
async fn get_settings_handler(State(state): State<AppState>) -> ApiResult {
    Ok(json_ok(state.read().await.settings.clone()))
}

/// Handler for PUT /settings.
///
/// Saves the new defaults and, when a scope is given, rewrites the
/// selected entries with the new daily rate.
async fn save_settings_handler(
    State(state): State<AppState>,
    payload: Result<Json<SaveSettingsRequest>, JsonRejection>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|r| reject_json(correlation_id, r))?;
    let now = Utc::now();

    let mut calendar = state.write().await;
    let mut updated = calendar.clone();
    let settings = updated.settings.updated(&request.update);
    updated.settings = settings.clone();

    let reapplied = request.reapply.map(|scope| {
        reapply_rate(&mut updated.work_data, settings.default_daily_rate, scope, now)
    });
    let rewritten: Vec<_> = reapplied
        .iter()
        .flat_map(|report| &report.dates)
        .filter_map(|date| {
            updated
                .work_data
                .get(date)
                .map(|entry| (*date, entry.clone()))
        })
        .collect();

    state
        .commit(&mut calendar, updated)
        .await
        .map_err(|e| fail(correlation_id, e))?;
    drop(calendar);

    if let Some(mirror) = state.mirror() {
        mirror.spawn_settings(settings.clone());
        for (date, entry) in rewritten {
            mirror.spawn_upsert(date, entry);
        }
    }

    info!(
        correlation_id = %correlation_id,
        daily_rate = %settings.default_daily_rate,
        hourly_rate = %settings.default_hourly_rate,
        reapplied = ?reapplied.as_ref().map(|r| r.updated),
        "Saved settings"
    );
    Ok(json_ok(SaveSettingsResponse {
        settings,
        reapplied,
    }))
}

/// Handler for GET /data/export.
async fn export_handler(State(state): State<AppState>) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let document = state
        .read()
        .await
        .export_work_data()
        .map_err(|e| fail(correlation_id, e))?;

    info!(correlation_id = %correlation_id, "Exported work data");
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
            ),
        ],
        Json(document),
    )
        .into_response())
}

/// Handler for POST /data/import.
///
/// Replaces every entry with the uploaded document. Settings are kept.
async fn import_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let Json(document) = payload.map_err(|r| reject_json(correlation_id, r))?;

    let mut calendar = state.write().await;
    let mut updated = calendar.clone();
    let imported = updated
        .import_work_data(document)
        .map_err(|e| fail(correlation_id, e))?;
    state
        .commit(&mut calendar, updated)
        .await
        .map_err(|e| fail(correlation_id, e))?;

    info!(correlation_id = %correlation_id, imported, "Imported work data");
    Ok(json_ok(ImportResponse { imported }))
}

/// Handler for DELETE /data.
///
/// Removes every entry and restores the configured default settings.
async fn clear_handler(State(state): State<AppState>) -> ApiResult {
    let correlation_id = Uuid::new_v4();

    let mut calendar = state.write().await;
    let removed = calendar.work_data.len();
    let mut updated = calendar.clone();
    updated.clear(state.defaults().clone());
    state
        .commit(&mut calendar, updated)
        .await
        .map_err(|e| fail(correlation_id, e))?;

    info!(correlation_id = %correlation_id, removed, "Cleared all data");
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Handler for POST /sync/pull.
///
/// Merges remote entries into the local calendar. Settings stay local.
async fn pull_handler(State(state): State<AppState>, Query(query): Query<PullQuery>) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let mirror = state
        .mirror()
        .ok_or_else(ApiErrorResponse::remote_not_configured)?;
    let (from, to) = query.range();

    let remote = mirror
        .mirror()
        .load_range(mirror.user_id(), from, to)
        .await
        .map_err(|e| fail(correlation_id, e))?;
    let fetched = remote.len();

    let mut calendar = state.write().await;
    let mut updated = calendar.clone();
    let report = merge_remote(&mut updated.work_data, remote);
    state
        .commit(&mut calendar, updated)
        .await
        .map_err(|e| fail(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        fetched,
        added = report.added,
        replaced = report.replaced,
        "Pulled remote entries"
    );
    Ok(json_ok(report))
}

/// Handler for POST /sync/push.
///
/// Uploads the settings and every entry, reporting per-write failures.
async fn push_handler(State(state): State<AppState>) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let mirror = state
        .mirror()
        .ok_or_else(ApiErrorResponse::remote_not_configured)?;

    let snapshot = state.read().await.clone();
    let report = push_all(mirror.mirror(), mirror.user_id(), &snapshot).await;

    info!(
        correlation_id = %correlation_id,
        succeeded = report.succeeded,
        failed = report.failed,
        "Pushed to remote"
    );
    Ok(json_ok(report))
}

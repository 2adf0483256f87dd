//! Integration tests for the labor-day calendar service.
//!
//! This test suite drives the HTTP router end to end:
//! - Day pay at and around one labor-day
//! - Monthly totals with stored and legacy entries
//! - Rate reapplication scopes
//! - Lifetime statistics
//! - Persistence across restarts
//! - Data import, export and clear
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::path::Path;
use std::str::FromStr;
use tempfile::TempDir;
use tower::ServiceExt;

use gongsu_calendar::api::{AppState, create_router};
use gongsu_calendar::config::{AppConfig, ConfigLoader};

// =============================================================================
// Test Helpers
// =============================================================================

fn config_in(dir: &Path) -> AppConfig {
    let mut config = ConfigLoader::load("./config/gongsu.yaml")
        .expect("Failed to load config")
        .config()
        .clone();
    config.storage.path = dir.join("calendar.json");
    config
}

async fn open_router(config: &AppConfig) -> Router {
    create_router(AppState::open(config).await.expect("Failed to open state"))
}

async fn create_router_for_test() -> (Router, TempDir, AppConfig) {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    (open_router(&config).await, dir, config)
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a JSON number as a decimal so 262500 and 262500.0 compare equal.
fn as_decimal(value: &Value) -> Decimal {
    Decimal::from_str(&value.to_string()).unwrap()
}

async fn request(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

async fn save_entry(router: &Router, date: &str, body: Value) -> Value {
    let (status, json) = request(router, "PUT", &format!("/entries/{}", date), Some(body)).await;
    assert_eq!(status, StatusCode::OK, "saving {} failed: {}", date, json);
    json
}

async fn calculate(router: &Router, work_days: &str, rate: &str) -> Decimal {
    let (status, json) = request(
        router,
        "POST",
        "/calculate",
        Some(json!({"workDays": work_days, "rate": rate})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    as_decimal(&json["amount"])
}

// =============================================================================
// Day Pay
// =============================================================================

#[tokio::test]
async fn test_half_day_is_proportional() {
    let (router, _dir, _) = create_router_for_test().await;
    assert_eq!(calculate(&router, "0.5", "150000").await, decimal("75000"));
}

#[tokio::test]
async fn test_full_day_is_the_rate() {
    let (router, _dir, _) = create_router_for_test().await;
    assert_eq!(calculate(&router, "1.0", "150000").await, decimal("150000"));
}

#[tokio::test]
async fn test_one_and_a_half_days_includes_premium() {
    let (router, _dir, _) = create_router_for_test().await;
    assert_eq!(calculate(&router, "1.5", "150000").await, decimal("262500"));
}

#[tokio::test]
async fn test_two_days_includes_premium() {
    let (router, _dir, _) = create_router_for_test().await;
    assert_eq!(calculate(&router, "2.0", "150000").await, decimal("375000"));
}

#[tokio::test]
async fn test_pay_is_continuous_at_one_labor_day() {
    let (router, _dir, _) = create_router_for_test().await;
    let below = calculate(&router, "0.9", "150000").await;
    let at = calculate(&router, "1.0", "150000").await;
    let above = calculate(&router, "1.1", "150000").await;
    assert!(below < at && at < above);
    assert_eq!(above - at, decimal("22500"));
}

#[tokio::test]
async fn test_negative_work_days_price_at_zero() {
    let (router, _dir, _) = create_router_for_test().await;
    assert_eq!(calculate(&router, "-1", "150000").await, Decimal::ZERO);
}

// =============================================================================
// Monthly Totals
// =============================================================================

#[tokio::test]
async fn test_march_summary_from_saved_entries() {
    let (router, _dir, _) = create_router_for_test().await;
    save_entry(&router, "2024-03-01", json!({"workDays": 1.0, "workHours": 8, "rate": 150000})).await;
    save_entry(&router, "2024-03-02", json!({"workDays": 0.5, "workHours": 4, "rate": 150000})).await;
    save_entry(&router, "2024-04-01", json!({"workDays": 1.0, "workHours": 8, "rate": 150000})).await;

    let (status, summary) = request(&router, "GET", "/summary/2024/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_decimal(&summary["workDays"]), decimal("1.5"));
    assert_eq!(as_decimal(&summary["salary"]), decimal("225000"));
    assert_eq!(summary["workHours"], 12);
    assert_eq!(summary["workDaysDisplay"], "1.5");
}

#[tokio::test]
async fn test_month_mixing_stored_and_legacy_entries() {
    let (router, _dir, _) = create_router_for_test().await;
    let (status, _) = request(
        &router,
        "POST",
        "/data/import",
        Some(json!({
            "2024-03-01": {"workDays": 1.5, "workHours": 12, "rate": 150000, "totalAmount": 262500, "memo": ""},
            "2024-03-02": {"workDays": 1.5, "workHours": 12, "rate": 150000, "memo": "old record"}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, summary) = request(&router, "GET", "/summary/2024/3", None).await;
    // 262500 stored + 225000 legacy fallback
    assert_eq!(as_decimal(&summary["salary"]), decimal("487500"));
}

#[tokio::test]
async fn test_empty_month_is_zero() {
    let (router, _dir, _) = create_router_for_test().await;
    let (status, summary) = request(&router, "GET", "/summary/2024/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_decimal(&summary["workDays"]), Decimal::ZERO);
    assert_eq!(as_decimal(&summary["salary"]), Decimal::ZERO);
    assert_eq!(as_decimal(&summary["insight"]["progressPercent"]), Decimal::ZERO);
}

#[tokio::test]
async fn test_entry_saved_without_rate_uses_default() {
    let (router, _dir, _) = create_router_for_test().await;
    let entry = save_entry(&router, "2024-03-05", json!({"workDays": 1.5})).await;
    assert_eq!(as_decimal(&entry["rate"]), decimal("150000"));
    assert_eq!(as_decimal(&entry["totalAmount"]), decimal("262500"));
}

// =============================================================================
// Rate Reapplication
// =============================================================================

#[tokio::test]
async fn test_reapply_selected_touches_only_that_date() {
    let (router, _dir, _) = create_router_for_test().await;
    save_entry(&router, "2024-03-01", json!({"workDays": 1.0, "rate": 150000, "memo": "a"})).await;
    save_entry(&router, "2024-03-02", json!({"workDays": 0.5, "rate": 150000, "memo": "b"})).await;
    let (_, before) = request(&router, "GET", "/entries/2024-03-02", None).await;

    let (status, body) = request(
        &router,
        "PUT",
        "/settings",
        Some(json!({
            "defaultDailyRate": 200000,
            "reapply": {"scope": "selected", "date": "2024-03-01"}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reapplied"]["updated"], 1);

    let (_, changed) = request(&router, "GET", "/entries/2024-03-01", None).await;
    assert_eq!(as_decimal(&changed["rate"]), decimal("200000"));
    assert_eq!(as_decimal(&changed["totalAmount"]), decimal("200000"));
    assert_eq!(changed["memo"], "a");

    let (_, after) = request(&router, "GET", "/entries/2024-03-02", None).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_reapply_month_leaves_other_months() {
    let (router, _dir, _) = create_router_for_test().await;
    save_entry(&router, "2024-02-29", json!({"workDays": 1.0, "rate": 150000})).await;
    save_entry(&router, "2024-03-10", json!({"workDays": 2.0, "rate": 150000})).await;

    request(
        &router,
        "PUT",
        "/settings",
        Some(json!({
            "defaultDailyRate": 200000,
            "reapply": {"scope": "month", "month": "2024-03"}
        })),
    )
    .await;

    let (_, march) = request(&router, "GET", "/entries/2024-03-10", None).await;
    assert_eq!(as_decimal(&march["totalAmount"]), decimal("500000"));
    let (_, february) = request(&router, "GET", "/entries/2024-02-29", None).await;
    assert_eq!(as_decimal(&february["totalAmount"]), decimal("150000"));
}

#[tokio::test]
async fn test_reapply_all_and_missing_selected() {
    let (router, _dir, _) = create_router_for_test().await;
    save_entry(&router, "2024-01-01", json!({"workDays": 1.5, "rate": 150000})).await;
    save_entry(&router, "2024-06-01", json!({"workDays": 0.5, "rate": 150000})).await;

    let (_, body) = request(
        &router,
        "PUT",
        "/settings",
        Some(json!({"defaultDailyRate": 100000, "reapply": {"scope": "selected", "date": "2024-12-25"}})),
    )
    .await;
    assert_eq!(body["reapplied"]["updated"], 0);

    let (_, body) = request(
        &router,
        "PUT",
        "/settings",
        Some(json!({"defaultDailyRate": 100000, "reapply": {"scope": "all"}})),
    )
    .await;
    assert_eq!(body["reapplied"]["updated"], 2);

    let (_, lifetime) = request(&router, "GET", "/summary/lifetime", None).await;
    // 175000 + 50000
    assert_eq!(as_decimal(&lifetime["total"]["salary"]), decimal("225000"));
}

// =============================================================================
// Lifetime Statistics
// =============================================================================

#[tokio::test]
async fn test_lifetime_totals_and_averages() {
    let (router, _dir, _) = create_router_for_test().await;
    save_entry(&router, "2024-01-15", json!({"workDays": 1.0, "workHours": 8, "rate": 150000})).await;
    save_entry(&router, "2024-01-16", json!({"workDays": 1.0, "workHours": 8, "rate": 150000})).await;
    save_entry(&router, "2024-02-01", json!({"workDays": 1.0, "workHours": 8, "rate": 150000})).await;

    let (status, lifetime) = request(&router, "GET", "/summary/lifetime", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(lifetime["total"]["months"], 2);
    assert_eq!(lifetime["total"]["workHours"], 24);
    assert_eq!(as_decimal(&lifetime["total"]["salary"]), decimal("450000"));
    assert_eq!(as_decimal(&lifetime["average"]["salaryPerMonth"]), decimal("225000"));
    assert_eq!(
        as_decimal(&lifetime["monthlyBreakdown"]["2024-01"]["workDays"]),
        decimal("2")
    );
}

#[tokio::test]
async fn test_lifetime_empty_store() {
    let (router, _dir, _) = create_router_for_test().await;
    let (_, lifetime) = request(&router, "GET", "/summary/lifetime", None).await;
    assert_eq!(lifetime["total"]["months"], 0);
    assert_eq!(as_decimal(&lifetime["average"]["salaryPerMonth"]), Decimal::ZERO);
}

// =============================================================================
// Persistence
// =============================================================================

#[tokio::test]
async fn test_entries_and_settings_survive_restart() {
    let (router, _dir, config) = create_router_for_test().await;
    save_entry(&router, "2024-03-01", json!({"workDays": 1.5, "workHours": 12, "memo": "야간"})).await;
    request(&router, "PUT", "/settings", Some(json!({"defaultHourlyRate": 20000}))).await;
    drop(router);

    let restarted = open_router(&config).await;
    let (status, entry) = request(&restarted, "GET", "/entries/2024-03-01", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entry["memo"], "야간");
    assert_eq!(as_decimal(&entry["totalAmount"]), decimal("262500"));

    let (_, settings) = request(&restarted, "GET", "/settings", None).await;
    assert_eq!(as_decimal(&settings["defaultHourlyRate"]), decimal("20000"));
    assert_eq!(as_decimal(&settings["defaultDailyRate"]), decimal("160000"));
}

#[tokio::test]
async fn test_browser_snapshot_file_loads_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    std::fs::write(
        &config.storage.path,
        json!({
            "workData": {
                "2023-12-24": {"workDays": "1.0", "workHours": "8", "rate": "150000", "memo": ""}
            },
            "settings": {"defaultDailyRate": 150000, "defaultHourlyRate": 18750, "defaultWorkDays": "1.0"}
        })
        .to_string(),
    )
    .unwrap();

    let router = open_router(&config).await;
    let (status, entry) = request(&router, "GET", "/entries/2023-12-24", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entry["legacy"], true);
    assert_eq!(as_decimal(&entry["payAmount"]), decimal("150000"));
}

// =============================================================================
// Data Management
// =============================================================================

#[tokio::test]
async fn test_export_import_round_trip_between_instances() {
    let (source, _dir1, _) = create_router_for_test().await;
    save_entry(&source, "2024-03-01", json!({"workDays": 1.5, "rate": 150000})).await;
    save_entry(&source, "2024-03-02", json!({"workDays": 0.5, "rate": 150000})).await;
    let (status, exported) = request(&source, "GET", "/data/export", None).await;
    assert_eq!(status, StatusCode::OK);

    let (target, _dir2, _) = create_router_for_test().await;
    let (status, body) = request(&target, "POST", "/data/import", Some(exported)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["imported"], 2);

    let (_, summary) = request(&target, "GET", "/summary/2024/3", None).await;
    assert_eq!(as_decimal(&summary["salary"]), decimal("337500"));
}

#[tokio::test]
async fn test_clear_removes_entries_and_resets_settings() {
    let (router, _dir, _) = create_router_for_test().await;
    save_entry(&router, "2024-03-01", json!({"workDays": 1.0})).await;
    request(&router, "PUT", "/settings", Some(json!({"defaultDailyRate": 300000}))).await;

    let (status, _) = request(&router, "DELETE", "/data", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, entries) = request(&router, "GET", "/entries", None).await;
    assert_eq!(entries.as_array().unwrap().len(), 0);
    let (_, settings) = request(&router, "GET", "/settings", None).await;
    assert_eq!(as_decimal(&settings["defaultDailyRate"]), decimal("150000"));
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_invalid_date_keys_are_rejected() {
    let (router, _dir, _) = create_router_for_test().await;
    for key in ["2024-3-1", "2024-13-01", "2023-02-29", "yesterday"] {
        let (status, body) = request(&router, "GET", &format!("/entries/{}", key), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "key {}", key);
        assert_eq!(body["code"], "INVALID_DATE_KEY");
    }
}

#[tokio::test]
async fn test_malformed_entry_body_is_rejected() {
    let (router, _dir, _) = create_router_for_test().await;
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/entries/2024-03-01")
                .header("Content-Type", "application/json")
                .body(Body::from("{\"workDays\": "))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (status, _) = request(&router, "GET", "/entries/2024-03-01", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_entry_is_404() {
    let (router, _dir, _) = create_router_for_test().await;
    let (status, body) = request(&router, "DELETE", "/entries/2024-03-01", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ENTRY_NOT_FOUND");
}

#[tokio::test]
async fn test_out_of_range_import_keeps_summaries_and_reapply_working() {
    let (router, _dir, _) = create_router_for_test().await;
    let (status, body) = request(
        &router,
        "POST",
        "/data/import",
        Some(json!({
            "2024-03-01": {"workDays": 10000000000u64, "workHours": 8, "rate": "1e20", "memo": ""},
            "2024-03-02": {"workDays": 1, "workHours": 8, "rate": 150000, "totalAmount": 150000, "memo": ""}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["imported"], 2);

    let (status, body) = request(&router, "GET", "/summary/2024/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["salary"].as_f64().unwrap() > 7.9e28);

    let (status, body) = request(&router, "GET", "/summary/lifetime", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"]["months"], 1);

    let (status, body) = request(
        &router,
        "PUT",
        "/settings",
        Some(json!({"defaultDailyRate": 200000, "reapply": {"scope": "all"}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reapplied"]["updated"], 2);

    let (_, entry) = request(&router, "GET", "/entries/2024-03-02", None).await;
    assert_eq!(as_decimal(&entry["totalAmount"]), decimal("200000"));
}

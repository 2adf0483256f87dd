//! Turning a save request into a stored entry.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Settings, WorkEntry, hours_number, lenient_text, optional_decimal_number};

use super::pay::compute_pay;

/// Values supplied when a date is saved.
///
/// Everything is optional; gaps are filled from [`Settings`] or with zero.
/// Malformed numbers read as missing and a non-string memo is kept as text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryInput {
    /// Labor-days for the date.
    #[serde(default, with = "optional_decimal_number")]
    pub work_days: Option<Decimal>,
    /// Hours worked; fractions truncate and junk reads as zero.
    #[serde(default, with = "hours_number")]
    pub work_hours: u32,
    /// Daily rate; falls back to the default when absent or zero.
    #[serde(default, with = "optional_decimal_number")]
    pub rate: Option<Decimal>,
    /// Memo text; surrounding whitespace is trimmed.
    #[serde(default, deserialize_with = "lenient_text")]
    pub memo: String,
}

/// Builds the entry to store for a save request.
///
/// The stored amount is always the tiered [`compute_pay`] result, so the
/// entry satisfies `total_amount == compute_pay(work_days, rate)`.
///
/// # Example
///
/// ```
/// use gongsu_calendar::calculation::{build_entry, EntryInput};
/// use gongsu_calendar::models::Settings;
/// use chrono::Utc;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let input = EntryInput {
///     work_days: Some(Decimal::from_str("1.5").unwrap()),
///     work_hours: 10,
///     rate: None,
///     memo: "  site A ".to_string(),
/// };
/// let entry = build_entry(&input, &Settings::default(), Utc::now());
/// assert_eq!(entry.rate, Decimal::from(150000));
/// assert_eq!(entry.total_amount, Some(Decimal::from(262500)));
/// assert_eq!(entry.memo, "site A");
/// ```
pub fn build_entry(input: &EntryInput, settings: &Settings, now: DateTime<Utc>) -> WorkEntry {
    let work_days = input.work_days.unwrap_or(Decimal::ZERO);
    let rate = input
        .rate
        .filter(|r| !r.is_zero())
        .unwrap_or(settings.default_daily_rate);

    WorkEntry {
        work_days,
        work_hours: input.work_hours,
        rate,
        total_amount: Some(compute_pay(work_days, rate)),
        memo: input.memo.trim().to_string(),
        updated_at: Some(now),
    }
}

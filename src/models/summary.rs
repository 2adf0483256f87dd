//! Summary structures produced by the aggregators.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::date_key::YearMonth;
use super::numeric::decimal_number;

/// Totals for one calendar month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    /// Sum of labor-days (full precision; display with one decimal).
    #[serde(with = "decimal_number")]
    pub work_days: Decimal,
    /// Sum of hours.
    pub work_hours: u64,
    /// Sum of pay, stored or legacy per entry.
    #[serde(with = "decimal_number")]
    pub salary: Decimal,
}

impl MonthSummary {
    /// Labor-days rounded to one decimal place for display.
    ///
    /// ```
    /// use gongsu_calendar::models::MonthSummary;
    /// use rust_decimal::Decimal;
    ///
    /// let summary = MonthSummary {
    ///     work_days: Decimal::new(15, 1),
    ///     work_hours: 12,
    ///     salary: Decimal::from(225000),
    /// };
    /// assert_eq!(summary.work_days_display(), "1.5");
    /// ```
    pub fn work_days_display(&self) -> String {
        format!("{:.1}", self.work_days)
    }
}

/// Totals across every recorded month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifetimeTotals {
    /// Sum of labor-days.
    #[serde(with = "decimal_number")]
    pub work_days: Decimal,
    /// Sum of hours.
    pub work_hours: u64,
    /// Sum of pay.
    #[serde(with = "decimal_number")]
    pub salary: Decimal,
    /// Number of distinct months with at least one entry.
    pub months: u32,
}

/// Per-month averages over the active months.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAverages {
    /// Labor-days per active month.
    #[serde(with = "decimal_number")]
    pub work_days_per_month: Decimal,
    /// Pay per active month.
    #[serde(with = "decimal_number")]
    pub salary_per_month: Decimal,
}

/// Lifetime statistics with a per-month breakdown keyed `YYYY-MM`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifetimeSummary {
    /// Totals.
    pub total: LifetimeTotals,
    /// Averages.
    pub average: MonthlyAverages,
    /// Summary for each active month.
    pub monthly_breakdown: BTreeMap<YearMonth, MonthSummary>,
}

/// Progress indicators for a month against a labor-day target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthInsight {
    /// Target labor-days for the month.
    #[serde(with = "decimal_number")]
    pub target_days: Decimal,
    /// `work_days / target * 100`, one decimal place; may exceed 100.
    #[serde(with = "decimal_number")]
    pub progress_percent: Decimal,
    /// `progress_percent` capped at 100, for a progress bar.
    #[serde(with = "decimal_number")]
    pub progress_bar_percent: Decimal,
    /// Hours per labor-day, one decimal place.
    #[serde(with = "decimal_number")]
    pub average_hours_per_day: Decimal,
}

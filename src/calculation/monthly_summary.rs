//! Monthly totals and progress insight.

use chrono::Datelike;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{MonthInsight, MonthSummary, WorkEntry, WorkStore};

/// Default monthly labor-day target used by the insight.
pub const DEFAULT_MONTHLY_TARGET_DAYS: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Sums the entries recorded in `year`/`month` (1-indexed).
///
/// Each entry contributes its stored amount when it has one and the legacy
/// `work_days * rate` otherwise. A month number outside 1..=12 matches nothing.
///
/// # Example
///
/// ```
/// use gongsu_calendar::calculation::summarize_month;
/// use gongsu_calendar::models::{WorkEntry, WorkStore};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let entry = |days: Decimal, total: i64| WorkEntry {
///     work_days: days,
///     work_hours: 8,
///     rate: Decimal::from(150000),
///     total_amount: Some(Decimal::from(total)),
///     memo: String::new(),
///     updated_at: None,
/// };
/// let store: WorkStore = [
///     (NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), entry(Decimal::ONE, 150000)),
///     (NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(), entry(Decimal::new(5, 1), 75000)),
/// ]
/// .into_iter()
/// .collect();
///
/// let summary = summarize_month(&store, 2024, 3);
/// assert_eq!(summary.work_days, Decimal::new(15, 1));
/// assert_eq!(summary.salary, Decimal::from(225000));
/// ```
pub fn summarize_month(store: &WorkStore, year: i32, month: u32) -> MonthSummary {
    accumulate(
        store
            .iter()
            .filter(|(date, _)| date.year() == year && date.month() == month)
            .map(|(_, entry)| entry),
    )
}

/// Folds entries into a [`MonthSummary`]. Sums saturate at the type's maximum.
pub(crate) fn accumulate<'a, I>(entries: I) -> MonthSummary
where
    I: IntoIterator<Item = &'a WorkEntry>,
{
    entries
        .into_iter()
        .fold(MonthSummary::default(), |mut summary, entry| {
            summary.work_days = summary.work_days.saturating_add(entry.work_days);
            summary.work_hours = summary
                .work_hours
                .saturating_add(u64::from(entry.work_hours));
            summary.salary = summary.salary.saturating_add(entry.pay_amount());
            summary
        })
}

/// Progress of a month against a labor-day target.
///
/// Percentages and the hours average are rounded to one decimal place.
/// The hours average divides by at least one labor-day.
pub fn month_insight(summary: &MonthSummary, target_days: Decimal) -> MonthInsight {
    let progress = if target_days > Decimal::ZERO {
        summary
            .work_days
            .checked_div(target_days)
            .map_or(Decimal::MAX, |ratio| one_decimal(ratio.saturating_mul(HUNDRED)))
    } else {
        Decimal::ZERO
    };
    let divisor = summary.work_days.max(Decimal::ONE);

    MonthInsight {
        target_days,
        progress_percent: progress,
        progress_bar_percent: progress.min(HUNDRED),
        average_hours_per_day: one_decimal(Decimal::from(summary.work_hours) / divisor),
    }
}

fn one_decimal(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

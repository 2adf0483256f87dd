//! Lifetime statistics across every recorded month.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{
    LifetimeSummary, LifetimeTotals, MonthSummary, MonthlyAverages, WorkEntry, WorkStore,
    YearMonth,
};

use super::monthly_summary::accumulate;

/// Groups every entry by calendar month and derives totals and averages.
///
/// Averages divide by the number of months that have at least one entry and
/// are zero when the store is empty. Decimal sums are exact, so the result
/// does not depend on the order entries are visited in.
///
/// # Example
///
/// ```
/// use gongsu_calendar::calculation::summarize_lifetime;
/// use gongsu_calendar::models::WorkStore;
/// use rust_decimal::Decimal;
///
/// let summary = summarize_lifetime(&WorkStore::new());
/// assert_eq!(summary.total.months, 0);
/// assert_eq!(summary.average.salary_per_month, Decimal::ZERO);
/// ```
pub fn summarize_lifetime(store: &WorkStore) -> LifetimeSummary {
    let mut grouped: BTreeMap<YearMonth, Vec<&WorkEntry>> = BTreeMap::new();
    for (date, entry) in store {
        grouped.entry(YearMonth::of(*date)).or_default().push(entry);
    }

    let monthly_breakdown: BTreeMap<YearMonth, MonthSummary> = grouped
        .into_iter()
        .map(|(month, entries)| (month, accumulate(entries)))
        .collect();

    let mut total = LifetimeTotals::default();
    for month in monthly_breakdown.values() {
        total.work_days = total.work_days.saturating_add(month.work_days);
        total.work_hours = total.work_hours.saturating_add(month.work_hours);
        total.salary = total.salary.saturating_add(month.salary);
        total.months += 1;
    }

    let average = if total.months > 0 {
        let months = Decimal::from(total.months);
        MonthlyAverages {
            work_days_per_month: total.work_days / months,
            salary_per_month: total.salary / months,
        }
    } else {
        MonthlyAverages::default()
    };

    LifetimeSummary {
        total,
        average,
        monthly_breakdown,
    }
}

//! Propagating a new daily rate to existing entries.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::{WorkStore, YearMonth};

use super::pay::compute_pay;

/// Which entries a rate change is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum ReapplyScope {
    /// Every entry in the store.
    All,
    /// Entries dated in one month.
    Month {
        /// The month to update.
        month: YearMonth,
    },
    /// The single entry at `date`, if it exists.
    Selected {
        /// The date to update.
        date: NaiveDate,
    },
}

/// Outcome of a reapplication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReapplyReport {
    /// Number of entries rewritten.
    pub updated: usize,
    /// The rewritten dates, in order.
    pub dates: Vec<NaiveDate>,
}

/// Rewrites `rate` and `total_amount` for the entries selected by `scope`.
///
/// Selected entries get `rate = new_rate`, `total_amount =
/// compute_pay(work_days, new_rate)` and `updated_at = now`. Every other
/// entry is left untouched, and `work_days`, `work_hours` and `memo` are
/// never modified. A missing selected date is a no-op. Amounts that would
/// exceed the decimal range saturate, so the pass never stops partway.
///
/// # Example
///
/// ```
/// use gongsu_calendar::calculation::{reapply_rate, ReapplyScope};
/// use gongsu_calendar::models::WorkStore;
/// use chrono::{NaiveDate, Utc};
/// use rust_decimal::Decimal;
///
/// let mut store = WorkStore::new();
/// let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let report = reapply_rate(&mut store, Decimal::from(200000), ReapplyScope::Selected { date }, Utc::now());
/// assert_eq!(report.updated, 0);
/// assert!(store.is_empty());
/// ```
pub fn reapply_rate(
    store: &mut WorkStore,
    new_rate: Decimal,
    scope: ReapplyScope,
    now: DateTime<Utc>,
) -> ReapplyReport {
    let mut dates = Vec::new();

    for (date, entry) in store.iter_mut() {
        let selected = match scope {
            ReapplyScope::All => true,
            ReapplyScope::Month { month } => month.contains(*date),
            ReapplyScope::Selected { date: target } => *date == target,
        };
        if !selected {
            continue;
        }

        entry.rate = new_rate;
        entry.total_amount = Some(compute_pay(entry.work_days, new_rate));
        entry.updated_at = Some(now);
        dates.push(*date);
    }

    info!(
        scope = ?scope,
        new_rate = %new_rate,
        updated = dates.len(),
        "Reapplied daily rate"
    );

    ReapplyReport {
        updated: dates.len(),
        dates,
    }
}

//! The per-date work entry.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::numeric::{decimal_number, hours_number, lenient_text, optional_decimal_number};

/// Labor recorded for one calendar date.
///
/// The JSON shape matches the browser snapshot (`workDays`, `workHours`,
/// `rate`, `totalAmount`, `memo`), so existing exports load unchanged.
///
/// `total_amount` is the pay computed when the entry was last written and is
/// kept as a historical snapshot: changing the default rate does not touch
/// it. Records written before the field existed have `None`.
///
/// # Example
///
/// ```
/// use gongsu_calendar::models::{PaySource, WorkEntry};
/// use rust_decimal::Decimal;
///
/// let legacy: WorkEntry =
///     serde_json::from_str(r#"{"workDays":1.5,"workHours":8,"rate":100000,"memo":""}"#).unwrap();
/// assert_eq!(legacy.pay_source(), PaySource::Legacy(Decimal::from(150000)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkEntry {
    /// Labor-days credited for the date (0.5 = half day, above 1.0 is overtime).
    #[serde(default, with = "decimal_number")]
    pub work_days: Decimal,
    /// Hours worked. Informational only.
    #[serde(default, with = "hours_number")]
    pub work_hours: u32,
    /// Daily rate in effect when the entry was saved.
    #[serde(default, with = "decimal_number")]
    pub rate: Decimal,
    /// Pay stored at write time; `None` on legacy records.
    #[serde(
        default,
        with = "optional_decimal_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_amount: Option<Decimal>,
    /// Free-text annotation.
    #[serde(default, deserialize_with = "lenient_text")]
    pub memo: String,
    /// Time of the last write, used when merging with the remote mirror.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Where an entry's pay amount comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaySource {
    /// The amount stored at write time.
    Stored(Decimal),
    /// A legacy record without a stored amount; `work_days * rate`.
    Legacy(Decimal),
}

impl PaySource {
    /// The amount regardless of origin.
    pub fn amount(self) -> Decimal {
        match self {
            PaySource::Stored(amount) | PaySource::Legacy(amount) => amount,
        }
    }
}

impl WorkEntry {
    /// Resolves the pay for this entry, preferring the stored amount.
    ///
    /// The legacy fallback is the pre-overtime formula `work_days * rate`
    /// and differs from the tiered rule above one labor-day.
    pub fn pay_source(&self) -> PaySource {
        match self.total_amount {
            Some(amount) => PaySource::Stored(amount),
            None => PaySource::Legacy(crate::calculation::legacy_pay(self.work_days, self.rate)),
        }
    }

    /// Shorthand for `pay_source().amount()`.
    pub fn pay_amount(&self) -> Decimal {
        self.pay_source().amount()
    }

    /// Returns true if this record predates stored amounts.
    pub fn is_legacy(&self) -> bool {
        self.total_amount.is_none()
    }
}

//! Core data models for the labor-day calendar.
//!
//! This module contains the per-date [`WorkEntry`], the [`WorkStore`] that
//! keys entries by date, user [`Settings`], and the summary structures the
//! aggregators produce.

mod audit;
mod date_key;
mod numeric;
mod settings;
mod summary;
mod work_entry;
mod work_store;

pub use audit::AuditStep;
pub use date_key::{YearMonth, format_date_key, parse_date_key};
pub use numeric::{
    coerce_decimal, coerce_hours, decimal_number, hours_number, lenient_text,
    optional_decimal_number,
};
pub use settings::{
    DEFAULT_DAILY_RATE, DEFAULT_HOURLY_RATE, HOURS_PER_LABOR_DAY, Settings, SettingsUpdate,
};
pub use summary::{LifetimeSummary, LifetimeTotals, MonthInsight, MonthSummary, MonthlyAverages};
pub use work_entry::{PaySource, WorkEntry};
pub use work_store::WorkStore;

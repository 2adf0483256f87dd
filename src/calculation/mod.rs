//! Calculation logic for the labor-day calendar.
//!
//! This module contains the day pay rule with its overtime tier, the
//! conversion of a save request into a stored entry, monthly and lifetime
//! aggregation, and bulk reapplication of a new daily rate.
//!
//! Everything here is pure and synchronous: nothing fails, nothing blocks.

mod entry;
mod lifetime_summary;
mod monthly_summary;
mod pay;
mod rate_reapply;

pub use entry::{EntryInput, build_entry};
pub use lifetime_summary::summarize_lifetime;
pub use monthly_summary::{DEFAULT_MONTHLY_TARGET_DAYS, month_insight, summarize_month};
pub use pay::{
    DayPayResult, FULL_LABOR_DAY, OVERTIME_MULTIPLIER, PayTier, calculate_day_pay, compute_pay,
    format_won, legacy_pay, tier_for,
};
pub use rate_reapply::{ReapplyReport, ReapplyScope, reapply_rate};

//! Day pay calculation with the overtime tier.
//!
//! ## Rate Structure
//!
//! - Up to one labor-day: proportional, `rate * work_days`
//! - Beyond one labor-day: the first day at `rate`, each further fraction at
//!   1.5× the proportional rate, `rate + (work_days - 1) * rate * 1.5`
//!
//! Both branches give `rate` at exactly one labor-day.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::AuditStep;

/// Labor-days paid at the plain rate before the overtime premium applies.
pub const FULL_LABOR_DAY: Decimal = Decimal::ONE;

/// Multiplier for the portion of labor-days above [`FULL_LABOR_DAY`].
pub const OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Which branch of the pay rule applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayTier {
    /// One labor-day or less, paid proportionally.
    Proportional,
    /// More than one labor-day, with overtime premium.
    Overtime,
}

/// Computes the pay for one date.
///
/// Negative inputs are outside the rule's domain and are clamped to zero.
/// Results beyond the decimal range saturate at [`Decimal::MAX`].
///
/// # Examples
///
/// ```
/// use gongsu_calendar::calculation::compute_pay;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rate = Decimal::from(150000);
/// assert_eq!(compute_pay(Decimal::from_str("0.5").unwrap(), rate), Decimal::from(75000));
/// assert_eq!(compute_pay(Decimal::ONE, rate), Decimal::from(150000));
/// assert_eq!(compute_pay(Decimal::from_str("1.5").unwrap(), rate), Decimal::from(262500));
/// assert_eq!(compute_pay(Decimal::from(2), rate), Decimal::from(375000));
/// ```
pub fn compute_pay(work_days: Decimal, rate: Decimal) -> Decimal {
    let work_days = work_days.max(Decimal::ZERO);
    let rate = rate.max(Decimal::ZERO);

    match tier_for(work_days) {
        PayTier::Proportional => rate.saturating_mul(work_days),
        PayTier::Overtime => rate.saturating_add(
            rate.saturating_mul(work_days - FULL_LABOR_DAY)
                .saturating_mul(OVERTIME_MULTIPLIER),
        ),
    }
}

/// The pre-overtime formula, `work_days * rate`.
///
/// Only used to read records that never stored an amount. Never write it.
/// Saturates like [`compute_pay`].
pub fn legacy_pay(work_days: Decimal, rate: Decimal) -> Decimal {
    rate.saturating_mul(work_days)
}

/// Which tier a labor-day count falls into.
pub fn tier_for(work_days: Decimal) -> PayTier {
    if work_days <= FULL_LABOR_DAY {
        PayTier::Proportional
    } else {
        PayTier::Overtime
    }
}

/// Pay for one date with an audit step explaining it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPayResult {
    /// The computed amount (same as [`compute_pay`]).
    pub amount: Decimal,
    /// The tier applied.
    pub tier: PayTier,
    /// Base portion (the first labor-day or the proportional amount).
    pub base_amount: Decimal,
    /// Overtime portion; zero for the proportional tier.
    pub overtime_amount: Decimal,
    /// The audit step recording the calculation.
    pub audit_step: AuditStep,
}

/// Calculates day pay and records how it was derived.
///
/// # Example
///
/// ```
/// use gongsu_calendar::calculation::{calculate_day_pay, PayTier};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = calculate_day_pay(Decimal::from_str("1.5").unwrap(), Decimal::from(150000), 1);
/// assert_eq!(result.tier, PayTier::Overtime);
/// assert_eq!(result.base_amount, Decimal::from(150000));
/// assert_eq!(result.overtime_amount, Decimal::from(112500));
/// assert_eq!(result.amount, Decimal::from(262500));
/// ```
pub fn calculate_day_pay(work_days: Decimal, rate: Decimal, step_number: u32) -> DayPayResult {
    let amount = compute_pay(work_days, rate);
    let clamped_days = work_days.max(Decimal::ZERO);
    let clamped_rate = rate.max(Decimal::ZERO);
    let tier = tier_for(clamped_days);

    let (base_amount, overtime_amount, rule_id, rule_name, reasoning) = match tier {
        PayTier::Proportional => (
            amount,
            Decimal::ZERO,
            "day_pay_proportional",
            "Proportional Day Pay",
            format!(
                "{} labor-days at {} per day = {}",
                clamped_days.normalize(),
                format_won(clamped_rate),
                format_won(amount)
            ),
        ),
        PayTier::Overtime => {
            let overtime_days = clamped_days - FULL_LABOR_DAY;
            let overtime_amount = amount - clamped_rate;
            (
                clamped_rate,
                overtime_amount,
                "day_pay_overtime",
                "Day Pay With Overtime Premium",
                format!(
                    "First labor-day at {}; {} extra labor-days at {}x = {}; total {}",
                    format_won(clamped_rate),
                    overtime_days.normalize(),
                    OVERTIME_MULTIPLIER.normalize(),
                    format_won(overtime_amount),
                    format_won(amount)
                ),
            )
        }
    };

    debug!(
        work_days = %clamped_days,
        rate = %clamped_rate,
        tier = ?tier,
        amount = %amount,
        "Computed day pay"
    );

    let audit_step = AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        input: serde_json::json!({
            "work_days": work_days.normalize().to_string(),
            "rate": rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "base_amount": base_amount.normalize().to_string(),
            "overtime_amount": overtime_amount.normalize().to_string(),
            "amount": amount.normalize().to_string()
        }),
        reasoning,
    };

    DayPayResult {
        amount,
        tier,
        base_amount,
        overtime_amount,
        audit_step,
    }
}

/// Formats an amount as whole won with thousands separators, e.g. `262,500원`.
///
/// ```
/// use gongsu_calendar::calculation::format_won;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_won(Decimal::from(262500)), "262,500원");
/// assert_eq!(format_won(Decimal::new(-15005, 1)), "-1,501원");
/// ```
pub fn format_won(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}원")
}

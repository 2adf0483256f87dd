//! Default rates applied to new entries.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::numeric::{decimal_number, optional_decimal_number};

/// Hours in one labor-day, used to derive hourly from daily rates.
pub const HOURS_PER_LABOR_DAY: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Default daily rate when none has been saved.
pub const DEFAULT_DAILY_RATE: Decimal = Decimal::from_parts(150_000, 0, 0, false, 0);

/// Default hourly rate when none has been saved.
pub const DEFAULT_HOURLY_RATE: Decimal = Decimal::from_parts(18_750, 0, 0, false, 0);

/// User-level defaults.
///
/// Owned by the application: loaded with the snapshot, replaced only by an
/// explicit save, and passed by value to whatever needs a fallback rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Rate for one full labor-day; fallback for entries saved without a rate.
    #[serde(default = "default_daily_rate", with = "decimal_number")]
    pub default_daily_rate: Decimal,
    /// Hourly rate, shown alongside the daily rate.
    #[serde(default = "default_hourly_rate", with = "decimal_number")]
    pub default_hourly_rate: Decimal,
    /// Labor-days preselected for a new entry.
    #[serde(default = "default_work_days", with = "decimal_number")]
    pub default_work_days: Decimal,
}

fn default_daily_rate() -> Decimal {
    DEFAULT_DAILY_RATE
}

fn default_hourly_rate() -> Decimal {
    DEFAULT_HOURLY_RATE
}

fn default_work_days() -> Decimal {
    Decimal::ONE
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_daily_rate: DEFAULT_DAILY_RATE,
            default_hourly_rate: DEFAULT_HOURLY_RATE,
            default_work_days: Decimal::ONE,
        }
    }
}

/// A requested change to [`Settings`]; absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    /// New daily rate.
    #[serde(default, with = "optional_decimal_number")]
    pub default_daily_rate: Option<Decimal>,
    /// New hourly rate.
    #[serde(default, with = "optional_decimal_number")]
    pub default_hourly_rate: Option<Decimal>,
    /// New default labor-days.
    #[serde(default, with = "optional_decimal_number")]
    pub default_work_days: Option<Decimal>,
}

impl Settings {
    /// Hourly rate implied by a daily rate (`daily / 8`, rounded half up).
    ///
    /// # Example
    ///
    /// ```
    /// use gongsu_calendar::models::Settings;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(Settings::hourly_from_daily(Decimal::from(150000)), Decimal::from(18750));
    /// assert_eq!(Settings::hourly_from_daily(Decimal::from(100004)), Decimal::from(12501));
    /// ```
    pub fn hourly_from_daily(daily: Decimal) -> Decimal {
        (daily / HOURS_PER_LABOR_DAY)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Daily rate implied by an hourly rate (`hourly * 8`), saturating at
    /// [`Decimal::MAX`].
    pub fn daily_from_hourly(hourly: Decimal) -> Decimal {
        hourly.saturating_mul(HOURS_PER_LABOR_DAY)
    }

    /// Applies an update the way the rate dialog does.
    ///
    /// When only one of the two rates is supplied the other is derived from
    /// it. A zero or negative rate falls back to the built-in default.
    pub fn updated(&self, update: &SettingsUpdate) -> Settings {
        let positive = |d: Option<Decimal>| d.map(|v| v.max(Decimal::ZERO));

        let (daily, hourly) = match (
            positive(update.default_daily_rate),
            positive(update.default_hourly_rate),
        ) {
            (Some(daily), Some(hourly)) => (
                non_zero_or(daily, DEFAULT_DAILY_RATE),
                non_zero_or(hourly, DEFAULT_HOURLY_RATE),
            ),
            (Some(daily), None) => {
                let daily = non_zero_or(daily, DEFAULT_DAILY_RATE);
                (daily, Self::hourly_from_daily(daily))
            }
            (None, Some(hourly)) => {
                let hourly = non_zero_or(hourly, DEFAULT_HOURLY_RATE);
                (Self::daily_from_hourly(hourly), hourly)
            }
            (None, None) => (self.default_daily_rate, self.default_hourly_rate),
        };

        Settings {
            default_daily_rate: daily,
            default_hourly_rate: hourly,
            default_work_days: update
                .default_work_days
                .filter(|d| *d > Decimal::ZERO)
                .unwrap_or(self.default_work_days),
        }
    }
}

fn non_zero_or(value: Decimal, fallback: Decimal) -> Decimal {
    if value.is_zero() { fallback } else { value }
}

//! Payment anchor and due-date models.
//!
//! A [`PaymentAnchor`] describes when a recurring payment falls due; the
//! resolver turns it into a [`NextPaymentDate`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Frequency;

/// Which way to roll a date that lands on a weekend or holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentDirection {
    /// Roll to the next business day.
    #[default]
    Forward,
    /// Roll to the previous business day.
    Backward,
}

/// The recurring schedule of a single obligation or income source.
///
/// # Example
///
/// ```
/// use cashflow_engine::models::{AdjustmentDirection, Frequency, PaymentAnchor};
/// use chrono::NaiveDate;
///
/// let rent = PaymentAnchor {
///     frequency: Frequency::Monthly,
///     anchor_day: 15,
///     reference_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
///     adjustment_direction: AdjustmentDirection::Forward,
///     use_last_working_day_of_month: false,
/// };
/// assert_eq!(rent.anchor_day, 15);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAnchor {
    /// How often the payment recurs.
    pub frequency: Frequency,
    /// Weekday (1 = Monday .. 7 = Sunday) for weekly schedules, day of month
    /// (1-31) for monthly, quarterly and yearly ones. Ignored for
    /// fortnightly and four-weekly schedules.
    pub anchor_day: u32,
    /// The date the next occurrence is computed from, normally today.
    pub reference_date: NaiveDate,
    /// Direction used to move the due date off non-business days.
    #[serde(default)]
    pub adjustment_direction: AdjustmentDirection,
    /// Monthly only: target the last working day of the month instead of
    /// the anchor day.
    #[serde(default)]
    pub use_last_working_day_of_month: bool,
}

/// The next occurrence of a [`PaymentAnchor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextPaymentDate {
    /// The unadjusted calendar date.
    pub base: NaiveDate,
    /// `base` moved onto a business day.
    pub adjusted: NaiveDate,
}

impl NextPaymentDate {
    /// Returns true if the business-day adjustment moved the date.
    pub fn was_adjusted(&self) -> bool {
        self.base != self.adjusted
    }

    /// Whole days from `today` until the adjusted date (negative if past).
    pub fn days_from(&self, today: NaiveDate) -> i64 {
        (self.adjusted - today).num_days()
    }
}

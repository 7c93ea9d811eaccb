//! Request types for the Cashflow Engine API.
//!
//! This module defines the JSON request bodies for every endpoint.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{UcPaymentInput, sanitize_amount};
use crate::models::{AdjustmentDirection, Frequency, IncomeCategory, IncomeRecord, PaymentAnchor, RecurringRecord};

/// Request body for the `/next-payment-date` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentAnchorRequest {
    /// How often the payment recurs.
    pub frequency: Frequency,
    /// Weekday (1-7) or day of month (1-31) the payment falls on.
    pub anchor_day: u32,
    /// Date to compute from; defaults to the server's local date.
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
    /// Direction used to move the due date off non-business days.
    #[serde(default)]
    pub adjustment_direction: AdjustmentDirection,
    /// Monthly only: target the last working day of the month.
    #[serde(default)]
    pub use_last_working_day_of_month: bool,
}

impl PaymentAnchorRequest {
    /// Builds the anchor, using `today` when no reference date was sent.
    pub fn into_anchor(self, today: NaiveDate) -> PaymentAnchor {
        PaymentAnchor {
            frequency: self.frequency,
            anchor_day: self.anchor_day,
            reference_date: self.reference_date.unwrap_or(today),
            adjustment_direction: self.adjustment_direction,
            use_last_working_day_of_month: self.use_last_working_day_of_month,
        }
    }
}

/// Request body for the `/monthly-summary` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonthlySummaryRequest {
    /// Income sources to estimate take-home pay for.
    #[serde(default)]
    pub incomes: Vec<IncomeRecord>,
    /// Recurring expenses and debts.
    #[serde(default)]
    pub records: Vec<RecurringRecord>,
}

/// Request body for the `/uc-payment` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UcPaymentRequest {
    /// All of the claimant's incomes.
    #[serde(default)]
    pub incomes: Vec<IncomeRecord>,
    /// Monthly entitlement before the taper.
    #[serde(default)]
    pub base: Option<Decimal>,
    /// Monthly earnings ignored by the taper.
    #[serde(default)]
    pub taper_ignore: Option<Decimal>,
    /// Fraction of earnings above the disregard deducted.
    #[serde(default)]
    pub taper_rate: Option<Decimal>,
    /// Recurring records; those flagged `paid_by_uc` reduce the payment.
    #[serde(default)]
    pub records: Vec<RecurringRecord>,
    /// Monthly costs UC pays directly, added to any from `records`.
    #[serde(default)]
    pub paid_by_uc_monthly: Option<Decimal>,
    /// Income categories counted as earnings.
    #[serde(default)]
    pub taxable_categories: Option<Vec<IncomeCategory>>,
}

impl UcPaymentRequest {
    /// Builds the calculation input, folding in costs paid by UC.
    ///
    /// A negative `paid_by_uc_monthly` counts as zero on its own, so it never
    /// cancels costs taken from the records.
    pub fn into_input(self, paid_by_uc_from_records: Decimal) -> UcPaymentInput {
        UcPaymentInput {
            incomes: self.incomes,
            base: self.base,
            taper_ignore: self.taper_ignore,
            taper_rate: self.taper_rate,
            paid_by_uc_monthly: sanitize_amount(self.paid_by_uc_monthly.unwrap_or_default())
                .saturating_add(paid_by_uc_from_records),
            taxable_categories: self.taxable_categories,
        }
    }
}

/// Optional request body for the `/cron/reminders` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReminderRequest {
    /// Date the batch runs for; defaults to the server's local date.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

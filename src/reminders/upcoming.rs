//! Upcoming-payment collection for the reminder batch.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculation::{DueDateResolver, to_monthly};
use crate::error::EngineResult;
use crate::models::{Frequency, PaymentAnchor, RecordKind, RecurringRecord};

use super::RecordRepository;

/// Default number of days ahead a payment is reminded.
pub const DEFAULT_REMINDER_DAYS: i64 = 3;

/// How far ahead of today payments are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderWindow {
    /// Payments due between today and this many days ahead are reported.
    pub days_ahead: i64,
}

impl Default for ReminderWindow {
    fn default() -> Self {
        Self {
            days_ahead: DEFAULT_REMINDER_DAYS,
        }
    }
}

impl ReminderWindow {
    /// Returns true if a payment `days_until` days away is reported.
    pub fn contains(&self, days_until: i64) -> bool {
        (0..=self.days_ahead).contains(&days_until)
    }
}

/// A payment falling inside the reminder window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingPayment {
    /// The record's identifier.
    pub record_id: String,
    /// The record's display name.
    pub name: String,
    /// Income, expense or debt.
    pub kind: RecordKind,
    /// Amount per occurrence.
    pub amount: Decimal,
    /// How often the payment recurs.
    pub frequency: Frequency,
    /// The unadjusted due date.
    pub base_date: NaiveDate,
    /// The business-day due date.
    pub due_date: NaiveDate,
    /// Days from today until `due_date`.
    pub days_until: i64,
    /// `amount` expressed per month.
    pub monthly_equivalent: Decimal,
    /// Outstanding balance, for debts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_balance: Option<Decimal>,
    /// Whole months left to clear the balance at `monthly_equivalent`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub months_remaining: Option<u32>,
}

/// A record the batch could not schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecord {
    /// The record's identifier.
    pub record_id: String,
    /// The record's display name.
    pub name: String,
    /// Why it was skipped.
    pub reason: String,
}

/// Output of one reminder run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderBatch {
    /// The date the batch ran for.
    pub today: NaiveDate,
    /// The window that was applied.
    pub window: ReminderWindow,
    /// Payments due inside the window, soonest first.
    pub upcoming: Vec<UpcomingPayment>,
    /// Records whose schedule was invalid.
    pub skipped: Vec<SkippedRecord>,
}

/// Months needed to clear `balance` paying `monthly` a month, rounded up.
fn months_to_clear(balance: Decimal, monthly: Decimal) -> Option<u32> {
    if monthly <= Decimal::ZERO || balance <= Decimal::ZERO {
        return None;
    }
    balance.checked_div(monthly)?.ceil().to_u32()
}

/// Resolves the next due date of every record with a due day and keeps the
/// ones inside `window`.
///
/// Records without a due day are not scheduled. A record whose anchor is
/// invalid is reported in [`ReminderBatch::skipped`] instead of failing the
/// whole batch.
pub fn collect_upcoming(
    records: &[RecurringRecord],
    today: NaiveDate,
    resolver: &DueDateResolver<'_>,
    window: ReminderWindow,
) -> ReminderBatch {
    let mut upcoming = Vec::new();
    let mut skipped = Vec::new();

    for record in records {
        let Some(due_day) = record.due_day else {
            continue;
        };

        let anchor = PaymentAnchor {
            frequency: record.frequency,
            anchor_day: due_day,
            reference_date: today,
            adjustment_direction: record.adjustment_direction,
            use_last_working_day_of_month: record.use_last_working_day_of_month,
        };

        let next = match resolver.next_payment_date(&anchor) {
            Ok(next) => next,
            Err(err) => {
                warn!(record_id = %record.id, error = %err, "Skipping record with invalid schedule");
                skipped.push(SkippedRecord {
                    record_id: record.id.clone(),
                    name: record.name.clone(),
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let days_until = next.days_from(today);
        if !window.contains(days_until) {
            continue;
        }

        let monthly_equivalent = to_monthly(record.amount, record.frequency);
        let remaining_balance = match record.kind {
            RecordKind::Debt => record.balance,
            _ => None,
        };

        upcoming.push(UpcomingPayment {
            record_id: record.id.clone(),
            name: record.name.clone(),
            kind: record.kind,
            amount: record.amount,
            frequency: record.frequency,
            base_date: next.base,
            due_date: next.adjusted,
            days_until,
            monthly_equivalent,
            remaining_balance,
            months_remaining: remaining_balance
                .and_then(|balance| months_to_clear(balance, monthly_equivalent)),
        });
    }

    upcoming.sort_by(|a, b| a.due_date.cmp(&b.due_date).then_with(|| a.name.cmp(&b.name)));

    ReminderBatch {
        today,
        window,
        upcoming,
        skipped,
    }
}

/// Runs the reminder batch over every record in `repository`.
pub fn run_reminder_batch(
    repository: &dyn RecordRepository,
    today: NaiveDate,
    resolver: &DueDateResolver<'_>,
    window: ReminderWindow,
) -> EngineResult<ReminderBatch> {
    let records = repository.recurring_records()?;
    let batch = collect_upcoming(&records, today, resolver, window);

    info!(
        today = %today,
        records = records.len(),
        upcoming = batch.upcoming.len(),
        skipped = batch.skipped.len(),
        "Reminder batch completed"
    );

    Ok(batch)
}

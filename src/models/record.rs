//! Scheduled expense, debt and income records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AdjustmentDirection, Frequency};

/// What a recurring record represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Money coming in (a payday).
    Income,
    /// A regular bill.
    Expense,
    /// A repayment against an outstanding balance.
    Debt,
}

impl RecordKind {
    /// Returns true for records that cost money.
    pub fn is_outgoing(self) -> bool {
        matches!(self, RecordKind::Expense | RecordKind::Debt)
    }
}

/// A recurring amount with an optional due day, as held by the record source.
///
/// # Example
///
/// ```
/// use cashflow_engine::models::{Frequency, RecordKind, RecurringRecord};
///
/// let json = r#"{
///     "id": "rent",
///     "name": "Rent",
///     "kind": "expense",
///     "amount": "750.00",
///     "frequency": "monthly",
///     "due_day": 1,
///     "paid_by_uc": true
/// }"#;
/// let record: RecurringRecord = serde_json::from_str(json).unwrap();
/// assert_eq!(record.kind, RecordKind::Expense);
/// assert_eq!(record.frequency, Frequency::Monthly);
/// assert!(record.paid_by_uc);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringRecord {
    /// Identifier assigned by the record source.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Whether this is an income, expense or debt.
    pub kind: RecordKind,
    /// Amount per occurrence.
    pub amount: Decimal,
    /// How often the amount recurs.
    pub frequency: Frequency,
    /// Anchor day of the schedule; records without one are never reminded.
    #[serde(default)]
    pub due_day: Option<u32>,
    /// Direction used to move the due date off non-business days.
    #[serde(default)]
    pub adjustment_direction: AdjustmentDirection,
    /// Monthly only: due on the last working day of the month.
    #[serde(default)]
    pub use_last_working_day_of_month: bool,
    /// Paid directly by Universal Credit, so costs nothing out of pocket.
    #[serde(default)]
    pub paid_by_uc: bool,
    /// Remaining balance for debts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<Decimal>,
}

//! Monthly totals of incomes and outgoings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TaxBands;
use crate::models::{IncomeRecord, RecurringRecord};

use super::{estimate_net_monthly, to_monthly};

/// Monthly-equivalent totals of a set of expense and debt records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Every outgoing, including those paid directly by Universal Credit.
    pub gross_monthly: Decimal,
    /// What the household pays itself.
    pub out_of_pocket_monthly: Decimal,
    /// The part of `gross_monthly` Universal Credit pays directly.
    pub paid_by_uc_monthly: Decimal,
}

/// Sums the monthly equivalents of the outgoing records.
///
/// Income records are ignored. A `paid_by_uc` record adds to the gross and
/// UC-paid totals but contributes nothing out of pocket.
///
/// # Example
///
/// ```
/// use cashflow_engine::calculation::summarize_records;
/// use cashflow_engine::models::{AdjustmentDirection, Frequency, RecordKind, RecurringRecord};
/// use rust_decimal::Decimal;
///
/// let rent = RecurringRecord {
///     id: "rent".to_string(),
///     name: "Rent".to_string(),
///     kind: RecordKind::Expense,
///     amount: Decimal::from(750),
///     frequency: Frequency::Monthly,
///     due_day: Some(1),
///     adjustment_direction: AdjustmentDirection::Forward,
///     use_last_working_day_of_month: false,
///     paid_by_uc: true,
///     balance: None,
/// };
///
/// let summary = summarize_records(&[rent]);
/// assert_eq!(summary.gross_monthly, Decimal::from(750));
/// assert_eq!(summary.out_of_pocket_monthly, Decimal::ZERO);
/// ```
pub fn summarize_records(records: &[RecurringRecord]) -> MonthlySummary {
    records
        .iter()
        .filter(|record| record.kind.is_outgoing())
        .fold(MonthlySummary::default(), |mut summary, record| {
            let monthly = to_monthly(record.amount, record.frequency);
            summary.gross_monthly = summary.gross_monthly.saturating_add(monthly);
            if record.paid_by_uc {
                summary.paid_by_uc_monthly = summary.paid_by_uc_monthly.saturating_add(monthly);
            } else {
                summary.out_of_pocket_monthly = summary.out_of_pocket_monthly.saturating_add(monthly);
            }
            summary
        })
}

/// Sums the estimated monthly take-home pay of all incomes, saturating at
/// `Decimal::MAX`.
pub fn total_net_income(incomes: &[IncomeRecord], bands: &TaxBands) -> Decimal {
    incomes
        .iter()
        .enumerate()
        .map(|(index, income)| estimate_net_monthly(income, bands, index as u32 + 1).net_monthly)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

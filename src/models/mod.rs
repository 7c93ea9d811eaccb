//! Core data models for the Cashflow Engine.
//!
//! This module contains the plain records exchanged with callers: schedules,
//! incomes, recurring expense/debt records and audit steps.

mod audit;
mod frequency;
mod income;
mod record;
mod schedule;

pub use audit::AuditStep;
pub use frequency::Frequency;
pub use income::{IncomeCategory, IncomeRecord, IncomeType};
pub use record::{RecordKind, RecurringRecord};
pub use schedule::{AdjustmentDirection, NextPaymentDate, PaymentAnchor};

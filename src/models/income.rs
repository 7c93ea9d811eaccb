//! Income record model and related types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How an income amount is quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeType {
    /// Gross pay per hour; needs `hours_per_week`.
    Hourly,
    /// Take-home pay per month, already net of tax.
    MonthlyNet,
    /// Gross salary per year.
    YearlyGross,
    /// Universal Credit, already monthly and untaxed.
    Uc,
}

/// Classification of an income source for the benefit means test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeCategory {
    /// Main employment.
    Wage,
    /// Self-employed or gig work.
    SideGig,
    /// Additional employment.
    SecondJob,
    /// State benefits.
    Benefit,
    /// Pension income.
    Pension,
    /// Anything else.
    #[default]
    Other,
}

/// A single income source supplied by the caller.
///
/// # Example
///
/// ```
/// use cashflow_engine::models::{IncomeCategory, IncomeRecord, IncomeType};
///
/// let json = r#"{ "type": "hourly", "amount": "12.50", "hours_per_week": "30", "category": "wage" }"#;
/// let income: IncomeRecord = serde_json::from_str(json).unwrap();
/// assert_eq!(income.income_type, IncomeType::Hourly);
/// assert_eq!(income.category, IncomeCategory::Wage);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeRecord {
    /// Optional identifier supplied by the record source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Optional display name (e.g. "Day job").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// How `amount` is quoted.
    #[serde(rename = "type")]
    pub income_type: IncomeType,
    /// The quoted amount. Negative values are treated as zero.
    pub amount: Decimal,
    /// Hours worked per week, only meaningful for hourly incomes.
    #[serde(default)]
    pub hours_per_week: Option<Decimal>,
    /// Means-test classification.
    #[serde(default)]
    pub category: IncomeCategory,
}

impl IncomeRecord {
    /// Creates an unnamed income record.
    pub fn new(income_type: IncomeType, amount: Decimal, category: IncomeCategory) -> Self {
        Self {
            id: None,
            name: None,
            income_type,
            amount,
            hours_per_week: None,
            category,
        }
    }

    /// Sets the weekly hours of an hourly income.
    pub fn with_hours(mut self, hours_per_week: Decimal) -> Self {
        self.hours_per_week = Some(hours_per_week);
        self
    }

    /// Returns true if this income is the benefit itself.
    pub fn is_uc(&self) -> bool {
        self.income_type == IncomeType::Uc
    }
}

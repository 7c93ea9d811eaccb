//! Net income estimation.
//!
//! Estimates monthly take-home pay from gross hourly or yearly figures by
//! applying progressive income tax bands and contribution bands. Figures
//! quoted net (monthly net pay, Universal Credit) pass through unchanged.

use rust_decimal::Decimal;

use crate::config::{BandSchedule, TaxBands};
use crate::models::{AuditStep, IncomeRecord, IncomeType};

use super::{sanitize_amount, sanitize_hours};

/// Weeks per year used to annualise hourly pay.
pub const WEEKS_PER_YEAR: i64 = 52;

/// The result of estimating an income's monthly take-home pay.
#[derive(Debug, Clone)]
pub struct NetIncomeEstimate {
    /// Estimated monthly take-home pay.
    pub net_monthly: Decimal,
    /// Annual gross pay, for incomes quoted gross.
    pub gross_annual: Option<Decimal>,
    /// Annual income tax deducted.
    pub income_tax: Decimal,
    /// Annual contributions deducted.
    pub contributions: Decimal,
    /// The audit step recording this estimate.
    pub audit_step: AuditStep,
}

/// Applies a progressive band schedule to an annual amount.
///
/// Earnings up to `schedule.threshold` are free; each band charges its rate
/// on the slice between the previous limit and its own `upper_limit`.
///
/// # Example
///
/// ```
/// use cashflow_engine::calculation::apply_bands;
/// use cashflow_engine::config::TaxBands;
/// use rust_decimal::Decimal;
///
/// let bands = TaxBands::default();
/// // (24,000 - 12,570) x 20%
/// assert_eq!(apply_bands(Decimal::from(24_000), &bands.income_tax), Decimal::from(2_286));
/// ```
pub fn apply_bands(annual: Decimal, schedule: &BandSchedule) -> Decimal {
    let mut charged = Decimal::ZERO;
    let mut lower = schedule.threshold;

    for band in &schedule.bands {
        if annual <= lower {
            break;
        }
        let top = match band.upper_limit {
            Some(limit) => annual.min(limit),
            None => annual,
        };
        if top > lower {
            charged = charged.saturating_add((top - lower).saturating_mul(band.rate));
        }
        match band.upper_limit {
            Some(limit) => lower = lower.max(limit),
            None => break,
        }
    }

    charged
}

/// Estimates the monthly take-home pay of an income.
///
/// - `monthly_net` and `uc` amounts are returned unchanged
/// - `hourly` amounts are annualised as amount x hours per week x 52; a
///   missing `hours_per_week` counts as zero hours
/// - `yearly_gross` amounts are taxed directly
///
/// Negative amounts and hours are treated as zero. Hours above 168 a week
/// count as 168.
///
/// # Example
///
/// ```
/// use cashflow_engine::calculation::estimate_net_monthly;
/// use cashflow_engine::config::TaxBands;
/// use cashflow_engine::models::{IncomeCategory, IncomeRecord, IncomeType};
/// use rust_decimal::Decimal;
///
/// let salary = IncomeRecord::new(IncomeType::YearlyGross, Decimal::from(24_000), IncomeCategory::Wage);
/// let estimate = estimate_net_monthly(&salary, &TaxBands::default(), 1);
/// assert_eq!(estimate.net_monthly, Decimal::new(16952, 1)); // 1695.20
/// ```
pub fn estimate_net_monthly(
    income: &IncomeRecord,
    bands: &TaxBands,
    step_number: u32,
) -> NetIncomeEstimate {
    let amount = sanitize_amount(income.amount);
    let months = Decimal::from(12);

    let gross_annual = match income.income_type {
        IncomeType::MonthlyNet | IncomeType::Uc => None,
        IncomeType::Hourly => {
            let hours = sanitize_hours(income.hours_per_week.unwrap_or(Decimal::ZERO));
            Some(
                amount
                    .saturating_mul(hours)
                    .saturating_mul(Decimal::from(WEEKS_PER_YEAR)),
            )
        }
        IncomeType::YearlyGross => Some(amount),
    };

    let Some(gross_annual) = gross_annual else {
        return NetIncomeEstimate {
            net_monthly: amount,
            gross_annual: None,
            income_tax: Decimal::ZERO,
            contributions: Decimal::ZERO,
            audit_step: AuditStep {
                step_number,
                rule_id: "net_income".to_string(),
                rule_name: "Net Income Estimate".to_string(),
                input: serde_json::json!({
                    "type": income.income_type,
                    "amount": amount.to_string()
                }),
                output: serde_json::json!({
                    "net_monthly": amount.to_string(),
                    "taxed": false
                }),
                reasoning: format!("Amount £{} is already monthly and net", amount.normalize()),
            },
        };
    };

    let income_tax = apply_bands(gross_annual, &bands.income_tax);
    let contributions = apply_bands(gross_annual, &bands.contributions);
    let net_annual = gross_annual
        .saturating_sub(income_tax)
        .saturating_sub(contributions);
    let net_monthly = net_annual / months;

    let audit_step = AuditStep {
        step_number,
        rule_id: "net_income".to_string(),
        rule_name: "Net Income Estimate".to_string(),
        input: serde_json::json!({
            "type": income.income_type,
            "amount": amount.to_string(),
            "hours_per_week": income.hours_per_week.map(|h| h.to_string()),
            "tax_year": bands.tax_year
        }),
        output: serde_json::json!({
            "gross_annual": gross_annual.normalize().to_string(),
            "income_tax": income_tax.normalize().to_string(),
            "contributions": contributions.normalize().to_string(),
            "net_monthly": net_monthly.round_dp(2).to_string(),
            "taxed": true
        }),
        reasoning: format!(
            "(£{} - £{} tax - £{} contributions) / 12 = £{}",
            gross_annual.normalize(),
            income_tax.normalize(),
            contributions.normalize(),
            net_monthly.round_dp(2)
        ),
    };

    NetIncomeEstimate {
        net_monthly,
        gross_annual: Some(gross_annual),
        income_tax,
        contributions,
        audit_step,
    }
}

//! Universal Credit taper calculation.
//!
//! Computes a means-tested monthly benefit payment: earnings from taxable
//! income categories above a disregard reduce the award by the taper rate,
//! and costs UC already pays directly are taken off what remains.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{BenefitConfig, TaxBands};
use crate::models::{AuditStep, IncomeCategory, IncomeRecord};

use super::{estimate_net_monthly, sanitize_amount};

/// Inputs to [`calculate_uc_payment`].
///
/// `None` for any optional field falls back to the configured default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UcPaymentInput {
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
    /// Monthly costs UC pays directly (e.g., housing costs).
    #[serde(default)]
    pub paid_by_uc_monthly: Decimal,
    /// Income categories counted as earnings.
    #[serde(default)]
    pub taxable_categories: Option<Vec<IncomeCategory>>,
}

/// The result of a taper calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UcPaymentResult {
    /// Monthly payment after the taper; never negative.
    pub payment: Decimal,
    /// Entitlement the taper was applied to.
    pub effective_base: Decimal,
    /// True when a reported UC income replaced the configured base.
    pub base_from_income: bool,
    /// Net monthly earnings counted by the means test.
    pub taxable_income: Decimal,
    /// Amount removed by the taper.
    pub deduction: Decimal,
    /// Disregard that was applied.
    pub taper_ignore: Decimal,
    /// Taper rate that was applied.
    pub taper_rate: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Uses `value` when present and non-negative, otherwise `default`.
fn or_default(value: Option<Decimal>, default: Decimal) -> Decimal {
    match value {
        Some(v) if !v.is_sign_negative() => v,
        _ => default,
    }
}

/// Calculates the monthly Universal Credit payment.
///
/// 1. The first income typed `uc` overrides the base entitlement with its
///    net monthly value.
/// 2. Net monthly values of all other incomes in a taxable category are
///    summed.
/// 3. `deduction = max(0, (taxable - taper_ignore) x taper_rate)`.
/// 4. `payment = max(0, base - deduction - paid_by_uc_monthly)`.
///
/// # Example
///
/// ```
/// use cashflow_engine::calculation::{UcPaymentInput, calculate_uc_payment};
/// use cashflow_engine::config::{BenefitConfig, TaxBands};
/// use cashflow_engine::models::{IncomeCategory, IncomeRecord, IncomeType};
/// use rust_decimal::Decimal;
///
/// let input = UcPaymentInput {
///     incomes: vec![IncomeRecord::new(IncomeType::MonthlyNet, Decimal::from(1000), IncomeCategory::Wage)],
///     base: Some(Decimal::from(800)),
///     ..Default::default()
/// };
///
/// let result = calculate_uc_payment(&input, &BenefitConfig::default(), &TaxBands::default(), 1);
/// assert_eq!(result.payment, Decimal::new(47605, 2)); // 476.05
/// ```
pub fn calculate_uc_payment(
    input: &UcPaymentInput,
    config: &BenefitConfig,
    bands: &TaxBands,
    step_number: u32,
) -> UcPaymentResult {
    let taper_ignore = or_default(input.taper_ignore, config.taper_ignore);
    let taper_rate = or_default(input.taper_rate, config.taper_rate);
    let taxable_categories: HashSet<IncomeCategory> = input
        .taxable_categories
        .as_deref()
        .unwrap_or(config.taxable_categories.as_slice())
        .iter()
        .copied()
        .collect();

    let reported_uc = input.incomes.iter().position(IncomeRecord::is_uc);

    let (effective_base, base_from_income) = match reported_uc {
        Some(index) => (
            estimate_net_monthly(&input.incomes[index], bands, step_number).net_monthly,
            true,
        ),
        None => (
            sanitize_amount(input.base.unwrap_or(config.standard_allowance)),
            false,
        ),
    };

    let taxable_income: Decimal = input
        .incomes
        .iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != reported_uc)
        .filter(|(_, income)| taxable_categories.contains(&income.category))
        .map(|(_, income)| estimate_net_monthly(income, bands, step_number).net_monthly)
        .fold(Decimal::ZERO, Decimal::saturating_add);

    // or_default keeps taper_rate non-negative
    let deduction = taxable_income
        .saturating_sub(taper_ignore)
        .max(Decimal::ZERO)
        .saturating_mul(taper_rate);
    let paid_by_uc = sanitize_amount(input.paid_by_uc_monthly);
    let payment = effective_base
        .saturating_sub(deduction)
        .saturating_sub(paid_by_uc)
        .max(Decimal::ZERO);
    let base_source = if base_from_income {
        "reported_income"
    } else {
        "configured"
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "uc_taper".to_string(),
        rule_name: "Universal Credit Taper".to_string(),
        input: serde_json::json!({
            "base": effective_base.normalize().to_string(),
            "base_source": base_source,
            "taxable_income": taxable_income.round_dp(2).normalize().to_string(),
            "taper_ignore": taper_ignore.normalize().to_string(),
            "taper_rate": taper_rate.normalize().to_string(),
            "paid_by_uc_monthly": paid_by_uc.normalize().to_string()
        }),
        output: serde_json::json!({
            "deduction": deduction.round_dp(2).normalize().to_string(),
            "payment": payment.round_dp(2).normalize().to_string()
        }),
        reasoning: format!(
            "£{} - max(0, (£{} - £{}) x {}) - £{} = £{}",
            effective_base.normalize(),
            taxable_income.round_dp(2).normalize(),
            taper_ignore.normalize(),
            taper_rate.normalize(),
            paid_by_uc.normalize(),
            payment.round_dp(2).normalize()
        ),
    };

    UcPaymentResult {
        payment,
        effective_base,
        base_from_income,
        taxable_income,
        deduction,
        taper_ignore,
        taper_rate,
        audit_step,
    }
}

//! Frequency normalization.
//!
//! Converts amounts between their quoted frequency and a monthly equivalent
//! using calendar-average factors (a week is 52/12 of a month whatever month
//! it is evaluated in). Both directions share [`Frequency::monthly_ratio`].
//!
//! Amounts are clamped to [`MAX_AMOUNT`] before any arithmetic, so the
//! conversions (and the sums built on them) stay inside `Decimal`'s range.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::models::Frequency;

/// Largest amount the engine calculates with: one quadrillion pounds.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Most hours a week can hold.
pub const MAX_HOURS_PER_WEEK: Decimal = Decimal::from_parts(168, 0, 0, false, 0);

/// Clamps a caller-supplied amount to a usable value.
///
/// Negatives become zero and anything above [`MAX_AMOUNT`] becomes
/// [`MAX_AMOUNT`].
pub fn sanitize_amount(amount: Decimal) -> Decimal {
    amount.clamp(Decimal::ZERO, MAX_AMOUNT)
}

/// Clamps weekly hours to `0..=168`.
pub fn sanitize_hours(hours: Decimal) -> Decimal {
    hours.clamp(Decimal::ZERO, MAX_HOURS_PER_WEEK)
}

/// Converts raw floating-point input into an amount.
///
/// NaN, infinities and negative values all become zero.
///
/// # Example
///
/// ```
/// use cashflow_engine::calculation::sanitize_amount_f64;
/// use rust_decimal::Decimal;
///
/// assert_eq!(sanitize_amount_f64(f64::NAN), Decimal::ZERO);
/// assert_eq!(sanitize_amount_f64(-5.0), Decimal::ZERO);
/// assert_eq!(sanitize_amount_f64(12.5), Decimal::new(125, 1));
/// ```
pub fn sanitize_amount_f64(amount: f64) -> Decimal {
    if !amount.is_finite() {
        return Decimal::ZERO;
    }
    Decimal::from_f64(amount)
        .map(sanitize_amount)
        .unwrap_or(Decimal::ZERO)
}

/// Converts an amount paid at `frequency` into its monthly equivalent.
///
/// # Example
///
/// ```
/// use cashflow_engine::calculation::to_monthly;
/// use cashflow_engine::models::Frequency;
/// use rust_decimal::Decimal;
///
/// let monthly = to_monthly(Decimal::from(100), Frequency::Weekly);
/// assert_eq!(monthly.round_dp(2), Decimal::new(43333, 2));
/// ```
pub fn to_monthly(amount: Decimal, frequency: Frequency) -> Decimal {
    let (numerator, denominator) = frequency.monthly_ratio();
    scale(sanitize_amount(amount), numerator, denominator)
}

/// Converts a monthly amount into the equivalent amount paid at `frequency`.
pub fn from_monthly(amount: Decimal, frequency: Frequency) -> Decimal {
    let (numerator, denominator) = frequency.monthly_ratio();
    scale(sanitize_amount(amount), denominator, numerator)
}

/// `amount x numerator / denominator`, saturating at `Decimal::MAX`.
fn scale(amount: Decimal, numerator: Decimal, denominator: Decimal) -> Decimal {
    amount
        .checked_mul(numerator)
        .and_then(|product| product.checked_div(denominator))
        .unwrap_or(Decimal::MAX)
}

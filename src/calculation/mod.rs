//! Calculation logic for the Cashflow Engine.
//!
//! This module contains the holiday calendar and business-day adjustment,
//! due-date resolution for recurring payments, frequency normalization,
//! net income estimation, the Universal Credit taper, and monthly totals.
//! Every function here is pure and synchronous.

mod benefit_taper;
mod business_day;
mod due_date;
mod frequency_normalizer;
mod holiday_calendar;
mod monthly_summary;
mod net_income;

pub use benefit_taper::{UcPaymentInput, UcPaymentResult, calculate_uc_payment};
pub use business_day::{adjust_to_business_day, is_weekend};
pub use due_date::DueDateResolver;
pub use frequency_normalizer::{
    MAX_AMOUNT, MAX_HOURS_PER_WEEK, from_monthly, sanitize_amount, sanitize_amount_f64,
    sanitize_hours, to_monthly,
};
pub use holiday_calendar::HolidayCalendar;
pub use monthly_summary::{MonthlySummary, summarize_records, total_net_income};
pub use net_income::{NetIncomeEstimate, WEEKS_PER_YEAR, apply_bands, estimate_net_monthly};

//! Due-date resolution for recurring payments.
//!
//! [`DueDateResolver`] computes the next occurrence of a [`PaymentAnchor`]
//! strictly after its reference date, then rolls it onto a business day
//! using the holiday calendar it was constructed with.
//!
//! Day-of-month anchors that do not exist in the target month are clamped to
//! the month's last day (31 in February 2025 resolves to 2025-02-28). The
//! anchor is re-applied to every month it is projected into, so a clamped
//! month never shifts later ones.

use chrono::{Datelike, Days, Months, NaiveDate};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{AdjustmentDirection, Frequency, NextPaymentDate, PaymentAnchor};

use super::{HolidayCalendar, adjust_to_business_day};

/// Resolves payment anchors against an injected holiday calendar.
///
/// # Example
///
/// ```
/// use cashflow_engine::calculation::{DueDateResolver, HolidayCalendar};
/// use cashflow_engine::models::{AdjustmentDirection, Frequency, PaymentAnchor};
/// use chrono::NaiveDate;
///
/// let calendar = HolidayCalendar::empty();
/// let resolver = DueDateResolver::new(&calendar);
///
/// let anchor = PaymentAnchor {
///     frequency: Frequency::Monthly,
///     anchor_day: 15,
///     reference_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
///     adjustment_direction: AdjustmentDirection::Forward,
///     use_last_working_day_of_month: false,
/// };
///
/// let next = resolver.next_payment_date(&anchor).unwrap();
/// // The 15th is a Saturday, so the payment moves to Monday the 17th.
/// assert_eq!(next.base, NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
/// assert_eq!(next.adjusted, NaiveDate::from_ymd_opt(2025, 3, 17).unwrap());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DueDateResolver<'a> {
    calendar: &'a HolidayCalendar,
}

impl<'a> DueDateResolver<'a> {
    /// Creates a resolver using `calendar` for business-day adjustment.
    pub fn new(calendar: &'a HolidayCalendar) -> Self {
        Self { calendar }
    }

    /// Returns the calendar this resolver adjusts against.
    pub fn calendar(&self) -> &'a HolidayCalendar {
        self.calendar
    }

    /// Computes the next occurrence of `anchor`.
    ///
    /// # Returns
    ///
    /// The unadjusted `base` date, always strictly after the reference date,
    /// and the business-day `adjusted` date. Fails with:
    /// - `InvalidArgument` when `anchor_day` is outside 1-7 for weekly
    ///   schedules or 1-31 for monthly, quarterly and yearly ones
    /// - `CalculationError` when the date leaves chrono's supported range
    pub fn next_payment_date(&self, anchor: &PaymentAnchor) -> EngineResult<NextPaymentDate> {
        let reference = anchor.reference_date;

        if anchor.frequency.uses_day_of_month() {
            validate_day_of_month(anchor.anchor_day)?;
        }

        if anchor.use_last_working_day_of_month && anchor.frequency == Frequency::Monthly {
            let base = self.next_last_working_day(reference)?;
            let adjusted =
                adjust_to_business_day(base, anchor.adjustment_direction, self.calendar);
            return Ok(NextPaymentDate { base, adjusted });
        }

        let base = match anchor.frequency {
            Frequency::Weekly => next_weekday(reference, anchor.anchor_day)?,
            Frequency::Fortnightly => add_days(reference, 14)?,
            Frequency::FourWeekly => add_days(reference, 28)?,
            Frequency::Monthly => next_day_of_month(reference, anchor.anchor_day, 1)?,
            Frequency::Quarterly => next_day_of_month(reference, anchor.anchor_day, 3)?,
            Frequency::Yearly => next_day_of_month(reference, anchor.anchor_day, 12)?,
        };

        let next = NextPaymentDate {
            base,
            adjusted: adjust_to_business_day(base, anchor.adjustment_direction, self.calendar),
        };
        if next.was_adjusted() {
            debug!(
                base = %next.base,
                adjusted = %next.adjusted,
                holiday = self.calendar.holiday_name(base).unwrap_or("weekend"),
                "Moved due date onto a business day"
            );
        }

        Ok(next)
    }

    /// Last working day of the reference month if still ahead, otherwise of
    /// the following month.
    fn next_last_working_day(&self, reference: NaiveDate) -> EngineResult<NaiveDate> {
        let this_month = self.last_working_day(reference.year(), reference.month())?;
        if this_month > reference {
            return Ok(this_month);
        }
        let (year, month) = shift_month(reference.year(), reference.month(), 1);
        self.last_working_day(year, month)
    }

    fn last_working_day(&self, year: i32, month: u32) -> EngineResult<NaiveDate> {
        let last = last_day_of_month(year, month)?;
        Ok(adjust_to_business_day(
            last,
            AdjustmentDirection::Backward,
            self.calendar,
        ))
    }
}

fn out_of_range(what: impl std::fmt::Display) -> EngineError {
    EngineError::CalculationError {
        message: format!("date out of range: {}", what),
    }
}

fn validate_day_of_month(anchor_day: u32) -> EngineResult<()> {
    if (1..=31).contains(&anchor_day) {
        Ok(())
    } else {
        Err(EngineError::invalid_argument(
            "anchor_day",
            format!("day of month must be between 1 and 31, got {}", anchor_day),
        ))
    }
}

fn add_days(date: NaiveDate, days: u64) -> EngineResult<NaiveDate> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| out_of_range(format!("{} + {} days", date, days)))
}

/// Next date after `reference` falling on ISO weekday `anchor_day`
/// (1 = Monday .. 7 = Sunday). The reference date itself never qualifies.
fn next_weekday(reference: NaiveDate, anchor_day: u32) -> EngineResult<NaiveDate> {
    if !(1..=7).contains(&anchor_day) {
        return Err(EngineError::invalid_argument(
            "anchor_day",
            format!("weekday must be between 1 and 7, got {}", anchor_day),
        ));
    }

    let current = reference.weekday().number_from_monday();
    let days_ahead = match (anchor_day + 7 - current) % 7 {
        0 => 7,
        days => days,
    };
    add_days(reference, u64::from(days_ahead))
}

/// Next occurrence of day `anchor_day` strictly after `reference`, stepping
/// `step_months` at a time. `anchor_day` must already be validated.
fn next_day_of_month(
    reference: NaiveDate,
    anchor_day: u32,
    step_months: u32,
) -> EngineResult<NaiveDate> {
    let candidate = day_in_month(reference.year(), reference.month(), anchor_day)?;
    if candidate > reference {
        return Ok(candidate);
    }

    let (year, month) = shift_month(reference.year(), reference.month(), step_months);
    day_in_month(year, month, anchor_day)
}

/// Day `anchor_day` of the given month, clamped to the month's length.
fn day_in_month(year: i32, month: u32, anchor_day: u32) -> EngineResult<NaiveDate> {
    let last = last_day_of_month(year, month)?;
    let day = anchor_day.min(last.day());
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| out_of_range(format!("{}-{:02}-{:02}", year, month, day)))
}

fn last_day_of_month(year: i32, month: u32) -> EngineResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next_first| next_first.pred_opt())
        .ok_or_else(|| out_of_range(format!("{}-{:02}", year, month)))
}

fn shift_month(year: i32, month: u32, offset: u32) -> (i32, u32) {
    let index = month - 1 + offset;
    (year + (index / 12) as i32, index % 12 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn anchor(frequency: Frequency, anchor_day: u32, reference_date: NaiveDate) -> PaymentAnchor {
        PaymentAnchor {
            frequency,
            anchor_day,
            reference_date,
            adjustment_direction: AdjustmentDirection::Forward,
            use_last_working_day_of_month: false,
        }
    }

    fn resolve(calendar: &HolidayCalendar, anchor: &PaymentAnchor) -> NextPaymentDate {
        DueDateResolver::new(calendar).next_payment_date(anchor).unwrap()
    }

    #[test]
    fn test_monthly_saturday_rolls_forward_to_monday() {
        let calendar = HolidayCalendar::empty();
        let next = resolve(&calendar, &anchor(Frequency::Monthly, 15, date(2025, 3, 10)));

        assert_eq!(next.base, date(2025, 3, 15));
        assert_eq!(next.adjusted, date(2025, 3, 17));
    }

    #[test]
    fn test_monthly_christmas_rolls_past_bank_holidays() {
        let calendar = HolidayCalendar::from_dates([date(2025, 12, 25), date(2025, 12, 26)]);
        let next = resolve(&calendar, &anchor(Frequency::Monthly, 25, date(2025, 12, 1)));

        assert_eq!(next.base, date(2025, 12, 25));
        assert_eq!(next.adjusted, date(2025, 12, 29));
    }

    #[test]
    fn test_monthly_passed_day_rolls_to_next_month() {
        let calendar = HolidayCalendar::empty();
        let next = resolve(&calendar, &anchor(Frequency::Monthly, 10, date(2025, 2, 20)));

        assert_eq!(next.base, date(2025, 3, 10));
        assert_eq!(next.adjusted, date(2025, 3, 10));
    }

    #[test]
    fn test_monthly_same_day_is_not_returned() {
        let calendar = HolidayCalendar::empty();
        let next = resolve(&calendar, &anchor(Frequency::Monthly, 10, date(2025, 3, 10)));

        assert_eq!(next.base, date(2025, 4, 10));
    }

    #[test]
    fn test_monthly_december_rolls_into_january() {
        let calendar = HolidayCalendar::empty();
        let next = resolve(&calendar, &anchor(Frequency::Monthly, 5, date(2025, 12, 20)));

        assert_eq!(next.base, date(2026, 1, 5));
    }

    #[test]
    fn test_day_31_in_february_clamps_to_month_end() {
        let calendar = HolidayCalendar::empty();
        let next = resolve(&calendar, &anchor(Frequency::Monthly, 31, date(2025, 2, 10)));

        assert_eq!(next.base, date(2025, 2, 28));
    }

    #[test]
    fn test_day_31_in_leap_february_clamps_to_29th() {
        let calendar = HolidayCalendar::empty();
        let next = resolve(&calendar, &anchor(Frequency::Monthly, 31, date(2028, 2, 1)));

        assert_eq!(next.base, date(2028, 2, 29));
    }

    #[test]
    fn test_clamped_month_does_not_drift_following_month() {
        let calendar = HolidayCalendar::empty();
        let next = resolve(&calendar, &anchor(Frequency::Monthly, 31, date(2025, 2, 28)));

        assert_eq!(next.base, date(2025, 3, 31));
    }

    #[test]
    fn test_day_31_rolling_into_30_day_month() {
        let calendar = HolidayCalendar::empty();
        let next = resolve(&calendar, &anchor(Frequency::Monthly, 31, date(2025, 3, 31)));

        assert_eq!(next.base, date(2025, 4, 30));
    }

    #[test]
    fn test_weekly_next_matching_weekday() {
        let calendar = HolidayCalendar::empty();
        // 2025-03-10 is a Monday; anchor Friday (5)
        let next = resolve(&calendar, &anchor(Frequency::Weekly, 5, date(2025, 3, 10)));

        assert_eq!(next.base, date(2025, 3, 14));
    }

    #[test]
    fn test_weekly_same_weekday_advances_a_week() {
        let calendar = HolidayCalendar::empty();
        let next = resolve(&calendar, &anchor(Frequency::Weekly, 1, date(2025, 3, 10)));

        assert_eq!(next.base, date(2025, 3, 17));
    }

    #[test]
    fn test_weekly_sunday_anchor_rolls_forward() {
        let calendar = HolidayCalendar::empty();
        let next = resolve(&calendar, &anchor(Frequency::Weekly, 7, date(2025, 3, 10)));

        assert_eq!(next.base, date(2025, 3, 16));
        assert_eq!(next.adjusted, date(2025, 3, 17));
    }

    #[test]
    fn test_weekly_out_of_range_anchor_is_rejected() {
        let calendar = HolidayCalendar::empty();
        let resolver = DueDateResolver::new(&calendar);

        for day in [0, 8, 31] {
            let result = resolver.next_payment_date(&anchor(Frequency::Weekly, day, date(2025, 3, 10)));
            match result {
                Err(EngineError::InvalidArgument { field, .. }) => assert_eq!(field, "anchor_day"),
                other => panic!("Expected InvalidArgument, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_monthly_out_of_range_anchor_is_rejected() {
        let calendar = HolidayCalendar::empty();
        let resolver = DueDateResolver::new(&calendar);

        for frequency in [Frequency::Monthly, Frequency::Quarterly, Frequency::Yearly] {
            assert!(matches!(
                resolver.next_payment_date(&anchor(frequency, 0, date(2025, 3, 10))),
                Err(EngineError::InvalidArgument { .. })
            ));
            assert!(matches!(
                resolver.next_payment_date(&anchor(frequency, 32, date(2025, 3, 10))),
                Err(EngineError::InvalidArgument { .. })
            ));
        }
    }

    #[test]
    fn test_fortnightly_ignores_anchor_day() {
        let calendar = HolidayCalendar::empty();
        let next = resolve(&calendar, &anchor(Frequency::Fortnightly, 0, date(2025, 3, 10)));

        assert_eq!(next.base, date(2025, 3, 24));
    }

    #[test]
    fn test_four_weekly_adds_28_days() {
        let calendar = HolidayCalendar::empty();
        let next = resolve(&calendar, &anchor(Frequency::FourWeekly, 99, date(2025, 3, 10)));

        assert_eq!(next.base, date(2025, 4, 7));
    }

    #[test]
    fn test_quarterly_advances_three_months() {
        let calendar = HolidayCalendar::empty();
        let next = resolve(&calendar, &anchor(Frequency::Quarterly, 1, date(2025, 11, 15)));

        assert_eq!(next.base, date(2026, 2, 1));
        // 2026-02-01 is a Sunday
        assert_eq!(next.adjusted, date(2026, 2, 2));
    }

    #[test]
    fn test_quarterly_upcoming_day_this_month() {
        let calendar = HolidayCalendar::empty();
        let next = resolve(&calendar, &anchor(Frequency::Quarterly, 20, date(2025, 11, 15)));

        assert_eq!(next.base, date(2025, 11, 20));
    }

    #[test]
    fn test_yearly_advances_one_year() {
        let calendar = HolidayCalendar::empty();
        let next = resolve(&calendar, &anchor(Frequency::Yearly, 5, date(2025, 6, 10)));

        assert_eq!(next.base, date(2026, 6, 5));
    }

    #[test]
    fn test_last_working_day_still_validates_anchor_day() {
        let calendar = HolidayCalendar::empty();
        let mut schedule = anchor(Frequency::Monthly, 0, date(2025, 3, 10));
        schedule.use_last_working_day_of_month = true;

        assert!(matches!(
            DueDateResolver::new(&calendar).next_payment_date(&schedule),
            Err(EngineError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_resolved_dates_report_adjustment() {
        let calendar = HolidayCalendar::empty();

        // 2025-03-15 is a Saturday, 2025-03-14 a Friday
        assert!(resolve(&calendar, &anchor(Frequency::Monthly, 15, date(2025, 3, 10))).was_adjusted());
        assert!(!resolve(&calendar, &anchor(Frequency::Monthly, 14, date(2025, 3, 10))).was_adjusted());
    }

    #[test]
    fn test_last_working_day_this_month() {
        let calendar = HolidayCalendar::empty();
        let mut schedule = anchor(Frequency::Monthly, 31, date(2025, 8, 10));
        schedule.adjustment_direction = AdjustmentDirection::Backward;
        schedule.use_last_working_day_of_month = true;

        let next = resolve(&calendar, &schedule);
        // 2025-08-31 is a Sunday
        assert_eq!(next.base, date(2025, 8, 29));
        assert_eq!(next.adjusted, date(2025, 8, 29));
    }

    #[test]
    fn test_last_working_day_already_passed_uses_next_month() {
        let calendar = HolidayCalendar::empty();
        let mut schedule = anchor(Frequency::Monthly, 31, date(2025, 8, 29));
        schedule.use_last_working_day_of_month = true;

        let next = resolve(&calendar, &schedule);
        assert_eq!(next.base, date(2025, 9, 30));
    }

    #[test]
    fn test_last_working_day_skips_holidays() {
        let calendar = HolidayCalendar::from_dates([date(2026, 12, 31)]);
        let mut schedule = anchor(Frequency::Monthly, 1, date(2026, 12, 1));
        schedule.use_last_working_day_of_month = true;

        let next = resolve(&calendar, &schedule);
        assert_eq!(next.base, date(2026, 12, 30));
    }

    #[test]
    fn test_last_working_day_flag_ignored_for_weekly() {
        let calendar = HolidayCalendar::empty();
        let mut schedule = anchor(Frequency::Weekly, 3, date(2025, 8, 10));
        schedule.use_last_working_day_of_month = true;

        let next = resolve(&calendar, &schedule);
        assert_eq!(next.base, date(2025, 8, 13));
    }

    #[test]
    fn test_backward_adjustment_moves_before_base() {
        let calendar = HolidayCalendar::empty();
        let mut schedule = anchor(Frequency::Monthly, 15, date(2025, 3, 10));
        schedule.adjustment_direction = AdjustmentDirection::Backward;

        let next = resolve(&calendar, &schedule);
        assert_eq!(next.base, date(2025, 3, 15));
        assert_eq!(next.adjusted, date(2025, 3, 14));
    }

    #[test]
    fn test_shift_month_wraps_year() {
        assert_eq!(shift_month(2025, 11, 3), (2026, 2));
        assert_eq!(shift_month(2025, 12, 12), (2026, 12));
        assert_eq!(shift_month(2025, 1, 1), (2025, 2));
    }
}

//! Business-day adjustment.
//!
//! Moves a date off weekends and holidays in a given direction.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::models::AdjustmentDirection;

use super::HolidayCalendar;

/// Returns true for Saturdays and Sundays.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Rolls `date` onto the nearest business day in `direction`.
///
/// A date that is already a business day is returned unchanged. The walk
/// always terminates: weekends recur every seven days and the holiday table
/// is finite.
///
/// # Example
///
/// ```
/// use cashflow_engine::calculation::{HolidayCalendar, adjust_to_business_day};
/// use cashflow_engine::models::AdjustmentDirection;
/// use chrono::NaiveDate;
///
/// let calendar = HolidayCalendar::empty();
/// // 2025-03-15 is a Saturday
/// let saturday = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
///
/// let forward = adjust_to_business_day(saturday, AdjustmentDirection::Forward, &calendar);
/// assert_eq!(forward, NaiveDate::from_ymd_opt(2025, 3, 17).unwrap());
///
/// let backward = adjust_to_business_day(saturday, AdjustmentDirection::Backward, &calendar);
/// assert_eq!(backward, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
/// ```
pub fn adjust_to_business_day(
    date: NaiveDate,
    direction: AdjustmentDirection,
    calendar: &HolidayCalendar,
) -> NaiveDate {
    let mut current = date;
    while !calendar.is_business_day(current) {
        let next = match direction {
            AdjustmentDirection::Forward => current.checked_add_days(Days::new(1)),
            AdjustmentDirection::Backward => current.checked_sub_days(Days::new(1)),
        };
        match next {
            Some(next) => current = next,
            // Edge of chrono's representable range
            None => break,
        }
    }
    current
}

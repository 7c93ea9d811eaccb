//! Jurisdiction holiday table.
//!
//! A [`HolidayCalendar`] is built once from configuration and shared
//! read-only by everything that needs business-day arithmetic.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::config::CalendarConfig;

use super::business_day::is_weekend;

/// An immutable set of non-business dates for one jurisdiction.
///
/// Lookups are O(1). Dates outside the loaded years are simply not
/// holidays; use [`HolidayCalendar::covers`] to tell the two cases apart.
///
/// # Example
///
/// ```
/// use cashflow_engine::calculation::HolidayCalendar;
/// use chrono::NaiveDate;
///
/// let christmas = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
/// let calendar = HolidayCalendar::from_dates([christmas]);
///
/// assert!(calendar.is_holiday(christmas));
/// assert!(!calendar.is_business_day(christmas));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    jurisdiction: String,
    version: String,
    holidays: HashMap<NaiveDate, String>,
}

impl HolidayCalendar {
    /// Creates a calendar from named holidays.
    pub fn new(
        jurisdiction: impl Into<String>,
        version: impl Into<String>,
        holidays: impl IntoIterator<Item = (NaiveDate, String)>,
    ) -> Self {
        Self {
            jurisdiction: jurisdiction.into(),
            version: version.into(),
            holidays: holidays.into_iter().collect(),
        }
    }

    /// Creates an anonymous calendar from bare dates.
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self::new(
            "custom",
            "0",
            dates.into_iter().map(|date| (date, "Holiday".to_string())),
        )
    }

    /// A calendar where only weekends are non-business days.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if `date` is a recognised holiday.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains_key(&date)
    }

    /// Returns the holiday's name, if `date` is one.
    pub fn holiday_name(&self, date: NaiveDate) -> Option<&str> {
        self.holidays.get(&date).map(String::as_str)
    }

    /// Returns true if `date` is neither a weekend nor a holiday.
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        !is_weekend(date) && !self.is_holiday(date)
    }

    /// Returns true if `date` falls in a year the table was loaded for.
    pub fn covers(&self, date: NaiveDate) -> bool {
        let years = self.holidays.keys().map(|d| d.year());
        match (years.clone().min(), years.max()) {
            (Some(first), Some(last)) => (first..=last).contains(&date.year()),
            _ => false,
        }
    }

    /// The jurisdiction this table belongs to.
    pub fn jurisdiction(&self) -> &str {
        &self.jurisdiction
    }

    /// The table version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Number of holidays in the table.
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    /// Returns true if the table holds no holidays.
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }
}

impl From<CalendarConfig> for HolidayCalendar {
    fn from(config: CalendarConfig) -> Self {
        Self::new(
            config.jurisdiction,
            config.version,
            config.holidays.into_iter().map(|h| (h.date, h.name)),
        )
    }
}

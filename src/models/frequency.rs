//! Payment frequency model.
//!
//! [`Frequency`] carries the single conversion table used to move amounts
//! between their quoted frequency and a calendar-average monthly value.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How often a recurring amount is paid or received.
///
/// # Example
///
/// ```
/// use cashflow_engine::models::Frequency;
///
/// let frequency: Frequency = serde_json::from_str("\"four_weekly\"").unwrap();
/// assert_eq!(frequency, Frequency::FourWeekly);
/// assert_eq!(frequency.label(), "every 4 weeks");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Every week, anchored to a weekday.
    Weekly,
    /// Every 14 days from the reference date.
    Fortnightly,
    /// Every 28 days from the reference date.
    FourWeekly,
    /// Every calendar month, anchored to a day of the month.
    Monthly,
    /// Every three calendar months.
    Quarterly,
    /// Every calendar year.
    Yearly,
}

impl Frequency {
    /// All frequencies, in ascending period length.
    pub const ALL: [Frequency; 6] = [
        Frequency::Weekly,
        Frequency::Fortnightly,
        Frequency::FourWeekly,
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::Yearly,
    ];

    /// Returns the `(numerator, denominator)` pair that converts one payment
    /// at this frequency into its monthly equivalent.
    ///
    /// Monthly-to-frequency conversion uses the same pair swapped, so the two
    /// directions can never drift apart.
    pub fn monthly_ratio(self) -> (Decimal, Decimal) {
        let (numerator, denominator): (i64, i64) = match self {
            Frequency::Weekly => (52, 12),
            Frequency::Fortnightly => (26, 12),
            Frequency::FourWeekly => (13, 12),
            Frequency::Monthly => (1, 1),
            Frequency::Quarterly => (1, 3),
            Frequency::Yearly => (1, 12),
        };
        (Decimal::from(numerator), Decimal::from(denominator))
    }

    /// Human-readable label for digests and summaries.
    pub fn label(self) -> &'static str {
        match self {
            Frequency::Weekly => "weekly",
            Frequency::Fortnightly => "fortnightly",
            Frequency::FourWeekly => "every 4 weeks",
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
            Frequency::Yearly => "yearly",
        }
    }

    /// Returns true when the anchor day is a day of the month.
    pub fn uses_day_of_month(self) -> bool {
        matches!(
            self,
            Frequency::Monthly | Frequency::Quarterly | Frequency::Yearly
        )
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_uses_snake_case() {
        assert_eq!(
            serde_json::to_string(&Frequency::FourWeekly).unwrap(),
            "\"four_weekly\""
        );
        assert_eq!(
            serde_json::to_string(&Frequency::Fortnightly).unwrap(),
            "\"fortnightly\""
        );
    }

    #[test]
    fn test_unknown_frequency_is_rejected() {
        let result = serde_json::from_str::<Frequency>("\"daily\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_monthly_ratio_for_weekly() {
        let (numerator, denominator) = Frequency::Weekly.monthly_ratio();
        assert_eq!(numerator, Decimal::from(52));
        assert_eq!(denominator, Decimal::from(12));
    }

    #[test]
    fn test_monthly_is_identity() {
        let (numerator, denominator) = Frequency::Monthly.monthly_ratio();
        assert_eq!(numerator, denominator);
    }

    #[test]
    fn test_uses_day_of_month() {
        assert!(Frequency::Monthly.uses_day_of_month());
        assert!(Frequency::Quarterly.uses_day_of_month());
        assert!(Frequency::Yearly.uses_day_of_month());
        assert!(!Frequency::Weekly.uses_day_of_month());
        assert!(!Frequency::Fortnightly.uses_day_of_month());
        assert!(!Frequency::FourWeekly.uses_day_of_month());
    }
}

//! Configuration types for the Cashflow Engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. The tax and benefit
//! structures carry built-in defaults for the 2025/26 UK tax year.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::HolidayCalendar;
use crate::models::IncomeCategory;

/// A single entry of the holiday table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayEntry {
    /// The holiday date.
    pub date: NaiveDate,
    /// The holiday name (e.g., "Christmas Day").
    pub name: String,
}

/// Holiday table configuration from calendar.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// The jurisdiction the table applies to (e.g., "england-and-wales").
    pub jurisdiction: String,
    /// Version of the table; bump it whenever dates are appended.
    pub version: String,
    /// The non-business days.
    #[serde(default)]
    pub holidays: Vec<HolidayEntry>,
}

/// One slice of a progressive band schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBand {
    /// The band name (e.g., "basic").
    pub name: String,
    /// Upper bound of the band in annual earnings; `None` for the top band.
    #[serde(default)]
    pub upper_limit: Option<Decimal>,
    /// The rate applied to earnings inside the band (e.g., 0.20).
    pub rate: Decimal,
}

impl TaxBand {
    fn new(name: &str, upper_limit: Option<i64>, rate: Decimal) -> Self {
        Self {
            name: name.to_string(),
            upper_limit: upper_limit.map(Decimal::from),
            rate,
        }
    }
}

/// A tax-free threshold followed by bands in ascending order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandSchedule {
    /// Annual earnings below this are not charged.
    pub threshold: Decimal,
    /// Bands starting at `threshold`, each ending at its `upper_limit`.
    pub bands: Vec<TaxBand>,
}

/// Income tax and contribution bands from tax.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBands {
    /// The tax year these bands apply to (e.g., "2025-26").
    pub tax_year: String,
    /// Income tax: personal allowance, then basic/higher/additional rates.
    pub income_tax: BandSchedule,
    /// National Insurance style contributions.
    pub contributions: BandSchedule,
}

impl Default for TaxBands {
    fn default() -> Self {
        Self {
            tax_year: "2025-26".to_string(),
            income_tax: BandSchedule {
                threshold: Decimal::from(12_570),
                bands: vec![
                    TaxBand::new("basic", Some(50_270), Decimal::new(20, 2)),
                    TaxBand::new("higher", Some(125_140), Decimal::new(40, 2)),
                    TaxBand::new("additional", None, Decimal::new(45, 2)),
                ],
            },
            contributions: BandSchedule {
                threshold: Decimal::from(12_570),
                bands: vec![
                    TaxBand::new("main", Some(50_270), Decimal::new(12, 2)),
                    TaxBand::new("upper", None, Decimal::new(2, 2)),
                ],
            },
        }
    }
}

/// Universal Credit defaults from benefit.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitConfig {
    /// Monthly entitlement used when the caller reports none.
    pub standard_allowance: Decimal,
    /// Monthly earnings disregarded before the taper applies.
    pub taper_ignore: Decimal,
    /// Fraction of earnings above the disregard deducted from the award.
    pub taper_rate: Decimal,
    /// Income categories counted as earnings by the means test.
    pub taxable_categories: Vec<IncomeCategory>,
}

impl Default for BenefitConfig {
    fn default() -> Self {
        Self {
            standard_allowance: Decimal::new(40014, 2),
            taper_ignore: Decimal::from(411),
            taper_rate: Decimal::new(55, 2),
            taxable_categories: vec![
                IncomeCategory::Wage,
                IncomeCategory::SideGig,
                IncomeCategory::SecondJob,
            ],
        }
    }
}

/// The complete engine configuration loaded from YAML files.
///
/// The default uses an empty holiday calendar with the built-in tax and
/// benefit figures.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    calendar: HolidayCalendar,
    tax: TaxBands,
    benefit: BenefitConfig,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(calendar: HolidayCalendar, tax: TaxBands, benefit: BenefitConfig) -> Self {
        Self {
            calendar,
            tax,
            benefit,
        }
    }

    /// Returns the holiday calendar.
    pub fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }

    /// Returns the tax bands.
    pub fn tax(&self) -> &TaxBands {
        &self.tax
    }

    /// Returns the benefit defaults.
    pub fn benefit(&self) -> &BenefitConfig {
        &self.benefit
    }
}

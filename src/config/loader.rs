//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the holiday
//! table, tax bands and benefit defaults from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::calculation::HolidayCalendar;
use crate::error::{EngineError, EngineResult};

use super::types::{BenefitConfig, CalendarConfig, EngineConfig, TaxBands};

/// Loads and provides access to engine configuration.
///
/// The configuration is read once at process start and never mutated; new
/// holidays or tax years are added by editing the files and redeploying.
///
/// # Directory Structure
///
/// ```text
/// config/gb/
/// ├── calendar.yaml   # Jurisdiction holiday table
/// ├── tax.yaml        # Income tax and contribution bands
/// └── benefit.yaml    # Universal Credit taper defaults
/// ```
///
/// # Example
///
/// ```no_run
/// use cashflow_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/gb").unwrap();
/// let christmas = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
/// assert!(loader.calendar().is_holiday(christmas));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or missing fields (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let calendar_config = Self::load_yaml::<CalendarConfig>(&path.join("calendar.yaml"))?;
        let tax = Self::load_yaml::<TaxBands>(&path.join("tax.yaml"))?;
        let benefit = Self::load_yaml::<BenefitConfig>(&path.join("benefit.yaml"))?;

        let calendar = HolidayCalendar::from(calendar_config);
        debug!(
            jurisdiction = calendar.jurisdiction(),
            version = calendar.version(),
            holidays = calendar.len(),
            tax_year = %tax.tax_year,
            "Loaded engine configuration"
        );

        Ok(Self {
            config: EngineConfig::new(calendar, tax, benefit),
        })
    }

    /// Wraps an already-built configuration, e.g. one using a synthetic
    /// holiday calendar.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the holiday calendar.
    pub fn calendar(&self) -> &HolidayCalendar {
        self.config.calendar()
    }

    /// Returns the income tax and contribution bands.
    pub fn tax_bands(&self) -> &TaxBands {
        self.config.tax()
    }

    /// Returns the benefit defaults.
    pub fn benefit(&self) -> &BenefitConfig {
        self.config.benefit()
    }
}

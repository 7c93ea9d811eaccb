//! Configuration loading and management for the Cashflow Engine.
//!
//! This module loads the jurisdiction's holiday table, the income tax and
//! contribution bands, and the benefit taper defaults from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use cashflow_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/gb").unwrap();
//! println!("Holiday table: {}", config.calendar().version());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BandSchedule, BenefitConfig, CalendarConfig, EngineConfig, HolidayEntry, TaxBand, TaxBands,
};

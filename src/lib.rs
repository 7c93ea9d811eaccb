//! Cashflow Engine for household budgeting
//!
//! This crate resolves the next business-day due date of recurring payments
//! against a bank-holiday calendar, normalizes amounts between payment
//! frequencies, estimates take-home pay under UK income tax and National
//! Insurance bands, and calculates the Universal Credit taper.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod reminders;

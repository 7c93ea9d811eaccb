//! HTTP API module for the Cashflow Engine.
//!
//! This module provides the REST API endpoints for resolving payment dates,
//! summarizing monthly cashflow, calculating Universal Credit and running
//! the scheduled reminder batch.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{MonthlySummaryRequest, PaymentAnchorRequest, ReminderRequest, UcPaymentRequest};
pub use response::{
    ApiError, ApiErrorResponse, MonthlySummaryResponse, NextPaymentDateResponse, ReminderResponse,
};
pub use state::AppState;

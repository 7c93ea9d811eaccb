//! Response types for the Cashflow Engine API.
//!
//! This module defines the success bodies, the error response structures
//! and error handling for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::MonthlySummary;
use crate::error::EngineError;
use crate::models::NextPaymentDate;
use crate::reminders::UpcomingPayment;

/// Response body for the `/next-payment-date` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextPaymentDateResponse {
    /// The unadjusted due date.
    pub base: NaiveDate,
    /// The business-day due date.
    pub adjusted: NaiveDate,
    /// Weekday name of `base`.
    pub base_weekday: String,
    /// Weekday name of `adjusted`.
    pub adjusted_weekday: String,
}

impl From<NextPaymentDate> for NextPaymentDateResponse {
    fn from(next: NextPaymentDate) -> Self {
        Self {
            base: next.base,
            adjusted: next.adjusted,
            base_weekday: next.base.format("%A").to_string(),
            adjusted_weekday: next.adjusted.format("%A").to_string(),
        }
    }
}

/// Response body for the `/monthly-summary` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlySummaryResponse {
    /// Estimated take-home pay per month across all incomes.
    pub net_income_monthly: Decimal,
    /// Every outgoing per month, including costs paid by UC.
    pub gross_expenses_monthly: Decimal,
    /// Outgoings the household pays itself.
    pub out_of_pocket_monthly: Decimal,
    /// Outgoings paid directly by Universal Credit.
    pub paid_by_uc_monthly: Decimal,
    /// Net income less out-of-pocket outgoings.
    pub disposable_monthly: Decimal,
}

impl MonthlySummaryResponse {
    /// Combines a net income total with an expense summary.
    pub fn new(net_income_monthly: Decimal, summary: MonthlySummary) -> Self {
        Self {
            net_income_monthly,
            gross_expenses_monthly: summary.gross_monthly,
            out_of_pocket_monthly: summary.out_of_pocket_monthly,
            paid_by_uc_monthly: summary.paid_by_uc_monthly,
            disposable_monthly: net_income_monthly.saturating_sub(summary.out_of_pocket_monthly),
        }
    }
}

/// Response body for the `/cron/reminders` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderResponse {
    /// The date the batch ran for.
    pub today: NaiveDate,
    /// Payments due within the reminder window.
    pub upcoming: Vec<UpcomingPayment>,
    /// Plain-text digest of the batch.
    pub digest: String,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an unauthorized error response.
    pub fn unauthorized() -> Self {
        Self::new("UNAUTHORIZED", "Missing or invalid bearer token")
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidArgument { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_ARGUMENT",
                    format!("Invalid argument '{}': {}", field, message),
                    "The request contains a value outside its valid range",
                ),
            },
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
            EngineError::RepositoryError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "REPOSITORY_ERROR",
                    "Failed to load records",
                    message,
                ),
            },
        }
    }
}

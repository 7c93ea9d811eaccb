//! HTTP request handlers for the Cashflow Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    DueDateResolver, calculate_uc_payment, summarize_records, total_net_income,
};
use crate::error::EngineError;
use crate::reminders::{ReminderWindow, render_digest, run_reminder_batch};

use super::request::{MonthlySummaryRequest, PaymentAnchorRequest, ReminderRequest, UcPaymentRequest};
use super::response::{
    ApiError, ApiErrorResponse, MonthlySummaryResponse, NextPaymentDateResponse, ReminderResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/next-payment-date", post(next_payment_date_handler))
        .route("/monthly-summary", post(monthly_summary_handler))
        .route("/uc-payment", post(uc_payment_handler))
        .route("/cron/reminders", post(reminders_handler))
        .with_state(state)
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: EngineError) -> Response {
    ApiErrorResponse::from(error).into_response()
}

/// Maps a JSON extraction failure onto a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for POST /next-payment-date.
///
/// Resolves the next base and business-day due date of a payment anchor.
async fn next_payment_date_handler(
    State(state): State<AppState>,
    payload: Result<Json<PaymentAnchorRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing next payment date request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let anchor = request.into_anchor(local_today());
    let resolver = DueDateResolver::new(state.config().calendar());

    match resolver.next_payment_date(&anchor) {
        Ok(next) => {
            info!(
                correlation_id = %correlation_id,
                frequency = %anchor.frequency,
                reference_date = %anchor.reference_date,
                base = %next.base,
                adjusted = %next.adjusted,
                "Next payment date resolved"
            );
            json_response(StatusCode::OK, NextPaymentDateResponse::from(next))
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Next payment date failed"
            );
            error_response(err)
        }
    }
}

/// Handler for POST /monthly-summary.
///
/// Totals net income and monthly-equivalent outgoings.
async fn monthly_summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<MonthlySummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing monthly summary request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let net_income = total_net_income(&request.incomes, state.config().tax_bands());
    let summary = summarize_records(&request.records);
    let response = MonthlySummaryResponse::new(net_income, summary);

    info!(
        correlation_id = %correlation_id,
        incomes = request.incomes.len(),
        records = request.records.len(),
        disposable = %response.disposable_monthly,
        duration_us = start_time.elapsed().as_micros(),
        "Monthly summary completed"
    );

    json_response(StatusCode::OK, response)
}

/// Handler for POST /uc-payment.
///
/// Applies the Universal Credit taper to the claimant's incomes.
async fn uc_payment_handler(
    State(state): State<AppState>,
    payload: Result<Json<UcPaymentRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing UC payment request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let paid_by_uc = summarize_records(&request.records).paid_by_uc_monthly;
    let input = request.into_input(paid_by_uc);
    let config = state.config();
    let result = calculate_uc_payment(&input, config.benefit(), config.tax_bands(), 1);

    info!(
        correlation_id = %correlation_id,
        incomes = input.incomes.len(),
        payment = %result.payment,
        duration_us = start_time.elapsed().as_micros(),
        "UC payment calculated"
    );

    json_response(StatusCode::OK, result)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
}

/// Handler for POST /cron/reminders.
///
/// Runs the reminder batch over every stored record. Requires the
/// configured bearer secret; the body is optional.
async fn reminders_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing reminder batch request");

    if !state.cron_authorized(bearer_token(&headers)) {
        warn!(correlation_id = %correlation_id, "Rejected unauthorized reminder batch request");
        return json_response(StatusCode::UNAUTHORIZED, ApiError::unauthorized());
    }

    let request = if body.iter().all(u8::is_ascii_whitespace) {
        ReminderRequest::default()
    } else {
        match serde_json::from_slice::<ReminderRequest>(&body) {
            Ok(req) => req,
            Err(err) => {
                warn!(
                    correlation_id = %correlation_id,
                    error = %err,
                    "JSON syntax error"
                );
                return json_response(
                    StatusCode::BAD_REQUEST,
                    ApiError::malformed_json(format!("Invalid JSON: {}", err)),
                );
            }
        }
    };

    let today = request.today.unwrap_or_else(local_today);
    let resolver = DueDateResolver::new(state.config().calendar());
    let start_time = Instant::now();

    match run_reminder_batch(state.records(), today, &resolver, ReminderWindow::default()) {
        Ok(batch) => {
            let digest = render_digest(&batch);
            info!(
                correlation_id = %correlation_id,
                upcoming = batch.upcoming.len(),
                skipped = batch.skipped.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Reminder batch request completed"
            );
            json_response(
                StatusCode::OK,
                ReminderResponse {
                    today: batch.today,
                    upcoming: batch.upcoming,
                    digest,
                },
            )
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Reminder batch failed"
            );
            error_response(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/gb").expect("Failed to load config");
        AppState::new(config).with_cron_secret("test-secret")
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, "Bearer abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc"));

        headers.insert(header::AUTHORIZATION, "Basic abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }

    #[tokio::test]
    async fn test_error_response_maps_engine_errors() {
        let response = error_response(EngineError::RepositoryError {
            message: "records file missing".to_string(),
        });
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = read_json(response).await;
        assert_eq!(json["code"], "REPOSITORY_ERROR");
        assert_eq!(json["details"], "records file missing");
    }

    #[tokio::test]
    async fn test_next_payment_date_returns_200() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json(
                "/next-payment-date",
                r#"{ "frequency": "monthly", "anchor_day": 15, "reference_date": "2025-03-10" }"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let json = read_json(response).await;
        assert_eq!(json["base"], "2025-03-15");
        assert_eq!(json["adjusted"], "2025-03-17");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/uc-payment", "{invalid json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(read_json(response).await).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/next-payment-date", r#"{ "frequency": "monthly" }"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(read_json(response).await).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("anchor_day"));
    }

    #[tokio::test]
    async fn test_reminders_without_token_returns_401() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/cron/reminders")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{Contract, EntryKey};

use super::request::{ContractRequest, DailyEntryRequest, ReportQuery, WagePreviewRequest};
use super::response::{ApiError, ApiErrorResponse, WagePreviewResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/contracts", post(register_contract_handler))
        .route("/wage/preview", post(preview_wage_handler))
        .route("/entries", put(save_entry_handler))
        .route(
            "/entries/:user_id/:contract_id/:date",
            delete(delete_entry_handler),
        )
        .route(
            "/summaries/:user_id/:contract_id/:year/:month",
            get(monthly_summary_handler),
        )
        .route(
            "/reports/:user_id/:contract_id/:year/:month",
            get(payroll_report_handler),
        )
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse<'a> {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    regime: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'a str>,
}

/// Handler for GET /health.
async fn health_handler(State(state): State<AppState>) -> Response {
    let metadata = state.metadata();
    json_response(
        StatusCode::OK,
        HealthResponse {
            status: "ok",
            regime: metadata.map(|m| m.code.as_str()),
            version: metadata.map(|m| m.version.as_str()),
        },
    )
}

/// Handler for POST /contracts.
///
/// Registers a contract. The contract type arrives as free text and is
/// rejected unless it is one of the three known types.
async fn register_contract_handler(
    State(state): State<AppState>,
    payload: Result<Json<ContractRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing contract registration");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(json_rejection_error(correlation_id, rejection)),
    };

    let contract = match Contract::try_from(request) {
        Ok(contract) => contract,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    match state.service().register_contract(contract).await {
        Ok(contract) => {
            info!(
                correlation_id = %correlation_id,
                contract_id = %contract.id,
                "Contract registered"
            );
            json_response(StatusCode::CREATED, contract)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /wage/preview.
///
/// Prices a day's hours under a contract without saving anything.
async fn preview_wage_handler(
    State(state): State<AppState>,
    payload: Result<Json<WagePreviewRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing wage preview");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(json_rejection_error(correlation_id, rejection)),
    };

    let hours = match request.hours.to_worked_hours() {
        Ok(hours) => hours,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let start_time = Instant::now();
    match state.service().preview_wage(request.contract_id, &hours).await {
        Ok(result) => {
            let duration_us = start_time.elapsed().as_micros() as u64;
            let response = WagePreviewResponse::new(request.contract_id, result, duration_us);
            info!(
                correlation_id = %correlation_id,
                contract_id = %request.contract_id,
                wage = %response.wage,
                duration_us,
                "Wage preview completed"
            );
            json_response(StatusCode::OK, response)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for PUT /entries.
///
/// Saves a day's hours (overwriting any entry for the same day) and returns
/// the stored entry with the refreshed monthly summary.
async fn save_entry_handler(
    State(state): State<AppState>,
    payload: Result<Json<DailyEntryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing entry save");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(json_rejection_error(correlation_id, rejection)),
    };

    let new_entry = match request.into_new_entry() {
        Ok(new_entry) => new_entry,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    match state.service().save_entry(new_entry).await {
        Ok(saved) => {
            info!(
                correlation_id = %correlation_id,
                entry_id = %saved.entry.id,
                daily_wage = %saved.entry.daily_wage,
                total_salary = %saved.summary.total_salary,
                "Entry saved"
            );
            json_response(StatusCode::OK, saved)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for DELETE /entries/:user_id/:contract_id/:date.
async fn delete_entry_handler(
    State(state): State<AppState>,
    path: Result<Path<(Uuid, Uuid, NaiveDate)>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing entry delete");

    let (user_id, contract_id, date) = match path {
        Ok(Path(params)) => params,
        Err(rejection) => {
            return path_rejection_response(correlation_id, rejection);
        }
    };

    let key = EntryKey {
        user_id,
        contract_id,
        date,
    };
    match state.service().delete_entry(key).await {
        Ok(summary) => json_response(StatusCode::OK, summary),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /summaries/:user_id/:contract_id/:year/:month.
async fn monthly_summary_handler(
    State(state): State<AppState>,
    path: Result<Path<(Uuid, Uuid, i32, u32)>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let (user_id, contract_id, year, month) = match path {
        Ok(Path(params)) => params,
        Err(rejection) => return path_rejection_response(correlation_id, rejection),
    };

    match state
        .service()
        .monthly_summary(user_id, contract_id, month, year)
        .await
    {
        Ok(summary) => json_response(StatusCode::OK, summary),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /reports/:user_id/:contract_id/:year/:month.
///
/// `?unhealthy=true` adds the unhealthy-environment bonus to the report.
async fn payroll_report_handler(
    State(state): State<AppState>,
    path: Result<Path<(Uuid, Uuid, i32, u32)>, PathRejection>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let (user_id, contract_id, year, month) = match path {
        Ok(Path(params)) => params,
        Err(rejection) => return path_rejection_response(correlation_id, rejection),
    };
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            warn!(correlation_id = %correlation_id, error = %rejection.body_text(), "Query error");
            return rejection_response(ApiError::validation_error(rejection.body_text()));
        }
    };

    match state
        .service()
        .payroll_report(user_id, contract_id, month, year, query.unhealthy)
        .await
    {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                user_id = %user_id,
                contract_id = %contract_id,
                gross_total = %report.gross_total,
                "Payroll report built"
            );
            json_response(StatusCode::OK, report)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn rejection_response(error: ApiError) -> Response {
    ApiErrorResponse::bad_request(error).into_response()
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        retryable = err.is_retryable(),
        "Request failed"
    );
    ApiErrorResponse::from(err).into_response()
}

fn path_rejection_response(correlation_id: Uuid, rejection: PathRejection) -> Response {
    let body_text = rejection.body_text();
    warn!(correlation_id = %correlation_id, error = %body_text, "Path error");
    rejection_response(ApiError::validation_error(body_text))
}

fn json_rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // serde's message names the offending field
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
    }
}

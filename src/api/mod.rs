//! HTTP API module for the payroll engine.
//!
//! This module provides the REST API endpoints for registering contracts,
//! previewing and saving daily wages, and reading monthly summaries and
//! payroll reports.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ContractRequest, DailyEntryRequest, HoursRequest, ReportQuery, WagePreviewRequest,
};
pub use response::{ApiError, ApiErrorResponse, WagePreviewResponse};
pub use state::AppState;

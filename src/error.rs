//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the wage calculator, the monthly aggregator and the
//! entry store can report.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the payroll engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently from the calculator up to the HTTP layer.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::InvalidContractType {
///     value: "weekly".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid contract type: weekly");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The contract type is not one of hourly, daily or monthly.
    #[error("Invalid contract type: {value}")]
    InvalidContractType {
        /// The raw value that failed to parse.
        value: String,
    },

    /// An hours input was negative or not a finite number.
    #[error("Invalid {category} hours: {value}")]
    InvalidHours {
        /// The hour category (regular, overtime, night, holiday).
        category: String,
        /// The rejected value, as received.
        value: String,
    },

    /// A contract field violates its range constraint.
    #[error("Invalid contract field '{field}': {message}")]
    InvalidContract {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A month/year pair does not name a calendar month.
    #[error("Invalid period: month {month} of {year}")]
    InvalidPeriod {
        /// The requested month.
        month: u32,
        /// The requested year.
        year: i32,
    },

    /// A pay calculation exceeded the range of the decimal type.
    #[error("Amount out of range while computing {operation}")]
    AmountOverflow {
        /// The calculation step that overflowed.
        operation: String,
    },

    /// The contract could not be resolved.
    #[error("Contract not found: {contract_id}")]
    ContractNotFound {
        /// The ID that was looked up.
        contract_id: Uuid,
    },

    /// A concurrent write collided on the per-day uniqueness key.
    #[error("Conflicting write for entry {key}")]
    Conflict {
        /// The conflicting key, rendered as text.
        key: String,
    },

    /// The backing store could not be reached.
    #[error("Entry store unavailable: {message}")]
    StoreUnavailable {
        /// A description of the store failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Returns true if retrying the same request may succeed.
    ///
    /// Validation failures are permanent; store-level failures are not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            EngineError::StoreUnavailable { .. } | EngineError::Conflict { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

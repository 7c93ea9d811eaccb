//! Error types for the Cashflow Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure that can surface from scheduling, configuration loading
//! or record retrieval. Degenerate numeric input is never an error; it is
//! coerced to a safe value by the calculation functions.

use thiserror::Error;

/// The main error type for the Cashflow Engine.
///
/// # Example
///
/// ```
/// use cashflow_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/calendar.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/calendar.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
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

    /// A caller supplied an argument outside its valid range.
    #[error("Invalid argument '{field}': {message}")]
    InvalidArgument {
        /// The argument that was invalid.
        field: String,
        /// A description of what made the argument invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },

    /// The record repository failed to produce records.
    #[error("Repository error: {message}")]
    RepositoryError {
        /// A description of the repository failure.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidArgument`].
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

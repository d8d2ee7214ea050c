//! Unified error handling for Fleetify pricing
//!
//! `PricingError` is the closed set of reasons a pricing request is rejected.
//! `AppError` wraps it together with the failures of the surrounding
//! application (configuration, validation, serialization) and maps every
//! variant to an HTTP response.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use rust_decimal::Decimal;
use serde_json::json;
use thiserror::Error;

/// Reasons a pricing request cannot be priced
///
/// All variants are terminal: pricing is deterministic, so retrying the same
/// request yields the same error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    #[error("Invalid rental duration: {days} days (must be at least 1)")]
    InvalidDuration { days: i64 },

    #[error("Pricing unavailable: no daily, weekly or monthly rate is configured")]
    NoRateAvailable,

    #[error("Invalid custom amount: {amount} (must be greater than zero)")]
    InvalidCustomAmount { amount: Decimal },
}

impl PricingError {
    /// Returns the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            PricingError::InvalidDuration { .. } => "invalid_duration",
            PricingError::NoRateAvailable => "no_rate_available",
            PricingError::InvalidCustomAmount { .. } => "invalid_custom_amount",
        }
    }
}

/// Main application error type
///
/// Implements `ResponseError` for automatic HTTP response generation.
#[derive(Error, Debug)]
pub enum AppError {
    // ==================== Pricing Errors ====================
    #[error(transparent)]
    Pricing(#[from] PricingError),

    // ==================== Validation Errors ====================
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ==================== Internal Errors ====================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            AppError::Pricing(PricingError::InvalidDuration { .. })
            | AppError::Pricing(PricingError::InvalidCustomAmount { .. })
            | AppError::Validation(_)
            | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,

            // 422 Unprocessable Entity
            AppError::Pricing(PricingError::NoRateAvailable) => StatusCode::UNPROCESSABLE_ENTITY,

            // 500 Internal Server Error
            AppError::Internal(_) | AppError::Config(_) | AppError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Pricing(err) => err.error_code(),
            AppError::Validation(_) => "validation_error",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::Internal(_) => "internal_error",
            AppError::Config(_) => "config_error",
            AppError::Serialization(_) => "serialization_error",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        AppError::status_code(self)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = json!({
            "error": self.error_code(),
            "message": self.to_string(),
            "status": status.as_u16(),
        });

        HttpResponse::build(status).json(body)
    }
}

// ==================== From implementations ====================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

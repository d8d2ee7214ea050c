//! Fleetify Core Library
//!
//! This crate provides the foundational types, traits, and error handling
//! for the Fleetify rental pricing engine. It includes:
//!
//! - Domain models (RateCard, RentalPeriod, PricingRequest, PricingResult)
//! - The `PricingService` trait implemented by the engine
//! - Unified error handling with HTTP response mapping
//! - Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod traits;

pub use config::AppConfig;
pub use error::{AppError, PricingError};

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

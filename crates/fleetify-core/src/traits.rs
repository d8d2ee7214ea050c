//! Common traits for pricing services
//!
//! Defines the contract between the pricing engine and its callers.

use crate::error::PricingError;
use crate::models::{PricingRequest, PricingResult};

/// Pricing service trait
///
/// Implementations are pure: the same request always yields the same result,
/// and calls may run concurrently without coordination.
pub trait PricingService: Send + Sync {
    /// Price a rental
    ///
    /// # Errors
    ///
    /// - `InvalidDuration` when the duration is not a positive day count
    /// - `InvalidCustomAmount` when a custom amount is given but not positive
    /// - `NoRateAvailable` when the rate card offers no billing rate
    fn price(&self, request: &PricingRequest) -> Result<PricingResult, PricingError>;
}

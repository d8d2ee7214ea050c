//! Domain models for Fleetify pricing
//!
//! This module contains the value types exchanged with the pricing engine.

pub mod pricing;
pub mod rate_card;

pub use pricing::{
    Breakdown, Granularity, MixedDetails, PricingRequest, PricingResult, RentalPeriod,
    DAYS_PER_MONTH, DAYS_PER_WEEK,
};
pub use rate_card::RateCard;

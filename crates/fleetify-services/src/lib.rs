//! Business logic services for Fleetify rental pricing
//!
//! This crate contains the rental pricing engine and the caching layer
//! callers may put in front of it.
//!
//! # Architecture
//!
//! - The engine is a pure function pipeline: no I/O, no shared state
//! - `PricingEngine` is cheap to clone and safe to share across threads
//! - All operations are instrumented with tracing
//! - Rejected requests surface as a typed `PricingError`
//!
//! # Services
//!
//! - `PricingEngine` - Rate optimization and minimum-price enforcement
//! - `CachedPricingEngine` - Tenant-scoped memoization of quotes

pub mod pricing;
pub mod quote_cache;

pub use pricing::{price, PricingEngine};
pub use quote_cache::{CachedPricingEngine, QuoteCache, QuoteKey};

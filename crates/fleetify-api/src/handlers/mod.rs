//! HTTP request handlers

pub mod health;
pub mod pricing;

pub use health::configure as configure_health;
pub use pricing::configure as configure_pricing;

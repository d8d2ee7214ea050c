//! API layer for Fleetify rental pricing
//!
//! HTTP handlers exposing the pricing engine to the contract wizard.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    missing_docs
)]

pub mod dto;
pub mod handlers;

pub use dto::{ApiResponse, QuoteRequest};
pub use handlers::{configure_health, configure_pricing};

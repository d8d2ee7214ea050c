//! Data Transfer Objects (DTOs) for API requests and responses

pub mod common;
pub mod quote;

pub use common::*;
pub use quote::*;

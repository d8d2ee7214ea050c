//! Simple-rate evaluation
//!
//! Prices the whole rental at a single billing granularity. Partial weeks
//! and partial months are billed as full ones.

use fleetify_core::models::{Granularity, MixedDetails, RentalPeriod};
use rust_decimal::Decimal;

use super::normalizer::NormalizedRates;

/// A not-yet-selected way to bill the rental
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub granularity: Granularity,
    pub total_cost: Decimal,
    /// Natural period count of the granularity (days for daily and mixed)
    pub periods_used: u32,
    /// Month/week/day split, present for mixed candidates only
    pub mixed: Option<MixedDetails>,
}

/// Price the rental at one simple granularity
///
/// Returns `None` when the rate for that granularity is not offered, so an
/// unavailable granularity can never be selected. A total that does not fit
/// in a `Decimal` is treated the same way.
pub fn simple_candidate(
    granularity: Granularity,
    rates: &NormalizedRates,
    period: RentalPeriod,
) -> Option<Candidate> {
    let rate = rates.rate(granularity)?;
    let periods_used = match granularity {
        Granularity::Daily => period.days(),
        Granularity::Weekly => period.weeks_ceil(),
        Granularity::Monthly => period.months_ceil(),
        Granularity::Mixed => return None,
    };

    Some(Candidate {
        granularity,
        total_cost: rate.checked_mul(Decimal::from(periods_used))?,
        periods_used,
        mixed: None,
    })
}

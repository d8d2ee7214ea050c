//! Rate selection
//!
//! Picks the cheapest candidate. Equal totals go to the granularity with the
//! fewest billing lines, in evaluation order: monthly, weekly, mixed, daily.

use fleetify_core::models::Granularity;
use fleetify_core::PricingError;

use super::evaluator::Candidate;

/// Order in which granularities are evaluated; earlier wins ties
pub const EVALUATION_ORDER: [Granularity; 4] = [
    Granularity::Monthly,
    Granularity::Weekly,
    Granularity::Mixed,
    Granularity::Daily,
];

fn evaluation_rank(granularity: Granularity) -> usize {
    EVALUATION_ORDER
        .iter()
        .position(|g| *g == granularity)
        .unwrap_or(EVALUATION_ORDER.len())
}

/// Select the cheapest candidate
///
/// # Errors
///
/// Returns `PricingError::NoRateAvailable` when there are no candidates.
pub fn select(candidates: Vec<Candidate>) -> Result<Candidate, PricingError> {
    candidates
        .into_iter()
        .min_by(|a, b| {
            a.total_cost
                .cmp(&b.total_cost)
                .then_with(|| evaluation_rank(a.granularity).cmp(&evaluation_rank(b.granularity)))
        })
        .ok_or(PricingError::NoRateAvailable)
}

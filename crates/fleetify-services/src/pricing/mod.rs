//! Rental pricing engine
//!
//! Prices a rental from a vehicle's rate card in one pass:
//!
//! 1. `normalizer` validates the duration and coerces the rate card
//! 2. `evaluator` prices daily-only, weekly-only and monthly-only billing
//! 3. `optimizer` finds the cheapest month/week/day combination
//! 4. `selector` picks the cheapest candidate
//! 5. `breakdown` applies the minimum price and explains the result
//!
//! A negotiated custom amount skips steps 2 through 4 and is never floored.
//! The engine holds no state between calls.

pub mod breakdown;
pub mod evaluator;
pub mod normalizer;
pub mod optimizer;
pub mod selector;

use fleetify_core::config::PricingConfig;
use fleetify_core::models::{Granularity, PricingRequest, PricingResult};
use fleetify_core::traits::PricingService;
use fleetify_core::PricingError;
use tracing::{debug, instrument, warn};

use self::breakdown::ResultBuilder;
use self::evaluator::simple_candidate;
use self::normalizer::NormalizedRequest;

/// Rental pricing engine
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    /// Create a new pricing engine
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Engine configuration
    pub fn config(&self) -> &PricingConfig {
        &self.config
    }
}

impl PricingService for PricingEngine {
    #[instrument(skip(self, request), fields(duration_days = request.duration_days))]
    fn price(&self, request: &PricingRequest) -> Result<PricingResult, PricingError> {
        let normalized = NormalizedRequest::from_request(request).map_err(|e| {
            debug!("Rejected pricing request: {}", e);
            e
        })?;

        let builder = ResultBuilder::new(
            &normalized.card,
            &normalized.rates,
            normalized.period,
            self.config.currency_scale,
        );

        if let Some(amount) = normalized.custom_amount {
            debug!(%amount, "Using custom amount");
            return Ok(builder.custom(amount));
        }

        if normalized.rates.is_empty() {
            warn!("No rate configured on rate card");
            return Err(PricingError::NoRateAvailable);
        }

        let candidates: Vec<_> = selector::EVALUATION_ORDER
            .into_iter()
            .filter_map(|granularity| match granularity {
                Granularity::Mixed => optimizer::optimize(&normalized.rates, normalized.period),
                simple => simple_candidate(simple, &normalized.rates, normalized.period),
            })
            .collect();

        for candidate in &candidates {
            debug!(
                granularity = %candidate.granularity,
                total = %candidate.total_cost,
                "Pricing candidate"
            );
        }

        if candidates.is_empty() {
            warn!("No candidate total fits in a decimal amount");
        }

        let selected = selector::select(candidates)?;
        debug!(
            granularity = %selected.granularity,
            total = %selected.total_cost,
            "Selected pricing"
        );

        Ok(builder.selected(selected))
    }
}

/// Price a rental with the default configuration
///
/// # Errors
///
/// See [`PricingService::price`].
pub fn price(request: &PricingRequest) -> Result<PricingResult, PricingError> {
    PricingEngine::default().price(request)
}

//! Minimum-price enforcement and result assembly
//!
//! Applies the rate card's floor to the selected candidate, then derives the
//! display amounts and the explanatory breakdown.

use fleetify_core::models::{Breakdown, Granularity, PricingResult, RateCard, RentalPeriod};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use super::evaluator::Candidate;
use super::normalizer::NormalizedRates;

/// Label used for negotiated amounts
pub const CUSTOM_LABEL: &str = "custom";

/// Outcome of applying a minimum price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloorOutcome {
    pub total: Decimal,
    pub enforced: bool,
    /// Total before the floor, set only when the floor changed it
    pub original: Option<Decimal>,
}

/// Raise `total` to the floor of `granularity` if the card enforces one
pub fn enforce_floor(card: &RateCard, granularity: Granularity, total: Decimal) -> FloorOutcome {
    let floor = card
        .enforce_minimum_price
        .then(|| card.floor_for(granularity))
        .flatten();

    match floor {
        Some(floor) if total < floor => FloorOutcome {
            total: floor,
            enforced: true,
            original: Some(total),
        },
        _ => FloorOutcome {
            total,
            enforced: false,
            original: None,
        },
    }
}

/// Builds pricing results for one normalized request
pub struct ResultBuilder<'a> {
    card: &'a RateCard,
    rates: &'a NormalizedRates,
    period: RentalPeriod,
    scale: u32,
}

impl<'a> ResultBuilder<'a> {
    /// Create a builder; `scale` is the number of decimals kept on division
    pub fn new(
        card: &'a RateCard,
        rates: &'a NormalizedRates,
        period: RentalPeriod,
        scale: u32,
    ) -> Self {
        Self {
            card,
            rates,
            period,
            scale,
        }
    }

    fn divide(&self, amount: Decimal, count: u32) -> Decimal {
        if count == 0 {
            return Decimal::ZERO;
        }
        (amount / Decimal::from(count))
            .round_dp_with_strategy(self.scale, RoundingStrategy::MidpointAwayFromZero)
    }

    fn monthly_amount(&self, total: Decimal) -> Decimal {
        if self.period.spans_month() {
            self.divide(total, self.period.months_ceil())
        } else {
            Decimal::ZERO
        }
    }

    /// Result for a negotiated amount; no floor is applied
    pub fn custom(&self, amount: Decimal) -> PricingResult {
        let days = self.period.days();
        let period_amount = self.divide(amount, days);

        PricingResult {
            total_amount: amount,
            period_amount,
            monthly_amount: self.monthly_amount(amount),
            selected_granularity: Granularity::Daily,
            is_custom_amount: true,
            duration_days: days,
            breakdown: Breakdown {
                base_amount: period_amount,
                granularity_label: CUSTOM_LABEL.to_string(),
                period_count: days,
                savings: None,
                minimum_price_enforced: false,
                original_amount: None,
                mixed_details: None,
            },
        }
    }

    /// Result for the selected candidate, with the floor applied
    pub fn selected(&self, candidate: Candidate) -> PricingResult {
        let granularity = candidate.granularity;
        let floor = enforce_floor(self.card, granularity, candidate.total_cost);

        if floor.enforced {
            debug!(
                granularity = %granularity,
                original = %candidate.total_cost,
                floor = %floor.total,
                "Minimum price enforced"
            );
        }

        let daily_only = self
            .rates
            .daily
            .and_then(|rate| rate.checked_mul(Decimal::from(self.period.days())));
        let savings = match daily_only {
            Some(daily_total) if granularity != Granularity::Daily && daily_total > floor.total => {
                Some(daily_total - floor.total)
            }
            _ => None,
        };

        // Mixed prices are explained per day, like daily ones
        let base_amount = self
            .rates
            .rate(granularity)
            .or(self.rates.daily)
            .unwrap_or(Decimal::ZERO);

        PricingResult {
            total_amount: floor.total,
            period_amount: self.divide(floor.total, candidate.periods_used),
            monthly_amount: self.monthly_amount(floor.total),
            selected_granularity: granularity,
            is_custom_amount: false,
            duration_days: self.period.days(),
            breakdown: Breakdown {
                base_amount,
                granularity_label: granularity.as_str().to_string(),
                period_count: candidate.periods_used,
                savings,
                minimum_price_enforced: floor.enforced,
                original_amount: floor.original,
                mixed_details: candidate.mixed,
            },
        }
    }
}

//! Rate normalization
//!
//! Turns a raw pricing request into clean inputs: non-negative amounts,
//! a validated day count, and the set of billing rates actually offered.
//! Everything downstream relies on these guarantees and never re-validates.

use fleetify_core::models::{Granularity, PricingRequest, RateCard, RentalPeriod};
use fleetify_core::PricingError;
use rust_decimal::Decimal;

/// Billing rates that are offered (strictly positive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedRates {
    pub daily: Option<Decimal>,
    pub weekly: Option<Decimal>,
    pub monthly: Option<Decimal>,
}

impl NormalizedRates {
    /// Extract the offered rates from a rate card
    pub fn from_card(card: &RateCard) -> Self {
        let card = card.normalized();
        Self {
            daily: card.rate_for(Granularity::Daily),
            weekly: card.rate_for(Granularity::Weekly),
            monthly: card.rate_for(Granularity::Monthly),
        }
    }

    /// Rate for a simple granularity
    pub fn rate(&self, granularity: Granularity) -> Option<Decimal> {
        match granularity {
            Granularity::Daily => self.daily,
            Granularity::Weekly => self.weekly,
            Granularity::Monthly => self.monthly,
            Granularity::Mixed => None,
        }
    }

    /// Whether no billing rate is offered at all
    pub fn is_empty(&self) -> bool {
        self.daily.is_none() && self.weekly.is_none() && self.monthly.is_none()
    }
}

/// A pricing request after validation and coercion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRequest {
    /// Rate card with negative amounts clamped to zero
    pub card: RateCard,
    pub rates: NormalizedRates,
    pub period: RentalPeriod,
    /// Negotiated total, guaranteed positive when present
    pub custom_amount: Option<Decimal>,
}

impl NormalizedRequest {
    /// Validate and normalize a request
    ///
    /// The duration is checked before the custom amount.
    ///
    /// # Errors
    ///
    /// - `InvalidDuration` when the duration is not a positive day count
    /// - `InvalidCustomAmount` when a custom amount is zero or negative
    pub fn from_request(request: &PricingRequest) -> Result<Self, PricingError> {
        let period = RentalPeriod::new(request.duration_days)?;

        let custom_amount = match request.custom_amount {
            Some(amount) if amount <= Decimal::ZERO => {
                return Err(PricingError::InvalidCustomAmount { amount });
            }
            other => other,
        };

        let card = request.rate_card.normalized();
        let rates = NormalizedRates::from_card(&card);

        Ok(Self {
            card,
            rates,
            period,
            custom_amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rates_exclude_zero_and_negative() {
        let card = RateCard {
            daily_rate: dec!(50),
            weekly_rate: dec!(-300),
            monthly_rate: dec!(0),
            ..Default::default()
        };

        let rates = NormalizedRates::from_card(&card);
        assert_eq!(rates.daily, Some(dec!(50)));
        assert_eq!(rates.weekly, None);
        assert_eq!(rates.monthly, None);
        assert!(!rates.is_empty());
        assert!(NormalizedRates::from_card(&RateCard::default()).is_empty());
    }

    #[test]
    fn test_invalid_duration_is_checked_first() {
        let request = PricingRequest::new(RateCard::default(), 0).with_custom_amount(dec!(-1));

        assert_eq!(
            NormalizedRequest::from_request(&request),
            Err(PricingError::InvalidDuration { days: 0 })
        );
    }

    #[test]
    fn test_non_positive_custom_amount_is_rejected() {
        let request = PricingRequest::new(RateCard::default(), 3).with_custom_amount(dec!(0));

        assert_eq!(
            NormalizedRequest::from_request(&request),
            Err(PricingError::InvalidCustomAmount { amount: dec!(0) })
        );
    }

    #[test]
    fn test_normalizes_card_floors() {
        let card = RateCard {
            daily_rate: dec!(40),
            minimum_daily_rate: dec!(-5),
            ..Default::default()
        };
        let normalized = NormalizedRequest::from_request(&PricingRequest::new(card, 2)).unwrap();

        assert_eq!(normalized.card.minimum_daily_rate, Decimal::ZERO);
        assert_eq!(normalized.period.days(), 2);
        assert_eq!(normalized.custom_amount, None);
    }
}

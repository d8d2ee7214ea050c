//! Quote DTOs
//!
//! Request type for pricing a rental from the contract wizard.

use chrono::NaiveDate;
use fleetify_core::models::{PricingRequest, RateCard, RentalPeriod};
use fleetify_core::{AppError, AppResult};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

/// Quote request
///
/// The rental length is either given directly as `duration_days` or derived
/// from `start_date` and `end_date`. When both are present `duration_days`
/// wins.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteRequest {
    /// Company the quote is priced for; enables quote caching
    #[serde(default)]
    pub company_id: Option<Uuid>,

    /// Vehicle rate card
    pub rate_card: RateCard,

    /// Rental length in days
    #[serde(default)]
    pub duration_days: Option<i64>,

    /// Contract start date
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    /// Contract end date
    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    /// Negotiated total overriding the rate card
    #[serde(default)]
    pub custom_amount: Option<Decimal>,
}

impl Validate for QuoteRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let has_dates = self.start_date.is_some() && self.end_date.is_some();
        if self.duration_days.is_none() && !has_dates {
            let mut error = ValidationError::new("rental_period");
            error.message =
                Some("duration_days or both start_date and end_date are required".into());
            errors.add("duration_days", error);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl QuoteRequest {
    /// Rental length in days
    ///
    /// Call after [`Validate::validate`]. Dates that do not form a positive
    /// period fail with `InvalidDuration`; an explicit `duration_days` is
    /// passed through and checked by the engine.
    pub fn duration_days(&self) -> AppResult<i64> {
        if let Some(days) = self.duration_days {
            return Ok(days);
        }

        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => {
                let period = RentalPeriod::between(start, end)?;
                Ok(i64::from(period.days()))
            }
            _ => Err(incomplete_period(self)),
        }
    }

    /// Convert to an engine request
    pub fn to_pricing_request(&self) -> AppResult<PricingRequest> {
        let mut request = PricingRequest::new(self.rate_card.clone(), self.duration_days()?);
        request.custom_amount = self.custom_amount;
        Ok(request)
    }
}

fn incomplete_period(request: &QuoteRequest) -> AppError {
    match request.validate() {
        Err(errors) => errors.into(),
        Ok(()) => AppError::Validation("rental period is incomplete".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetify_core::PricingError;
    use rust_decimal_macros::dec;

    fn quote(json: serde_json::Value) -> QuoteRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_duration_from_dates() {
        let req = quote(serde_json::json!({
            "rate_card": { "daily_rate": 50 },
            "start_date": "2025-02-01",
            "end_date": "2025-02-11",
        }));

        assert!(req.validate().is_ok());
        assert_eq!(req.duration_days().unwrap(), 10);
    }

    #[test]
    fn test_explicit_duration_wins_over_dates() {
        let req = quote(serde_json::json!({
            "rate_card": {},
            "duration_days": 3,
            "start_date": "2025-02-01",
            "end_date": "2025-02-11",
        }));

        assert_eq!(req.duration_days().unwrap(), 3);
    }

    #[test]
    fn test_missing_period_fails_validation() {
        let req = quote(serde_json::json!({
            "rate_card": { "daily_rate": 50 },
            "start_date": "2025-02-01",
        }));

        assert!(req.validate().is_err());
        assert!(matches!(req.duration_days(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_reversed_dates_are_invalid_duration() {
        let req = quote(serde_json::json!({
            "rate_card": { "daily_rate": 50 },
            "start_date": "2025-02-11",
            "end_date": "2025-02-01",
        }));

        assert!(matches!(
            req.duration_days(),
            Err(AppError::Pricing(PricingError::InvalidDuration { days: -10 }))
        ));
    }

    #[test]
    fn test_to_pricing_request_carries_custom_amount() {
        let req = quote(serde_json::json!({
            "rate_card": { "daily_rate": "50", "weekly_rate": null },
            "duration_days": 4,
            "custom_amount": "180.500",
        }));

        let request = req.to_pricing_request().unwrap();
        assert_eq!(request.duration_days, 4);
        assert_eq!(request.custom_amount, Some(dec!(180.500)));
        assert_eq!(request.rate_card.daily_rate, dec!(50));
        assert_eq!(request.rate_card.weekly_rate, Decimal::ZERO);
    }
}

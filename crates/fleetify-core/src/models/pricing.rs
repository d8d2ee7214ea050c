//! Pricing request and result models
//!
//! A request pairs a vehicle's rate card with a rental duration in whole days.
//! The result carries the billed total and a breakdown explaining how it
//! was derived.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::rate_card::RateCard;
use crate::error::PricingError;

/// Length of a billing week in days
pub const DAYS_PER_WEEK: u32 = 7;

/// Length of a billing month in days (not a calendar month)
pub const DAYS_PER_MONTH: u32 = 30;

/// Billing unit used to price a rental
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
    /// A combination of months, weeks and days
    Mixed,
}

impl Granularity {
    /// Get granularity as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
            Granularity::Mixed => "mixed",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated rental duration in whole days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RentalPeriod(u32);

impl RentalPeriod {
    /// Validate a day count
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidDuration` when `days` is zero, negative
    /// or too large to be a day count.
    pub fn new(days: i64) -> Result<Self, PricingError> {
        match u32::try_from(days) {
            Ok(days) if days > 0 => Ok(Self(days)),
            _ => Err(PricingError::InvalidDuration { days }),
        }
    }

    /// Day count between a start and an end date
    ///
    /// A rental from the 1st to the 11th is 10 days.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::InvalidDuration` unless `end` is after `start`.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Result<Self, PricingError> {
        Self::new((end - start).num_days())
    }

    /// Number of days
    #[inline]
    pub fn days(&self) -> u32 {
        self.0
    }

    /// Whole weeks, a partial week counting as a full one
    #[inline]
    pub fn weeks_ceil(&self) -> u32 {
        self.0.div_ceil(DAYS_PER_WEEK)
    }

    /// Whole 30-day months, a partial month counting as a full one
    #[inline]
    pub fn months_ceil(&self) -> u32 {
        self.0.div_ceil(DAYS_PER_MONTH)
    }

    /// Whether the rental spans at least one full billing month
    #[inline]
    pub fn spans_month(&self) -> bool {
        self.0 >= DAYS_PER_MONTH
    }
}

/// Input of a single pricing call
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PricingRequest {
    /// Rate card of the vehicle being rented
    pub rate_card: RateCard,

    /// Rental length in whole days (validated by the engine)
    pub duration_days: i64,

    /// Negotiated total that bypasses rate optimization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_amount: Option<Decimal>,
}

impl PricingRequest {
    /// Create a request priced from the rate card
    pub fn new(rate_card: RateCard, duration_days: i64) -> Self {
        Self {
            rate_card,
            duration_days,
            custom_amount: None,
        }
    }

    /// Use a negotiated total instead of the rate card
    pub fn with_custom_amount(mut self, amount: Decimal) -> Self {
        self.custom_amount = Some(amount);
        self
    }
}

/// Month/week/day split of a mixed-period price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixedDetails {
    pub months: u32,
    pub weeks: u32,
    pub remaining_days: u32,
    pub monthly_portion: Decimal,
    pub weekly_portion: Decimal,
    pub daily_portion: Decimal,
    /// Human-readable split, e.g. "2 months + 1 week + 3 days"
    pub combination_label: String,
}

/// Explanation of how a price was derived
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    /// Unit price of the selected granularity
    pub base_amount: Decimal,

    /// Label of the selected billing plan ("daily", "weekly", "monthly",
    /// "mixed" or "custom")
    pub granularity_label: String,

    /// Number of billing periods of the selected granularity
    pub period_count: u32,

    /// Amount saved compared with daily-only billing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings: Option<Decimal>,

    /// Whether a minimum price raised the total
    pub minimum_price_enforced: bool,

    /// Total before the minimum price was applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_amount: Option<Decimal>,

    /// Split of a mixed-period price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mixed_details: Option<MixedDetails>,
}

/// Output of a pricing call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Amount to bill for the whole rental
    pub total_amount: Decimal,

    /// Total divided over the periods of the selected granularity
    pub period_amount: Decimal,

    /// Total per 30-day month; zero for rentals shorter than a month
    pub monthly_amount: Decimal,

    pub selected_granularity: Granularity,

    /// Whether the total is a negotiated amount rather than a computed one
    pub is_custom_amount: bool,

    /// Rental length the price was computed for
    pub duration_days: u32,

    pub breakdown: Breakdown,
}

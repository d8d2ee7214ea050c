//! Property tests for the pricing engine
//!
//! Rates are generated in fils (thousandths) so amounts exercise the
//! fractional part of the decimal arithmetic.

use fleetify_core::models::{Granularity, PricingRequest, RateCard};
use fleetify_core::PricingError;
use fleetify_services::price;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn amount(max_fils: i64) -> impl Strategy<Value = Decimal> {
    prop_oneof![
        1 => Just(Decimal::ZERO),
        4 => (1..=max_fils).prop_map(|fils| Decimal::new(fils, 3)),
    ]
}

fn rate_card(enforce_minimum_price: bool) -> impl Strategy<Value = RateCard> {
    (
        (amount(200_000), amount(1_000_000), amount(4_000_000)),
        (amount(500_000), amount(2_000_000), amount(6_000_000), amount(1_000_000)),
    )
        .prop_map(
            move |((daily, weekly, monthly), (min_daily, min_weekly, min_monthly, min_rental))| {
                RateCard {
                    daily_rate: daily,
                    weekly_rate: weekly,
                    monthly_rate: monthly,
                    minimum_daily_rate: min_daily,
                    minimum_weekly_rate: min_weekly,
                    minimum_monthly_rate: min_monthly,
                    minimum_rental_price: min_rental,
                    enforce_minimum_price,
                }
            },
        )
}

/// Amounts reaching up to `Decimal::MAX`
fn huge_amount() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        1 => Just(Decimal::ZERO),
        4 => (1u64..=u64::MAX).prop_map(|high| Decimal::from(high) * Decimal::from(1u64 << 32)),
    ]
}

/// Cost of billing the whole rental at each offered simple granularity
fn simple_costs(card: &RateCard, days: u32) -> Vec<Decimal> {
    [
        (card.daily_rate, days),
        (card.weekly_rate, days.div_ceil(7)),
        (card.monthly_rate, days.div_ceil(30)),
    ]
    .into_iter()
    .filter(|(rate, _)| *rate > Decimal::ZERO)
    .map(|(rate, count)| rate * Decimal::from(count))
    .collect()
}

proptest! {
    #[test]
    fn longer_rentals_never_cost_less(card in rate_card(false), days in 1i64..400) {
        match (
            price(&PricingRequest::new(card.clone(), days)),
            price(&PricingRequest::new(card, days + 1)),
        ) {
            (Ok(shorter), Ok(longer)) => {
                prop_assert!(
                    longer.total_amount >= shorter.total_amount,
                    "{} days cost {} but {} days cost {}",
                    days + 1, longer.total_amount, days, shorter.total_amount
                );
            }
            (Err(a), Err(b)) => {
                prop_assert_eq!(a, PricingError::NoRateAvailable);
                prop_assert_eq!(b, PricingError::NoRateAvailable);
            }
            (a, b) => prop_assert!(false, "inconsistent outcomes: {:?} / {:?}", a, b),
        }
    }

    #[test]
    fn enforced_floor_is_respected(card in rate_card(true), days in 1i64..400) {
        if let Ok(result) = price(&PricingRequest::new(card.clone(), days)) {
            let breakdown = &result.breakdown;
            if breakdown.minimum_price_enforced {
                let floor = card.floor_for(result.selected_granularity);
                prop_assert_eq!(Some(result.total_amount), floor);
                let original = breakdown.original_amount.unwrap_or_default();
                prop_assert!(result.total_amount >= original);
            } else {
                prop_assert!(breakdown.original_amount.is_none());
            }
        }
    }

    #[test]
    fn selected_total_is_never_above_a_simple_rate(card in rate_card(true), days in 1u32..400) {
        if let Ok(result) = price(&PricingRequest::new(card.clone(), i64::from(days))) {
            let pre_floor = result.breakdown.original_amount.unwrap_or(result.total_amount);
            for cost in simple_costs(&card, days) {
                prop_assert!(pre_floor <= cost, "selected {} above simple cost {}", pre_floor, cost);
            }
        }
    }

    #[test]
    fn custom_amount_is_returned_unchanged(
        card in rate_card(true),
        days in 1i64..400,
        fils in 1i64..100_000_000,
    ) {
        let custom = Decimal::new(fils, 3);
        let result = price(&PricingRequest::new(card, days).with_custom_amount(custom)).unwrap();

        prop_assert_eq!(result.total_amount, custom);
        prop_assert!(result.is_custom_amount);
        prop_assert!(!result.breakdown.minimum_price_enforced);
        prop_assert_eq!(result.selected_granularity, Granularity::Daily);
    }

    #[test]
    fn pricing_is_idempotent(card in rate_card(true), days in -5i64..400) {
        let request = PricingRequest::new(card, days);
        prop_assert_eq!(price(&request), price(&request));
    }

    #[test]
    fn savings_are_positive_and_never_daily(card in rate_card(true), days in 1i64..400) {
        if let Ok(result) = price(&PricingRequest::new(card, days)) {
            if let Some(savings) = result.breakdown.savings {
                prop_assert!(savings > Decimal::ZERO);
                prop_assert_ne!(result.selected_granularity, Granularity::Daily);
            }
        }
    }

    #[test]
    fn mixed_portions_add_up(card in rate_card(false), days in 1i64..400) {
        if let Ok(result) = price(&PricingRequest::new(card, days)) {
            if let Some(details) = &result.breakdown.mixed_details {
                prop_assert_eq!(result.selected_granularity, Granularity::Mixed);
                prop_assert_eq!(
                    details.monthly_portion + details.weekly_portion + details.daily_portion,
                    result.total_amount
                );
                let covered = i64::from(details.months * 30 + details.weeks * 7 + details.remaining_days);
                prop_assert!(covered >= days);
            }
        }
    }

    #[test]
    fn huge_amounts_yield_a_result_or_typed_error(
        daily in huge_amount(),
        weekly in huge_amount(),
        monthly in huge_amount(),
        floor in huge_amount(),
        days in 1i64..=i64::from(u32::MAX),
    ) {
        let card = RateCard {
            daily_rate: daily,
            weekly_rate: weekly,
            monthly_rate: monthly,
            minimum_rental_price: floor,
            enforce_minimum_price: true,
            ..Default::default()
        };

        match price(&PricingRequest::new(card, days)) {
            Ok(result) => prop_assert!(result.total_amount > Decimal::ZERO),
            Err(err) => prop_assert_eq!(err, PricingError::NoRateAvailable),
        }
    }
}

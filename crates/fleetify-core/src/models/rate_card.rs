//! Vehicle rate card model
//!
//! Per-day, per-week and per-month rates of a vehicle plus its minimum-price
//! policy. A rate of zero means the vehicle is not offered at that
//! granularity.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use super::pricing::Granularity;

/// Rate card entity
///
/// Owned by the vehicle record; the pricing engine only reads it.
/// Deserialization is lenient: every amount accepts a number, a numeric
/// string, `null` or nothing at all, and anything unusable (unparsable,
/// negative, non-finite) becomes zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RateCard {
    /// Price of one day
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub daily_rate: Decimal,

    /// Price of one 7-day week
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub weekly_rate: Decimal,

    /// Price of one 30-day month
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub monthly_rate: Decimal,

    /// Floor applied when daily billing is selected
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub minimum_daily_rate: Decimal,

    /// Floor applied when weekly billing is selected
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub minimum_weekly_rate: Decimal,

    /// Floor applied when monthly billing is selected
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub minimum_monthly_rate: Decimal,

    /// Fallback floor when the granularity-specific one is not set
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub minimum_rental_price: Decimal,

    /// Whether floors are applied at all
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub enforce_minimum_price: bool,
}

impl RateCard {
    /// Create a rate card with the three billing rates and no floors
    pub fn new(daily_rate: Decimal, weekly_rate: Decimal, monthly_rate: Decimal) -> Self {
        Self {
            daily_rate,
            weekly_rate,
            monthly_rate,
            ..Default::default()
        }
    }

    /// Copy of this card with every amount clamped to be non-negative
    pub fn normalized(&self) -> Self {
        Self {
            daily_rate: non_negative(self.daily_rate),
            weekly_rate: non_negative(self.weekly_rate),
            monthly_rate: non_negative(self.monthly_rate),
            minimum_daily_rate: non_negative(self.minimum_daily_rate),
            minimum_weekly_rate: non_negative(self.minimum_weekly_rate),
            minimum_monthly_rate: non_negative(self.minimum_monthly_rate),
            minimum_rental_price: non_negative(self.minimum_rental_price),
            enforce_minimum_price: self.enforce_minimum_price,
        }
    }

    /// Rate for a single billing granularity, `None` when not offered
    ///
    /// `Mixed` has no rate of its own.
    pub fn rate_for(&self, granularity: Granularity) -> Option<Decimal> {
        let rate = match granularity {
            Granularity::Daily => self.daily_rate,
            Granularity::Weekly => self.weekly_rate,
            Granularity::Monthly => self.monthly_rate,
            Granularity::Mixed => return None,
        };
        positive(rate)
    }

    /// Minimum price for a granularity
    ///
    /// Falls back to `minimum_rental_price` when the granularity-specific
    /// floor is unset. `None` means no floor is configured.
    pub fn floor_for(&self, granularity: Granularity) -> Option<Decimal> {
        let specific = match granularity {
            Granularity::Daily => self.minimum_daily_rate,
            Granularity::Weekly => self.minimum_weekly_rate,
            Granularity::Monthly => self.minimum_monthly_rate,
            Granularity::Mixed => Decimal::ZERO,
        };
        positive(specific).or_else(|| positive(self.minimum_rental_price))
    }
}

#[inline]
fn non_negative(amount: Decimal) -> Decimal {
    amount.max(Decimal::ZERO)
}

#[inline]
fn positive(amount: Decimal) -> Option<Decimal> {
    (amount > Decimal::ZERO).then_some(amount)
}

/// Deserialize an amount from a number, a numeric string or null
///
/// Never fails: unusable input coerces to zero.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
    use std::fmt;

    struct AmountVisitor;

    impl<'de> Visitor<'de> for AmountVisitor {
        type Value = Decimal;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number, a string containing a number, or null")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Decimal, E>
        where
            E: de::Error,
        {
            Ok(Decimal::from(value))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Decimal, E>
        where
            E: de::Error,
        {
            Ok(Decimal::from(value))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Decimal, E>
        where
            E: de::Error,
        {
            Ok(Decimal::from_f64(value).unwrap_or(Decimal::ZERO))
        }

        fn visit_str<E>(self, value: &str) -> Result<Decimal, E>
        where
            E: de::Error,
        {
            Ok(Decimal::from_str(value.trim()).unwrap_or(Decimal::ZERO))
        }

        fn visit_bool<E>(self, _value: bool) -> Result<Decimal, E>
        where
            E: de::Error,
        {
            Ok(Decimal::ZERO)
        }

        fn visit_unit<E>(self) -> Result<Decimal, E>
        where
            E: de::Error,
        {
            Ok(Decimal::ZERO)
        }

        fn visit_none<E>(self) -> Result<Decimal, E>
        where
            E: de::Error,
        {
            Ok(Decimal::ZERO)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Decimal, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Decimal, A::Error>
        where
            A: SeqAccess<'de>,
        {
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(Decimal::ZERO)
        }

        fn visit_map<A>(self, mut map: A) -> Result<Decimal, A::Error>
        where
            A: MapAccess<'de>,
        {
            while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
            Ok(Decimal::ZERO)
        }
    }

    deserializer
        .deserialize_any(AmountVisitor)
        .map(non_negative)
}

/// Deserialize a flag where null means false
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rate_for_skips_zero_rates() {
        let card = RateCard::new(dec!(50), dec!(0), dec!(1000));

        assert_eq!(card.rate_for(Granularity::Daily), Some(dec!(50)));
        assert_eq!(card.rate_for(Granularity::Weekly), None);
        assert_eq!(card.rate_for(Granularity::Monthly), Some(dec!(1000)));
        assert_eq!(card.rate_for(Granularity::Mixed), None);
    }

    #[test]
    fn test_floor_falls_back_to_minimum_rental_price() {
        let card = RateCard {
            minimum_monthly_rate: dec!(900),
            minimum_rental_price: dec!(120),
            ..Default::default()
        };

        assert_eq!(card.floor_for(Granularity::Monthly), Some(dec!(900)));
        assert_eq!(card.floor_for(Granularity::Weekly), Some(dec!(120)));
        assert_eq!(card.floor_for(Granularity::Mixed), Some(dec!(120)));

        let no_floor = RateCard::default();
        assert_eq!(no_floor.floor_for(Granularity::Daily), None);
    }

    #[test]
    fn test_normalized_clamps_negative_amounts() {
        let card = RateCard {
            daily_rate: dec!(-10),
            weekly_rate: dec!(300),
            minimum_rental_price: dec!(-1),
            ..Default::default()
        };

        let normalized = card.normalized();
        assert_eq!(normalized.daily_rate, Decimal::ZERO);
        assert_eq!(normalized.weekly_rate, dec!(300));
        assert_eq!(normalized.minimum_rental_price, Decimal::ZERO);
    }

    #[test]
    fn test_lenient_deserialization() {
        let card: RateCard = serde_json::from_value(serde_json::json!({
            "daily_rate": 50,
            "weekly_rate": "300.500",
            "monthly_rate": null,
            "minimum_daily_rate": "n/a",
            "minimum_weekly_rate": -40,
            "minimum_monthly_rate": {"amount": 1},
            "enforce_minimum_price": null
        }))
        .unwrap();

        assert_eq!(card.daily_rate, dec!(50));
        assert_eq!(card.weekly_rate, dec!(300.500));
        assert_eq!(card.monthly_rate, Decimal::ZERO);
        assert_eq!(card.minimum_daily_rate, Decimal::ZERO);
        assert_eq!(card.minimum_weekly_rate, Decimal::ZERO);
        assert_eq!(card.minimum_monthly_rate, Decimal::ZERO);
        assert_eq!(card.minimum_rental_price, Decimal::ZERO);
        assert!(!card.enforce_minimum_price);
    }

    #[test]
    fn test_deserialize_fractional_number() {
        let card: RateCard = serde_json::from_str(r#"{"daily_rate": 12.75}"#).unwrap();
        assert_eq!(card.daily_rate, dec!(12.75));
    }
}

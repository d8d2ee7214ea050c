//! Mixed-period optimization
//!
//! Finds the cheapest way to cover a rental with whole 30-day months, whole
//! weeks and single days. Taking as many months as possible and then as many
//! weeks as possible is not always cheapest: a discounted weekly rate can beat
//! the month-first split, so both a month-first and a week-first strategy are
//! evaluated.
//!
//! Month-first: `floor(days / 30)` months, then the remainder is billed as the
//! cheapest of all days, whole weeks plus leftover days, or whole weeks with
//! the last partial week rounded up.
//!
//! Week-first: `floor(days / 7)` weeks plus leftover days.
//!
//! Equal totals are resolved in favour of larger billing units (more months,
//! then more weeks), which keeps the invoice short.

use fleetify_core::models::{
    Granularity, MixedDetails, RentalPeriod, DAYS_PER_MONTH, DAYS_PER_WEEK,
};
use rust_decimal::Decimal;
use std::cmp::Ordering;

use super::evaluator::Candidate;
use super::normalizer::NormalizedRates;

/// Months/weeks/days used to bill a rental
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Split {
    months: u32,
    weeks: u32,
    days: u32,
}

/// A split priced at concrete rates
#[derive(Debug, Clone, Copy)]
struct PricedSplit {
    split: Split,
    monthly_portion: Decimal,
    weekly_portion: Decimal,
    daily_portion: Decimal,
    total: Decimal,
}

impl PricedSplit {
    /// Cheaper first; on equal totals, more months then more weeks first
    fn cmp_preference(&self, other: &Self) -> Ordering {
        self.total
            .cmp(&other.total)
            .then_with(|| other.split.months.cmp(&self.split.months))
            .then_with(|| other.split.weeks.cmp(&self.split.weeks))
    }
}

struct Pricer {
    daily: Decimal,
    weekly: Option<Decimal>,
    monthly: Option<Decimal>,
}

impl Pricer {
    /// Price a split; `None` if it uses a unit that is not offered or its
    /// total overflows
    fn price(&self, split: Split) -> Option<PricedSplit> {
        let monthly_portion = portion(split.months, self.monthly)?;
        let weekly_portion = portion(split.weeks, self.weekly)?;
        let daily_portion = portion(split.days, Some(self.daily))?;
        let total = monthly_portion
            .checked_add(weekly_portion)?
            .checked_add(daily_portion)?;

        Some(PricedSplit {
            split,
            monthly_portion,
            weekly_portion,
            daily_portion,
            total,
        })
    }
}

fn portion(count: u32, rate: Option<Decimal>) -> Option<Decimal> {
    if count == 0 {
        return Some(Decimal::ZERO);
    }
    rate?.checked_mul(Decimal::from(count))
}

/// Splits tried by the month-first strategy
fn month_first_splits(days: u32, pricer: &Pricer) -> Vec<Split> {
    let months = days / DAYS_PER_MONTH;
    if pricer.monthly.is_none() || months == 0 {
        return Vec::new();
    }

    let remainder = days % DAYS_PER_MONTH;
    let mut splits = vec![Split {
        months,
        weeks: 0,
        days: remainder,
    }];

    if pricer.weekly.is_some() {
        if remainder >= DAYS_PER_WEEK {
            splits.push(Split {
                months,
                weeks: remainder / DAYS_PER_WEEK,
                days: remainder % DAYS_PER_WEEK,
            });
        }
        // Partial week rounded up, as weekly billing does; keeps 36 days
        // from costing more than 37 (1 month + 1 week).
        if remainder % DAYS_PER_WEEK != 0 {
            splits.push(Split {
                months,
                weeks: remainder.div_ceil(DAYS_PER_WEEK),
                days: 0,
            });
        }
    }

    splits
}

/// Split tried by the week-first strategy
fn week_first_split(days: u32, pricer: &Pricer) -> Option<Split> {
    if pricer.weekly.is_none() || days < DAYS_PER_WEEK {
        return None;
    }

    Some(Split {
        months: 0,
        weeks: days / DAYS_PER_WEEK,
        days: days % DAYS_PER_WEEK,
    })
}

/// Cheapest month/week/day combination for the rental
///
/// Returns `None` when no daily rate is offered (a remainder could not be
/// priced) or when no split can use a unit larger than a day; in the latter
/// case daily billing already covers the rental.
pub fn optimize(rates: &NormalizedRates, period: RentalPeriod) -> Option<Candidate> {
    let pricer = Pricer {
        daily: rates.daily?,
        weekly: rates.weekly,
        monthly: rates.monthly,
    };
    let days = period.days();

    let best = month_first_splits(days, &pricer)
        .into_iter()
        .chain(week_first_split(days, &pricer))
        .filter_map(|split| pricer.price(split))
        .min_by(PricedSplit::cmp_preference)?;

    Some(Candidate {
        granularity: Granularity::Mixed,
        total_cost: best.total,
        periods_used: days,
        mixed: Some(MixedDetails {
            months: best.split.months,
            weeks: best.split.weeks,
            remaining_days: best.split.days,
            monthly_portion: best.monthly_portion,
            weekly_portion: best.weekly_portion,
            daily_portion: best.daily_portion,
            combination_label: combination_label(best.split),
        }),
    })
}

/// Human-readable label such as "2 months + 1 week + 3 days"
fn combination_label(split: Split) -> String {
    [
        (split.months, "month"),
        (split.weeks, "week"),
        (split.days, "day"),
    ]
    .into_iter()
    .filter(|(count, _)| *count > 0)
    .map(|(count, unit)| {
        if count == 1 {
            format!("1 {}", unit)
        } else {
            format!("{} {}s", count, unit)
        }
    })
    .collect::<Vec<_>>()
    .join(" + ")
}

//! Achievement rate (성사율): share of schedule items that are confirmed.

use std::collections::HashMap;

use meridian_shared::types::SubsidiaryId;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::category::ClosingCategory;
use super::schedule::ScheduleItem;
use crate::subsidiary::{Region, Subsidiary};

/// `confirmed / total × 100`, rounded half away from zero to one decimal.
///
/// Zero when `total` is zero.
#[must_use]
pub fn rate_of(confirmed: usize, total: usize) -> Decimal {
    if total == 0 {
        return Decimal::new(0, 1);
    }
    let mut rate = (Decimal::from(confirmed) * Decimal::ONE_HUNDRED / Decimal::from(total))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    rate.rescale(1);
    rate
}

/// Rate over any subset of items.
pub fn achievement_rate<'a>(items: impl IntoIterator<Item = &'a ScheduleItem>) -> Decimal {
    let mut tally = Tally::default();
    for item in items {
        tally.record(item);
    }
    tally.rate()
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    confirmed: usize,
    total: usize,
}

impl Tally {
    fn record(&mut self, item: &ScheduleItem) {
        self.total += 1;
        if item.is_confirmed() {
            self.confirmed += 1;
        }
    }

    fn rate(self) -> Decimal {
        rate_of(self.confirmed, self.total)
    }
}

/// Rate for one subsidiary.
#[derive(Debug, Clone, Serialize)]
pub struct SubsidiaryRate {
    /// Subsidiary ID.
    pub subsidiary_id: SubsidiaryId,
    /// Display name.
    pub name: String,
    /// Confirmed items.
    pub confirmed: usize,
    /// All items.
    pub total: usize,
    /// Rate in percent.
    pub rate: Decimal,
}

/// Rate for one region.
#[derive(Debug, Clone, Serialize)]
pub struct RegionRate {
    /// Region.
    pub region: Region,
    /// Confirmed items.
    pub confirmed: usize,
    /// All items.
    pub total: usize,
    /// Rate in percent.
    pub rate: Decimal,
}

/// Rate for one closing category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryRate {
    /// Category.
    pub category: ClosingCategory,
    /// Category label.
    pub label: &'static str,
    /// Confirmed items.
    pub confirmed: usize,
    /// All items.
    pub total: usize,
    /// Rate in percent.
    pub rate: Decimal,
}

/// One row per subsidiary, in the order given.
#[must_use]
pub fn by_subsidiary(items: &[ScheduleItem], subsidiaries: &[Subsidiary]) -> Vec<SubsidiaryRate> {
    let mut tallies: HashMap<SubsidiaryId, Tally> = HashMap::new();
    for item in items {
        tallies.entry(item.subsidiary_id).or_default().record(item);
    }
    subsidiaries
        .iter()
        .map(|sub| {
            let tally = tallies.get(&sub.id).copied().unwrap_or_default();
            SubsidiaryRate {
                subsidiary_id: sub.id,
                name: sub.name.clone(),
                confirmed: tally.confirmed,
                total: tally.total,
                rate: tally.rate(),
            }
        })
        .collect()
}

/// One row per region. Items of unknown subsidiaries are not counted.
#[must_use]
pub fn by_region(items: &[ScheduleItem], subsidiaries: &[Subsidiary]) -> Vec<RegionRate> {
    let region_of: HashMap<SubsidiaryId, Region> =
        subsidiaries.iter().map(|sub| (sub.id, sub.region)).collect();
    let mut tallies: HashMap<Region, Tally> = HashMap::new();
    for item in items {
        if let Some(region) = region_of.get(&item.subsidiary_id) {
            tallies.entry(*region).or_default().record(item);
        }
    }
    Region::ALL
        .into_iter()
        .map(|region| {
            let tally = tallies.get(&region).copied().unwrap_or_default();
            RegionRate {
                region,
                confirmed: tally.confirmed,
                total: tally.total,
                rate: tally.rate(),
            }
        })
        .collect()
}

/// One row per closing category, in sidebar order.
#[must_use]
pub fn by_category(items: &[ScheduleItem]) -> Vec<CategoryRate> {
    let mut tallies: HashMap<ClosingCategory, Tally> = HashMap::new();
    for item in items {
        tallies.entry(item.category).or_default().record(item);
    }
    ClosingCategory::ALL
        .into_iter()
        .map(|category| {
            let tally = tallies.get(&category).copied().unwrap_or_default();
            CategoryRate {
                category,
                label: category.label(),
                confirmed: tally.confirmed,
                total: tally.total,
                rate: tally.rate(),
            }
        })
        .collect()
}

/// All rate views for the active quarter or range.
#[derive(Debug, Clone, Serialize)]
pub struct AchievementSummary {
    /// Rate over every item.
    pub overall: Decimal,
    /// Confirmed items.
    pub confirmed: usize,
    /// All items.
    pub total: usize,
    /// Per subsidiary.
    pub by_subsidiary: Vec<SubsidiaryRate>,
    /// Per region.
    pub by_region: Vec<RegionRate>,
    /// Per category.
    pub by_category: Vec<CategoryRate>,
}

impl AchievementSummary {
    /// Computes every view from scratch.
    #[must_use]
    pub fn compute(items: &[ScheduleItem], subsidiaries: &[Subsidiary]) -> Self {
        let confirmed = items.iter().filter(|item| item.is_confirmed()).count();
        Self {
            overall: rate_of(confirmed, items.len()),
            confirmed,
            total: items.len(),
            by_subsidiary: by_subsidiary(items, subsidiaries),
            by_region: by_region(items, subsidiaries),
            by_category: by_category(items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(0, 0, dec!(0.0))]
    #[case(0, 5, dec!(0.0))]
    #[case(1, 2, dec!(50.0))]
    #[case(1, 3, dec!(33.3))]
    #[case(2, 3, dec!(66.7))]
    #[case(1, 8, dec!(12.5))]
    #[case(1, 16, dec!(6.3))]
    #[case(7, 7, dec!(100.0))]
    fn test_rate_of(#[case] confirmed: usize, #[case] total: usize, #[case] expected: Decimal) {
        assert_eq!(rate_of(confirmed, total), expected);
    }

    #[test]
    fn test_rate_has_one_decimal_place() {
        assert_eq!(rate_of(1, 2).to_string(), "50.0");
        assert_eq!(rate_of(0, 0).to_string(), "0.0");
    }
}

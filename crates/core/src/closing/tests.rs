//! Property and scenario tests for the closing module.

use chrono::{Days, NaiveDate, Utc};
use meridian_shared::types::{QuarterId, ScheduleItemId, SubsidiaryId};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::subsidiary::{Region, Subsidiary};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn subsidiary(name: &str, region: Region) -> Subsidiary {
    Subsidiary {
        id: SubsidiaryId::new(),
        name: name.to_string(),
        code: name.to_uppercase(),
        country: "Country".to_string(),
        city: "City".to_string(),
        latitude: 0.0,
        longitude: 0.0,
        region,
        created_at: Utc::now(),
    }
}

fn planned(
    quarter_id: QuarterId,
    subsidiary_id: SubsidiaryId,
    category: ClosingCategory,
    planned_date: NaiveDate,
) -> ScheduleItem {
    ScheduleItem::planned(
        ScheduleItemId::new(),
        NewScheduleItem {
            quarter_id,
            subsidiary_id,
            category,
            planned_date,
        },
        Utc::now(),
    )
}

fn items_from_flags(flags: &[bool]) -> Vec<ScheduleItem> {
    let quarter_id = QuarterId::new();
    let sub = SubsidiaryId::new();
    flags
        .iter()
        .enumerate()
        .map(|(i, confirmed)| {
            let day = date(2025, 1, 1) + Days::new(i as u64 % 90);
            let mut item = planned(quarter_id, sub, ClosingCategory::ALL[i % 9], day);
            if *confirmed {
                item.confirm(day, Utc::now()).unwrap();
            }
            item
        })
        .collect()
}

proptest! {
    /// Rates stay within [0, 100].
    #[test]
    fn prop_rate_bounded(flags in prop::collection::vec(any::<bool>(), 0..200)) {
        let rate = achievement_rate(&items_from_flags(&flags));
        prop_assert!(rate >= Decimal::ZERO);
        prop_assert!(rate <= Decimal::ONE_HUNDRED);
    }

    /// The rate only depends on the confirmed/total ratio.
    #[test]
    fn prop_rate_order_invariant(flags in prop::collection::vec(any::<bool>(), 0..100)) {
        let mut items = items_from_flags(&flags);
        let forward = achievement_rate(&items);
        items.reverse();
        prop_assert_eq!(forward, achievement_rate(&items));
    }

    /// rate = round(100 × confirmed / total, 1dp).
    #[test]
    fn prop_rate_formula(flags in prop::collection::vec(any::<bool>(), 1..150)) {
        let confirmed = flags.iter().filter(|f| **f).count();
        let expected = (Decimal::from(confirmed) * Decimal::ONE_HUNDRED / Decimal::from(flags.len()))
            .round_dp_with_strategy(1, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
        prop_assert_eq!(achievement_rate(&items_from_flags(&flags)), expected);
    }

    /// Ranges longer than 60 days end exactly 60 days after the start.
    #[test]
    fn prop_custom_range_clamped(offset in 0u64..3650, length in 0u64..400) {
        let start = date(2020, 1, 1) + Days::new(offset);
        let end = start + Days::new(length);
        let range = clamp_custom_range(start, Some(end)).unwrap();
        if length > MAX_CUSTOM_RANGE_DAYS {
            prop_assert_eq!(range.end, start + Days::new(MAX_CUSTOM_RANGE_DAYS));
            prop_assert!(range.truncated);
        } else {
            prop_assert_eq!(range.end, end);
            prop_assert!(!range.truncated);
        }
    }

    /// The implied quarter is month0 / 3 + 1 and its bounds contain the date.
    #[test]
    fn prop_quarter_derivation(offset in 0u64..3650) {
        let day = date(2020, 1, 1) + Days::new(offset);
        let quarter = quarter_of_date(day);
        prop_assert_eq!(u32::from(quarter), chrono::Datelike::month0(&day) / 3 + 1);
        let (start, end) = quarter_bounds(chrono::Datelike::year(&day), quarter).unwrap();
        prop_assert!(start <= day && day <= end);
    }
}

#[test]
fn test_acme_us_half_confirmed() {
    let acme = subsidiary("Acme US", Region::Americas);
    let quarter = Quarter::pending(2025, 1).unwrap();
    let quarter_id = QuarterId::new();
    let day = date(2025, 2, 14);
    assert!(quarter.contains(day));

    let mut confirmed = planned(quarter_id, acme.id, ClosingCategory::SalesDetail, day);
    confirmed.confirm(day, Utc::now()).unwrap();
    let open = planned(quarter_id, acme.id, ClosingCategory::LeaseDetail, day);

    let rates = by_subsidiary(&[confirmed, open], std::slice::from_ref(&acme));
    assert_eq!(rates.len(), 1);
    assert_eq!(rates[0].name, "Acme US");
    assert_eq!(rates[0].rate, dec!(50.0));
}

#[test]
fn test_confirm_flow_updates_rate() {
    let acme = subsidiary("Acme US", Region::Americas);
    let quarter =
        Quarter::persisted(QuarterId::new(), 2025, 1, date(2025, 1, 1), date(2025, 3, 31))
            .unwrap();
    let quarter_id = quarter.durable_id().unwrap();
    let mut items = vec![planned(
        quarter_id,
        acme.id,
        ClosingCategory::EmployeeJd,
        date(2025, 3, 10),
    )];
    let item_id = items[0].id;
    assert_eq!(achievement_rate(&items), dec!(0.0));

    let action = decide(&quarter, &items, &Gesture::BadgeClick { item_id }).unwrap();
    assert_eq!(action, GridAction::PromptConfirmDate { item_id });

    items[0].confirm(date(2025, 3, 15), Utc::now()).unwrap();
    assert_eq!(items[0].status, ScheduleStatus::Confirmed);
    assert_eq!(items[0].confirmed_date, Some(date(2025, 3, 15)));

    let summary = AchievementSummary::compute(&items, std::slice::from_ref(&acme));
    assert_eq!(summary.overall, dec!(100.0));
    assert_eq!(summary.by_subsidiary[0].rate, dec!(100.0));
}

#[test]
fn test_confirm_date_may_fall_after_quarter_end() {
    let acme = subsidiary("Acme US", Region::Americas);
    let quarter =
        Quarter::persisted(QuarterId::new(), 2025, 1, date(2025, 1, 1), date(2025, 3, 31))
            .unwrap();
    let mut items = vec![planned(
        quarter.durable_id().unwrap(),
        acme.id,
        ClosingCategory::Pkg,
        date(2025, 3, 28),
    )];

    assert!(!quarter.contains(date(2025, 4, 10)));
    items[0].confirm(date(2025, 4, 10), Utc::now()).unwrap();
    assert_eq!(items[0].confirmed_date, Some(date(2025, 4, 10)));
    assert_eq!(achievement_rate(&items), dec!(100.0));
}

#[test]
fn test_second_category_drop_is_independent() {
    let acme = subsidiary("Acme US", Region::Americas);
    let quarter =
        Quarter::persisted(QuarterId::new(), 2025, 1, date(2025, 1, 1), date(2025, 3, 31))
            .unwrap();
    let quarter_id = quarter.durable_id().unwrap();
    let day = date(2025, 1, 20);
    let first = planned(quarter_id, acme.id, ClosingCategory::Pkg, day);
    let mut items = vec![first.clone()];

    let action = decide(
        &quarter,
        &items,
        &Gesture::CategoryDrop {
            subsidiary_id: acme.id,
            date: day,
            category: ClosingCategory::ArDetail,
        },
    )
    .unwrap();
    let GridAction::Create {
        subsidiary_id,
        category,
        planned_date,
    } = action
    else {
        panic!("expected create, got {action:?}");
    };
    items.push(planned(quarter_id, subsidiary_id, category, planned_date));

    assert_eq!(items.len(), 2);
    assert_eq!(items[0], first);
    assert!(items.iter().all(|item| item.occupies(acme.id, day)));
}

#[test]
fn test_views_split_by_region_and_category() {
    let us = subsidiary("Acme US", Region::Americas);
    let de = subsidiary("Acme DE", Region::Europe);
    let quarter_id = QuarterId::new();
    let day = date(2025, 1, 6);

    let mut us_pkg = planned(quarter_id, us.id, ClosingCategory::Pkg, day);
    us_pkg.confirm(day, Utc::now()).unwrap();
    let us_sales = planned(quarter_id, us.id, ClosingCategory::SalesDetail, day);
    let mut de_pkg = planned(quarter_id, de.id, ClosingCategory::Pkg, day);
    de_pkg.confirm(day, Utc::now()).unwrap();
    let orphan = planned(quarter_id, SubsidiaryId::new(), ClosingCategory::Pkg, day);

    let items = vec![us_pkg, us_sales, de_pkg, orphan];
    let subs = vec![us, de];

    let regions = by_region(&items, &subs);
    assert_eq!(regions[0].region, Region::Americas);
    assert_eq!(regions[0].rate, dec!(50.0));
    assert_eq!(regions[1].rate, dec!(100.0));
    assert_eq!(regions[2].total, 0);
    assert_eq!(regions[2].rate, dec!(0.0));

    let categories = by_category(&items);
    let pkg = categories
        .iter()
        .find(|c| c.category == ClosingCategory::Pkg)
        .unwrap();
    assert_eq!((pkg.confirmed, pkg.total), (2, 3));
    assert_eq!(pkg.rate, dec!(66.7));

    let summary = AchievementSummary::compute(&items, &subs);
    assert_eq!(summary.total, 4);
    assert_eq!(summary.overall, dec!(50.0));
}

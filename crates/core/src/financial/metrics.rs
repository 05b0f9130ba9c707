//! Derived financial ratios.

use rust_decimal::Decimal;

/// `profit / revenue × 100`, zero when revenue is zero.
#[must_use]
pub fn operating_margin(profit: Decimal, revenue: Decimal) -> Decimal {
    if revenue.is_zero() {
        return Decimal::ZERO;
    }
    profit / revenue * Decimal::ONE_HUNDRED
}

/// `actual / target × 100`, zero when the target is zero or missing.
#[must_use]
pub fn target_achievement(actual: Decimal, target: Option<Decimal>) -> Decimal {
    match target {
        Some(target) if !target.is_zero() => actual / target * Decimal::ONE_HUNDRED,
        _ => Decimal::ZERO,
    }
}

//! Display formatting for financial figures.

use rust_decimal::{Decimal, RoundingStrategy};

/// One 억 (10^8) won.
const HUNDRED_MILLION: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// KRW amount in 억원 with thousands grouping and up to three decimals.
///
/// `50_000_000_000` becomes `500억원`.
#[must_use]
pub fn format_krw(amount: Decimal) -> String {
    let eok = (amount / HUNDRED_MILLION)
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    format!("{}억원", group_thousands(&eok.to_string()))
}

/// Margin with one decimal and `%`.
#[must_use]
pub fn format_margin(margin: Decimal) -> String {
    format!("{}%", one_decimal(margin))
}

/// `YYYY QN`.
#[must_use]
pub fn format_period(year: i32, quarter: u8) -> String {
    format!("{year} Q{quarter}")
}

/// Compact number with a K, M or B suffix and one decimal.
#[must_use]
pub fn format_large_number(value: Decimal) -> String {
    const UNITS: [(i64, &str); 3] = [(1_000_000_000, "B"), (1_000_000, "M"), (1_000, "K")];
    for (size, suffix) in UNITS {
        let size = Decimal::from(size);
        if value >= size {
            return format!("{}{suffix}", one_decimal(value / size));
        }
    }
    value.normalize().to_string()
}

fn one_decimal(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(1);
    rounded
}

fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = number
        .strip_prefix('-')
        .map_or(("", number), |rest| ("-", rest));
    let (integer, fraction) = unsigned
        .split_once('.')
        .map_or((unsigned, None), |(i, f)| (i, Some(f)));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(50000000000), "500억원")]
    #[case(dec!(123456789012), "1,234.568억원")]
    #[case(dec!(150000000), "1.5억원")]
    #[case(dec!(0), "0억원")]
    #[case(dec!(-250000000000), "-2,500억원")]
    fn test_format_krw(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(format_krw(amount), expected);
    }

    #[rstest]
    #[case(dec!(10.87), "10.9%")]
    #[case(dec!(5), "5.0%")]
    #[case(dec!(-3.25), "-3.3%")]
    fn test_format_margin(#[case] margin: Decimal, #[case] expected: &str) {
        assert_eq!(format_margin(margin), expected);
    }

    #[test]
    fn test_format_period() {
        assert_eq!(format_period(2024, 4), "2024 Q4");
    }

    #[rstest]
    #[case(dec!(1500000), "1.5M")]
    #[case(dec!(2000000000), "2.0B")]
    #[case(dec!(1000), "1.0K")]
    #[case(dec!(999), "999")]
    fn test_format_large_number(#[case] value: Decimal, #[case] expected: &str) {
        assert_eq!(format_large_number(value), expected);
    }
}

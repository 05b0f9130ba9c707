//! Quarter keys, quarter boundaries and custom date ranges.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate};
use meridian_shared::types::QuarterId;
use serde::{Serialize, Serializer};

use super::error::ClosingError;

/// Longest custom range, in days after the start date.
pub const MAX_CUSTOM_RANGE_DAYS: u64 = 60;

/// Returns the quarter (1..=4) a date falls in.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn quarter_of_date(date: NaiveDate) -> u8 {
    (date.month0() / 3 + 1) as u8
}

/// Returns the first and last calendar day of a quarter.
///
/// # Errors
///
/// Returns `InvalidQuarter` outside 1..=4 and `InvalidYear` when the dates
/// cannot be represented.
pub fn quarter_bounds(year: i32, quarter: u8) -> Result<(NaiveDate, NaiveDate), ClosingError> {
    if !(1..=4).contains(&quarter) {
        return Err(ClosingError::InvalidQuarter(quarter));
    }
    let first_month = u32::from(quarter) * 3 - 2;
    let start =
        NaiveDate::from_ymd_opt(year, first_month, 1).ok_or(ClosingError::InvalidYear(year))?;
    let next_start = if quarter == 4 {
        year.checked_add(1)
            .and_then(|next_year| NaiveDate::from_ymd_opt(next_year, 1, 1))
    } else {
        NaiveDate::from_ymd_opt(year, first_month + 3, 1)
    };
    let end = next_start
        .and_then(|date| date.pred_opt())
        .ok_or(ClosingError::InvalidYear(year))?;
    Ok((start, end))
}

/// A user-selected date range after clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CustomRange {
    /// First day.
    pub start: NaiveDate,
    /// Last day.
    pub end: NaiveDate,
    /// True when the requested end was cut back to the limit.
    pub truncated: bool,
}

/// Clamps a custom range to at most [`MAX_CUSTOM_RANGE_DAYS`] after its start.
///
/// A missing end selects the start day alone.
///
/// # Errors
///
/// Returns `InvertedRange` when the end precedes the start.
pub fn clamp_custom_range(
    start: NaiveDate,
    end: Option<NaiveDate>,
) -> Result<CustomRange, ClosingError> {
    let end = end.unwrap_or(start);
    if end < start {
        return Err(ClosingError::InvertedRange { start, end });
    }
    let limit = start
        .checked_add_days(Days::new(MAX_CUSTOM_RANGE_DAYS))
        .unwrap_or(NaiveDate::MAX);
    if end > limit {
        Ok(CustomRange {
            start,
            end: limit,
            truncated: true,
        })
    } else {
        Ok(CustomRange {
            start,
            end,
            truncated: false,
        })
    }
}

/// Identifies the quarter a schedule view is built on.
///
/// Only `Persisted` carries an id that may be stored as a foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuarterKey {
    /// Row in the `quarters` table.
    Persisted(QuarterId),
    /// Quarter without a row yet.
    Pending {
        /// Calendar year.
        year: i32,
        /// Quarter number.
        quarter: u8,
    },
    /// User-selected date range.
    Custom {
        /// First day.
        start: NaiveDate,
        /// Last day.
        end: NaiveDate,
    },
}

impl fmt::Display for QuarterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Persisted(id) => write!(f, "{id}"),
            Self::Pending { year, quarter } => write!(f, "temp-{year}-{quarter}"),
            Self::Custom { start, end } => write!(
                f,
                "custom-{}-{}",
                start.format("%Y%m%d"),
                end.format("%Y%m%d")
            ),
        }
    }
}

impl Serialize for QuarterKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A quarter or custom range with its resolved span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quarter {
    /// Persisted id or transient key.
    #[serde(rename = "id")]
    pub key: QuarterKey,
    /// Calendar year.
    pub year: i32,
    /// Quarter number (1..=4).
    pub quarter: u8,
    /// First day of the span.
    pub start_date: NaiveDate,
    /// Last day of the span.
    pub end_date: NaiveDate,
}

impl Quarter {
    /// Maps a stored quarter row.
    ///
    /// # Errors
    ///
    /// Returns an error when the quarter number or the span is invalid.
    pub fn persisted(
        id: QuarterId,
        year: i32,
        quarter: u8,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, ClosingError> {
        if !(1..=4).contains(&quarter) {
            return Err(ClosingError::InvalidQuarter(quarter));
        }
        if end_date < start_date {
            return Err(ClosingError::InvertedRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            key: QuarterKey::Persisted(id),
            year,
            quarter,
            start_date,
            end_date,
        })
    }

    /// Synthesizes a quarter that has no row yet.
    ///
    /// # Errors
    ///
    /// Returns an error when the quarter does not exist on the calendar.
    pub fn pending(year: i32, quarter: u8) -> Result<Self, ClosingError> {
        let (start_date, end_date) = quarter_bounds(year, quarter)?;
        Ok(Self {
            key: QuarterKey::Pending { year, quarter },
            year,
            quarter,
            start_date,
            end_date,
        })
    }

    /// Builds a custom-range view; the quarter number follows the start month.
    #[must_use]
    pub fn custom(range: &CustomRange) -> Self {
        Self {
            key: QuarterKey::Custom {
                start: range.start,
                end: range.end,
            },
            year: range.start.year(),
            quarter: quarter_of_date(range.start),
            start_date: range.start,
            end_date: range.end,
        }
    }

    /// Id usable as a foreign key, if persisted.
    #[must_use]
    pub const fn durable_id(&self) -> Option<QuarterId> {
        match self.key {
            QuarterKey::Persisted(id) => Some(id),
            _ => None,
        }
    }

    /// True in custom range mode.
    #[must_use]
    pub const fn is_custom(&self) -> bool {
        matches!(self.key, QuarterKey::Custom { .. })
    }

    /// True when the span includes `date`.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Checks that `date` lies in the span.
    ///
    /// # Errors
    ///
    /// Returns `DateOutsideSpan` otherwise.
    pub fn ensure_contains(&self, date: NaiveDate) -> Result<(), ClosingError> {
        if self.contains(date) {
            Ok(())
        } else {
            Err(ClosingError::DateOutsideSpan {
                date,
                start: self.start_date,
                end: self.end_date,
            })
        }
    }

    /// Every day of the span in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date
            .iter_days()
            .take_while(move |day| *day <= self.end_date)
    }
}

/// How the user picked the schedule period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodSelection {
    /// A calendar quarter.
    Quarter {
        /// Calendar year.
        year: i32,
        /// Quarter number.
        quarter: u8,
    },
    /// A custom date range.
    Custom {
        /// First day.
        start: NaiveDate,
        /// Last day; defaults to the start.
        end: Option<NaiveDate>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(2025, 1, date(2025, 1, 1), date(2025, 3, 31))]
    #[case(2025, 2, date(2025, 4, 1), date(2025, 6, 30))]
    #[case(2025, 3, date(2025, 7, 1), date(2025, 9, 30))]
    #[case(2025, 4, date(2025, 10, 1), date(2025, 12, 31))]
    #[case(2024, 1, date(2024, 1, 1), date(2024, 3, 31))]
    fn test_quarter_bounds(
        #[case] year: i32,
        #[case] quarter: u8,
        #[case] start: NaiveDate,
        #[case] end: NaiveDate,
    ) {
        assert_eq!(quarter_bounds(year, quarter).unwrap(), (start, end));
    }

    #[rstest]
    #[case(0)]
    #[case(5)]
    fn test_quarter_bounds_rejects_bad_quarter(#[case] quarter: u8) {
        assert_eq!(
            quarter_bounds(2025, quarter),
            Err(ClosingError::InvalidQuarter(quarter))
        );
    }

    #[test]
    fn test_pending_key_display() {
        let quarter = Quarter::pending(2025, 1).unwrap();
        assert_eq!(quarter.key.to_string(), "temp-2025-1");
        assert_eq!(quarter.durable_id(), None);
        assert!(!quarter.is_custom());
    }

    #[test]
    fn test_custom_key_display_and_quarter() {
        let range = clamp_custom_range(date(2025, 5, 20), Some(date(2025, 6, 10))).unwrap();
        let quarter = Quarter::custom(&range);
        assert_eq!(quarter.key.to_string(), "custom-20250520-20250610");
        assert_eq!(quarter.quarter, 2);
        assert!(quarter.is_custom());
    }

    #[test]
    fn test_custom_range_truncated_to_sixty_days() {
        let range = clamp_custom_range(date(2025, 1, 1), Some(date(2025, 6, 1))).unwrap();
        assert_eq!(range.end, date(2025, 3, 2));
        assert!(range.truncated);
    }

    #[test]
    fn test_custom_range_exactly_sixty_days_kept() {
        let range = clamp_custom_range(date(2025, 1, 1), Some(date(2025, 3, 2))).unwrap();
        assert_eq!(range.end, date(2025, 3, 2));
        assert!(!range.truncated);
    }

    #[test]
    fn test_custom_range_missing_end_is_single_day() {
        let range = clamp_custom_range(date(2025, 8, 4), None).unwrap();
        assert_eq!(range.start, range.end);
    }

    #[test]
    fn test_custom_range_inverted() {
        assert!(matches!(
            clamp_custom_range(date(2025, 8, 4), Some(date(2025, 8, 1))),
            Err(ClosingError::InvertedRange { .. })
        ));
    }

    #[test]
    fn test_days_cover_span() {
        let quarter = Quarter::pending(2025, 1).unwrap();
        let days: Vec<_> = quarter.days().collect();
        assert_eq!(days.len(), 90);
        assert_eq!(days.first(), Some(&date(2025, 1, 1)));
        assert_eq!(days.last(), Some(&date(2025, 3, 31)));
    }

    #[test]
    fn test_persisted_serializes_plain_id() {
        let id = QuarterId::new();
        let quarter =
            Quarter::persisted(id, 2025, 1, date(2025, 1, 1), date(2025, 3, 31)).unwrap();
        let json = serde_json::to_value(&quarter).unwrap();
        assert_eq!(json["id"], id.to_string());
        assert_eq!(json["start_date"], "2025-01-01");
    }
}

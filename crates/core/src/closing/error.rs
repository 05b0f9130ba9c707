//! Closing error types.

use chrono::NaiveDate;
use meridian_shared::types::ScheduleItemId;
use thiserror::Error;

/// Quarterly closing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClosingError {
    /// Quarter number outside 1..=4.
    #[error("Quarter must be between 1 and 4, got {0}")]
    InvalidQuarter(u8),

    /// Year cannot be represented as a calendar date.
    #[error("Year {0} is out of range")]
    InvalidYear(i32),

    /// Custom range ends before it starts.
    #[error("End date {end} is before start date {start}")]
    InvertedRange {
        /// Range start.
        start: NaiveDate,
        /// Range end.
        end: NaiveDate,
    },

    /// Schedule items cannot be written in custom range mode.
    #[error("Schedule items cannot be added while a custom date range is selected")]
    CustomRangeReadOnly,

    /// Date lies outside the active quarter or range.
    #[error("Date {date} is outside {start} ~ {end}")]
    DateOutsideSpan {
        /// Offending date.
        date: NaiveDate,
        /// Span start.
        start: NaiveDate,
        /// Span end.
        end: NaiveDate,
    },

    /// Requested month is not part of the active span.
    #[error("Month {year}-{month:02} is outside the selected period")]
    MonthOutsideSpan {
        /// Requested year.
        year: i32,
        /// Requested month (1-based).
        month: u32,
    },

    /// Schedule item not found in the active view.
    #[error("Schedule item not found: {0}")]
    ItemNotFound(ScheduleItemId),

    /// Item is already confirmed.
    #[error("이미 확정된 일정입니다.")]
    AlreadyConfirmed(ScheduleItemId),

    /// Stored status and confirmed date disagree.
    #[error("Schedule item {0} has an inconsistent confirmation state")]
    InconsistentConfirmation(ScheduleItemId),

    /// Unknown closing category identifier.
    #[error("Unknown closing category: {0}")]
    UnknownCategory(String),

    /// Unknown schedule status.
    #[error("Unknown schedule status: {0}")]
    UnknownStatus(String),
}

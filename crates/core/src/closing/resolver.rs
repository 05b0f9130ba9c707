//! Turning a period selection into a quarter view, and a quarter into a
//! durable row when a write needs one.

use std::fmt;
use std::future::Future;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{info, warn};

use super::error::ClosingError;
use super::quarter::{PeriodSelection, Quarter, QuarterKey, clamp_custom_range, quarter_bounds};

/// Insert failure reported by a [`QuarterStore`].
#[derive(Debug, Error)]
pub enum QuarterInsertError<E> {
    /// A row for this (year, quarter) already exists.
    #[error("Quarter already exists")]
    Duplicate,

    /// Any other storage failure.
    #[error("{0}")]
    Store(E),
}

/// Persistence for quarter rows.
pub trait QuarterStore: Send + Sync {
    /// Storage error.
    type Error: fmt::Debug + fmt::Display + Send;

    /// Looks up the persisted quarter for (year, quarter).
    fn find_quarter(
        &self,
        year: i32,
        quarter: u8,
    ) -> impl Future<Output = Result<Option<Quarter>, Self::Error>> + Send;

    /// Inserts a quarter row and returns it.
    fn insert_quarter(
        &self,
        year: i32,
        quarter: u8,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> impl Future<Output = Result<Quarter, QuarterInsertError<Self::Error>>> + Send;
}

/// Quarter resolution failure.
#[derive(Debug, Error)]
pub enum ResolveError<E> {
    /// Invalid selection.
    #[error(transparent)]
    Closing(#[from] ClosingError),

    /// Storage failure.
    #[error("Quarter store failed: {0}")]
    Store(E),

    /// Insert lost a race and the winning row could not be read back.
    #[error("Quarter {year} Q{quarter} could not be created")]
    Conflict {
        /// Calendar year.
        year: i32,
        /// Quarter number.
        quarter: u8,
    },
}

/// The quarter a schedule view is built on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPeriod {
    /// Persisted, pending or custom quarter.
    pub quarter: Quarter,
    /// True when a custom range was cut to the maximum length.
    pub range_truncated: bool,
}

/// Resolves a selection for reading. Never writes.
///
/// # Errors
///
/// Returns invalid selections as `Closing` and storage failures as `Store`.
pub async fn resolve_view<S: QuarterStore>(
    store: &S,
    selection: PeriodSelection,
) -> Result<ResolvedPeriod, ResolveError<S::Error>> {
    match selection {
        PeriodSelection::Quarter { year, quarter } => {
            quarter_bounds(year, quarter)?;
            let found = store
                .find_quarter(year, quarter)
                .await
                .map_err(ResolveError::Store)?;
            let quarter = match found {
                Some(persisted) => persisted,
                None => Quarter::pending(year, quarter)?,
            };
            Ok(ResolvedPeriod {
                quarter,
                range_truncated: false,
            })
        }
        PeriodSelection::Custom { start, end } => {
            let range = clamp_custom_range(start, end)?;
            if range.truncated {
                warn!(
                    start = %range.start,
                    requested_end = ?end,
                    end = %range.end,
                    "Custom range truncated to maximum length"
                );
            }
            Ok(ResolvedPeriod {
                quarter: Quarter::custom(&range),
                range_truncated: range.truncated,
            })
        }
    }
}

/// Finds or creates the persisted row for (year, quarter).
///
/// When the insert hits the unique constraint, the row written by the
/// concurrent caller is read back and adopted.
///
/// # Errors
///
/// Returns `Conflict` if that read-back finds nothing.
pub async fn ensure_durable<S: QuarterStore>(
    store: &S,
    year: i32,
    quarter: u8,
) -> Result<Quarter, ResolveError<S::Error>> {
    let (start_date, end_date) = quarter_bounds(year, quarter)?;

    if let Some(existing) = store
        .find_quarter(year, quarter)
        .await
        .map_err(ResolveError::Store)?
    {
        return Ok(existing);
    }

    match store
        .insert_quarter(year, quarter, start_date, end_date)
        .await
    {
        Ok(created) => {
            info!(year, quarter, quarter_id = %created.key, "Quarter created");
            Ok(created)
        }
        Err(QuarterInsertError::Duplicate) => {
            warn!(year, quarter, "Quarter inserted concurrently, adopting existing row");
            store
                .find_quarter(year, quarter)
                .await
                .map_err(ResolveError::Store)?
                .ok_or(ResolveError::Conflict { year, quarter })
        }
        Err(QuarterInsertError::Store(e)) => Err(ResolveError::Store(e)),
    }
}

/// Durable form of a resolved quarter.
///
/// # Errors
///
/// Returns `CustomRangeReadOnly` for custom ranges.
pub async fn durable_for<S: QuarterStore>(
    store: &S,
    quarter: &Quarter,
) -> Result<Quarter, ResolveError<S::Error>> {
    match quarter.key {
        QuarterKey::Persisted(_) => Ok(quarter.clone()),
        QuarterKey::Pending { year, quarter: number } => ensure_durable(store, year, number).await,
        QuarterKey::Custom { .. } => Err(ClosingError::CustomRangeReadOnly.into()),
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;

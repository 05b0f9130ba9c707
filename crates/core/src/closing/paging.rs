//! One-month pages over a quarter or custom range.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Serialize, Serializer};

use super::error::ClosingError;

/// A calendar month, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    /// Calendar year.
    pub year: i32,
    /// Month, 1-based.
    pub month: u32,
}

impl YearMonth {
    /// Month containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Korean heading, e.g. `2025년 3월`.
    #[must_use]
    pub fn heading(self) -> String {
        format!("{}년 {}월", self.year, self.month)
    }

    fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid month '{s}', expected YYYY-MM");
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self { year, month })
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The month currently shown for a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthPager {
    start: NaiveDate,
    end: NaiveDate,
    current: YearMonth,
}

impl MonthPager {
    /// Pager on the span's first month.
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            current: YearMonth::of(start),
        }
    }

    /// Pager on `month`, or on the first month when `None`.
    ///
    /// # Errors
    ///
    /// Returns `MonthOutsideSpan` when the month is not part of the span.
    pub fn at(
        start: NaiveDate,
        end: NaiveDate,
        month: Option<YearMonth>,
    ) -> Result<Self, ClosingError> {
        let pager = Self::new(start, end);
        match month {
            None => Ok(pager),
            Some(month) if pager.first_month() <= month && month <= pager.last_month() => {
                Ok(Self {
                    current: month,
                    ..pager
                })
            }
            Some(month) => Err(ClosingError::MonthOutsideSpan {
                year: month.year,
                month: month.month,
            }),
        }
    }

    /// Month being shown.
    #[must_use]
    pub const fn current(&self) -> YearMonth {
        self.current
    }

    /// First month of the span.
    #[must_use]
    pub fn first_month(&self) -> YearMonth {
        YearMonth::of(self.start)
    }

    /// Last month of the span.
    #[must_use]
    pub fn last_month(&self) -> YearMonth {
        YearMonth::of(self.end)
    }

    /// False on the first month.
    #[must_use]
    pub fn can_go_prev(&self) -> bool {
        self.current > self.first_month()
    }

    /// False on the last month.
    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.current < self.last_month()
    }

    /// Previous month, if any.
    #[must_use]
    pub fn prev(&self) -> Option<Self> {
        if !self.can_go_prev() {
            return None;
        }
        self.shift(|day| day.checked_sub_months(Months::new(1)))
    }

    /// Next month, if any.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        if !self.can_go_next() {
            return None;
        }
        self.shift(|day| day.checked_add_months(Months::new(1)))
    }

    /// Days of the current month that fall inside the span.
    #[must_use]
    pub fn visible_days(&self) -> Vec<NaiveDate> {
        self.start
            .iter_days()
            .take_while(|day| *day <= self.end)
            .filter(|day| YearMonth::of(*day) == self.current)
            .collect()
    }

    fn shift(&self, step: impl Fn(NaiveDate) -> Option<NaiveDate>) -> Option<Self> {
        let day = step(self.current.first_day()?)?;
        Some(Self {
            current: YearMonth::of(day),
            ..*self
        })
    }
}

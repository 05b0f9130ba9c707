//! Quarterly closing: quarters, the schedule grid and achievement rates.

pub mod achievement;
pub mod category;
pub mod error;
pub mod grid;
pub mod paging;
pub mod quarter;
pub mod resolver;
pub mod schedule;

#[cfg(test)]
mod tests;

pub use achievement::{
    AchievementSummary, CategoryRate, RegionRate, SubsidiaryRate, achievement_rate, by_category,
    by_region, by_subsidiary, rate_of,
};
pub use category::ClosingCategory;
pub use error::ClosingError;
pub use grid::{DeletePrompt, Gesture, GridAction, GridNotice, decide};
pub use paging::{MonthPager, YearMonth};
pub use quarter::{
    CustomRange, MAX_CUSTOM_RANGE_DAYS, PeriodSelection, Quarter, QuarterKey, clamp_custom_range,
    quarter_bounds, quarter_of_date,
};
pub use resolver::{
    QuarterInsertError, QuarterStore, ResolveError, ResolvedPeriod, durable_for, ensure_durable,
    resolve_view,
};
pub use schedule::{NewScheduleItem, ScheduleItem, ScheduleStatus};

//! Issue tracking: categories, drafts and updates, filtering, statistics.

pub mod error;
pub mod query;
pub mod stats;
pub mod types;

pub use error::IssueError;
pub use query::{IssueFilters, IssueSort, filter_and_sort};
pub use stats::{CategoryCount, EntityCount, IssueStats, category_counts, entity_counts};
pub use types::{Issue, IssueCategory, IssueDraft, IssueStatus, IssueUpdate, completion_stamp};

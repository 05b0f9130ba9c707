//! Issue list filtering and sorting.

use std::collections::HashMap;
use std::str::FromStr;

use meridian_shared::types::SubsidiaryId;
use serde::{Deserialize, Serialize};

use super::error::IssueError;
use super::types::{Issue, IssueCategory, IssueStatus};
use crate::subsidiary::Subsidiary;

/// Sort order for the issue list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSort {
    /// Newest first.
    #[default]
    CreatedDesc,
    /// Oldest first.
    CreatedAsc,
    /// By owning subsidiary.
    Entity,
    /// By category.
    Category,
}

impl FromStr for IssueSort {
    type Err = IssueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created_desc" => Ok(Self::CreatedDesc),
            "created_asc" => Ok(Self::CreatedAsc),
            "entity" => Ok(Self::Entity),
            "category" => Ok(Self::Category),
            other => Err(IssueError::UnknownSort(other.to_string())),
        }
    }
}

/// Filters applied to the issue list. Empty sets match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilters {
    /// Case-insensitive text over title, category and subsidiary name.
    pub search: Option<String>,
    /// Allowed categories.
    pub categories: Vec<IssueCategory>,
    /// Allowed subsidiaries.
    pub entities: Vec<SubsidiaryId>,
    /// Allowed statuses.
    pub statuses: Vec<IssueStatus>,
}

impl IssueFilters {
    fn matches(&self, issue: &Issue, names: &HashMap<SubsidiaryId, String>) -> bool {
        if let Some(needle) = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            let needle = needle.to_lowercase();
            let in_name = names
                .get(&issue.entity_id)
                .is_some_and(|name| name.contains(&needle));
            if !(issue.title.to_lowercase().contains(&needle)
                || issue.category.as_str().to_lowercase().contains(&needle)
                || in_name)
            {
                return false;
            }
        }
        (self.categories.is_empty() || self.categories.contains(&issue.category))
            && (self.entities.is_empty() || self.entities.contains(&issue.entity_id))
            && (self.statuses.is_empty() || self.statuses.contains(&issue.status))
    }
}

/// Applies `filters` then sorts. Sorting is stable.
#[must_use]
pub fn filter_and_sort(
    issues: &[Issue],
    subsidiaries: &[Subsidiary],
    filters: &IssueFilters,
    sort: IssueSort,
) -> Vec<Issue> {
    let names: HashMap<SubsidiaryId, String> = subsidiaries
        .iter()
        .map(|sub| (sub.id, sub.name.to_lowercase()))
        .collect();

    let mut result: Vec<Issue> = issues
        .iter()
        .filter(|issue| filters.matches(issue, &names))
        .cloned()
        .collect();

    match sort {
        IssueSort::CreatedDesc => result.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        IssueSort::CreatedAsc => result.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        IssueSort::Entity => {
            result.sort_by(|a, b| a.entity_id.to_string().cmp(&b.entity_id.to_string()));
        }
        IssueSort::Category => result.sort_by(|a, b| a.category.as_str().cmp(b.category.as_str())),
    }
    result
}

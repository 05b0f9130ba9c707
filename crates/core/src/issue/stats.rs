//! Issue statistics over the unfiltered list.

use meridian_shared::types::SubsidiaryId;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::types::{Issue, IssueCategory, IssueStatus};
use crate::subsidiary::Subsidiary;

/// Headline counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IssueStats {
    /// All issues.
    pub total: usize,
    /// Issues still in progress.
    pub in_progress: usize,
    /// Completed issues.
    pub completed: usize,
    /// Completed share, whole percent.
    pub completion_rate: u32,
}

impl IssueStats {
    /// Computes counts for `issues`.
    #[must_use]
    pub fn compute(issues: &[Issue]) -> Self {
        let total = issues.len();
        let completed = issues
            .iter()
            .filter(|issue| issue.status == IssueStatus::Completed)
            .count();
        let completion_rate = if total == 0 {
            0
        } else {
            (Decimal::from(completed) * Decimal::ONE_HUNDRED / Decimal::from(total))
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_u32()
                .unwrap_or(0)
        };
        Self {
            total,
            in_progress: total - completed,
            completed,
            completion_rate,
        }
    }
}

/// Number of issues in one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// Category.
    pub category: IssueCategory,
    /// Issues.
    pub count: usize,
}

/// Number of issues for one subsidiary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityCount {
    /// Subsidiary ID.
    pub entity_id: SubsidiaryId,
    /// Subsidiary name, empty when unknown.
    pub entity_name: String,
    /// Issues.
    pub count: usize,
}

fn tally<K: PartialEq + Copy>(keys: impl Iterator<Item = K>) -> Vec<(K, usize)> {
    let mut counts: Vec<(K, usize)> = Vec::new();
    for key in keys {
        match counts.iter_mut().find(|(k, _)| *k == key) {
            Some((_, count)) => *count += 1,
            None => counts.push((key, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Per-category counts, largest first; ties keep first-seen order.
#[must_use]
pub fn category_counts(issues: &[Issue]) -> Vec<CategoryCount> {
    tally(issues.iter().map(|issue| issue.category))
        .into_iter()
        .map(|(category, count)| CategoryCount { category, count })
        .collect()
}

/// Per-subsidiary counts, largest first; ties keep first-seen order.
#[must_use]
pub fn entity_counts(issues: &[Issue], subsidiaries: &[Subsidiary]) -> Vec<EntityCount> {
    tally(issues.iter().map(|issue| issue.entity_id))
        .into_iter()
        .map(|(entity_id, count)| EntityCount {
            entity_id,
            entity_name: subsidiaries
                .iter()
                .find(|sub| sub.id == entity_id)
                .map(|sub| sub.name.clone())
                .unwrap_or_default(),
            count,
        })
        .collect()
}

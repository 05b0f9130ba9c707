//! Issue types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use meridian_shared::types::{IssueId, SubsidiaryId};
use serde::{Deserialize, Serialize};

use super::error::IssueError;

/// Issue category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueCategory {
    /// 세무
    Tax,
    /// 리스
    Lease,
    /// 결산
    Closing,
    /// 시스템
    System,
    /// 감사
    Audit,
    /// 감가상각
    Depreciation,
    /// 인건비/판관비
    #[serde(rename = "Labor SG&A")]
    LaborSga,
    /// 미지급/선급
    Accrual,
    /// 포장비
    #[serde(rename = "PKG")]
    Pkg,
    /// 재고
    Inventory,
    /// 대손
    #[serde(rename = "Bad debt")]
    BadDebt,
    /// 충당금
    Allowance,
    /// 재무제표
    #[serde(rename = "FS")]
    Fs,
    /// 기타
    Others,
}

impl IssueCategory {
    /// All categories in display order.
    pub const ALL: [Self; 14] = [
        Self::Tax,
        Self::Lease,
        Self::Closing,
        Self::System,
        Self::Audit,
        Self::Depreciation,
        Self::LaborSga,
        Self::Accrual,
        Self::Pkg,
        Self::Inventory,
        Self::BadDebt,
        Self::Allowance,
        Self::Fs,
        Self::Others,
    ];

    /// Stored value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tax => "Tax",
            Self::Lease => "Lease",
            Self::Closing => "Closing",
            Self::System => "System",
            Self::Audit => "Audit",
            Self::Depreciation => "Depreciation",
            Self::LaborSga => "Labor SG&A",
            Self::Accrual => "Accrual",
            Self::Pkg => "PKG",
            Self::Inventory => "Inventory",
            Self::BadDebt => "Bad debt",
            Self::Allowance => "Allowance",
            Self::Fs => "FS",
            Self::Others => "Others",
        }
    }

    /// Korean label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tax => "세무",
            Self::Lease => "리스",
            Self::Closing => "결산",
            Self::System => "시스템",
            Self::Audit => "감사",
            Self::Depreciation => "감가상각",
            Self::LaborSga => "인건비/판관비",
            Self::Accrual => "미지급/선급",
            Self::Pkg => "포장비",
            Self::Inventory => "재고",
            Self::BadDebt => "대손",
            Self::Allowance => "충당금",
            Self::Fs => "재무제표",
            Self::Others => "기타",
        }
    }

    /// Badge colour.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Tax => "#EF4444",
            Self::Lease => "#F59E0B",
            Self::Closing => "#10B981",
            Self::System => "#3B82F6",
            Self::Audit => "#8B5CF6",
            Self::Depreciation => "#EC4899",
            Self::LaborSga => "#14B8A6",
            Self::Accrual => "#F97316",
            Self::Pkg => "#84CC16",
            Self::Inventory => "#06B6D4",
            Self::BadDebt => "#DC2626",
            Self::Allowance => "#7C3AED",
            Self::Fs => "#2563EB",
            Self::Others => "#6B7280",
        }
    }

    /// Parses a category, mapping anything unrecognised to `Others`.
    #[must_use]
    pub fn parse_or_others(s: &str) -> Self {
        s.trim().parse().unwrap_or(Self::Others)
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueCategory {
    type Err = IssueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| IssueError::UnknownCategory(s.to_string()))
    }
}

/// Issue status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IssueStatus {
    /// Being looked into.
    #[default]
    #[serde(rename = "확인 중")]
    InProgress,
    /// Resolved.
    #[serde(rename = "완료")]
    Completed,
}

impl IssueStatus {
    /// Stored value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "확인 중",
            Self::Completed => "완료",
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueStatus {
    type Err = IssueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "확인 중" => Ok(Self::InProgress),
            "완료" => Ok(Self::Completed),
            other => Err(IssueError::UnknownStatus(other.to_string())),
        }
    }
}

/// A tracked issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Unique identifier.
    pub id: IssueId,
    /// Title.
    pub title: String,
    /// Category.
    pub category: IssueCategory,
    /// Owning subsidiary.
    pub entity_id: SubsidiaryId,
    /// Description.
    pub description: String,
    /// Response taken, if any.
    pub response: Option<String>,
    /// Status.
    pub status: IssueStatus,
    /// Author.
    pub created_by: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Completion timestamp; set while completed.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Issue {
    /// Builds a new issue from a validated draft.
    #[must_use]
    pub fn from_draft(id: IssueId, draft: IssueDraft, now: DateTime<Utc>) -> Self {
        let status = draft.status.unwrap_or_default();
        Self {
            id,
            title: draft.title.trim().to_string(),
            category: draft.category,
            entity_id: draft.entity_id,
            description: draft.description,
            response: non_blank(draft.response),
            status,
            created_by: draft.created_by.trim().to_string(),
            created_at: now,
            updated_at: now,
            completed_at: completion_stamp(None, status, now),
        }
    }

    /// Applies a partial update.
    pub fn apply(&mut self, update: IssueUpdate, now: DateTime<Utc>) {
        if let Some(title) = update.title {
            self.title = title.trim().to_string();
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if update.response.is_some() {
            self.response = non_blank(update.response);
        }
        if let Some(status) = update.status {
            self.completed_at = completion_stamp(self.completed_at, status, now);
            self.status = status;
        }
        self.updated_at = now;
    }
}

/// Completion timestamp after moving to `status`.
///
/// Completing stamps `now` unless already stamped; reopening clears it.
#[must_use]
pub fn completion_stamp(
    current: Option<DateTime<Utc>>,
    status: IssueStatus,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match status {
        IssueStatus::Completed => current.or(Some(now)),
        IssueStatus::InProgress => None,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Input for creating an issue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueDraft {
    /// Title.
    pub title: String,
    /// Category.
    pub category: IssueCategory,
    /// Owning subsidiary.
    pub entity_id: SubsidiaryId,
    /// Description.
    pub description: String,
    /// Optional response.
    #[serde(default)]
    pub response: Option<String>,
    /// Initial status, defaults to in progress.
    #[serde(default)]
    pub status: Option<IssueStatus>,
    /// Author.
    pub created_by: String,
}

impl IssueDraft {
    /// Checks required text fields.
    ///
    /// # Errors
    ///
    /// Returns `MissingField` for the first blank required field.
    pub fn validate(&self) -> Result<(), IssueError> {
        if self.title.trim().is_empty() {
            return Err(IssueError::MissingField("title"));
        }
        if self.description.trim().is_empty() {
            return Err(IssueError::MissingField("description"));
        }
        if self.created_by.trim().is_empty() {
            return Err(IssueError::MissingField("created_by"));
        }
        Ok(())
    }
}

/// Partial update of an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct IssueUpdate {
    /// New title.
    pub title: Option<String>,
    /// New category.
    pub category: Option<IssueCategory>,
    /// New description.
    pub description: Option<String>,
    /// New response; blank clears it.
    pub response: Option<String>,
    /// New status.
    pub status: Option<IssueStatus>,
}

impl IssueUpdate {
    /// Checks that provided text fields are not blank.
    ///
    /// # Errors
    ///
    /// Returns `MissingField` for a blank title or description.
    pub fn validate(&self) -> Result<(), IssueError> {
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(IssueError::MissingField("title"));
        }
        if self
            .description
            .as_deref()
            .is_some_and(|d| d.trim().is_empty())
        {
            return Err(IssueError::MissingField("description"));
        }
        Ok(())
    }

    /// Update that marks the issue completed.
    #[must_use]
    pub fn complete() -> Self {
        Self {
            status: Some(IssueStatus::Completed),
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;

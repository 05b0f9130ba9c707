//! Schedule items and their planned → confirmed lifecycle.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use meridian_shared::types::{QuarterId, ScheduleItemId, SubsidiaryId};
use serde::{Deserialize, Serialize};

use super::category::ClosingCategory;
use super::error::ClosingError;

/// Schedule item status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    /// Date planned, not yet confirmed.
    Planned,
    /// Confirmed with a confirmation date.
    Confirmed,
}

impl ScheduleStatus {
    /// Stored value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Confirmed => "confirmed",
        }
    }

    /// Export glyph.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Planned => '○',
            Self::Confirmed => '✓',
        }
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleStatus {
    type Err = ClosingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planned" => Ok(Self::Planned),
            "confirmed" => Ok(Self::Confirmed),
            other => Err(ClosingError::UnknownStatus(other.to_string())),
        }
    }
}

/// A closing category assigned to a subsidiary on a planned date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItem {
    /// Unique identifier.
    pub id: ScheduleItemId,
    /// Owning quarter.
    pub quarter_id: QuarterId,
    /// Subsidiary the item belongs to.
    pub subsidiary_id: SubsidiaryId,
    /// Closing category.
    pub category: ClosingCategory,
    /// Planned date (grid column).
    pub planned_date: NaiveDate,
    /// Date the item was confirmed for; present iff confirmed.
    pub confirmed_date: Option<NaiveDate>,
    /// Current status.
    pub status: ScheduleStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ScheduleItem {
    /// Builds a freshly planned item.
    #[must_use]
    pub fn planned(id: ScheduleItemId, new: NewScheduleItem, now: DateTime<Utc>) -> Self {
        Self {
            id,
            quarter_id: new.quarter_id,
            subsidiary_id: new.subsidiary_id,
            category: new.category,
            planned_date: new.planned_date,
            confirmed_date: None,
            status: ScheduleStatus::Planned,
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks that the confirmed date is set exactly when confirmed.
    ///
    /// # Errors
    ///
    /// Returns `InconsistentConfirmation` otherwise.
    pub fn validate(&self) -> Result<(), ClosingError> {
        match (self.status, self.confirmed_date) {
            (ScheduleStatus::Planned, None) | (ScheduleStatus::Confirmed, Some(_)) => Ok(()),
            _ => Err(ClosingError::InconsistentConfirmation(self.id)),
        }
    }

    /// True once confirmed.
    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        matches!(self.status, ScheduleStatus::Confirmed)
    }

    /// True when the item sits in the given grid cell.
    #[must_use]
    pub fn occupies(&self, subsidiary_id: SubsidiaryId, date: NaiveDate) -> bool {
        self.subsidiary_id == subsidiary_id && self.planned_date == date
    }

    /// Confirms a planned item.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyConfirmed` when the item is already confirmed.
    pub fn confirm(&mut self, date: NaiveDate, now: DateTime<Utc>) -> Result<(), ClosingError> {
        if self.is_confirmed() {
            return Err(ClosingError::AlreadyConfirmed(self.id));
        }
        self.status = ScheduleStatus::Confirmed;
        self.confirmed_date = Some(date);
        self.updated_at = now;
        Ok(())
    }

    /// `glyph + label` as shown in the schedule export.
    #[must_use]
    pub fn export_label(&self) -> String {
        format!("{}{}", self.status.glyph(), self.category.label())
    }
}

/// Input for creating a planned item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewScheduleItem {
    /// Durable quarter id.
    pub quarter_id: QuarterId,
    /// Subsidiary.
    pub subsidiary_id: SubsidiaryId,
    /// Category.
    pub category: ClosingCategory,
    /// Planned date.
    pub planned_date: NaiveDate,
}

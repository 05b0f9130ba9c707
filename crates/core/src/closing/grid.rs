//! Schedule grid gestures and the outcome each one produces.
//!
//! [`decide`] never mutates anything; it says what should happen next and the
//! caller carries it out (insert, prompt, or show a notice).

use chrono::NaiveDate;
use meridian_shared::types::{ScheduleItemId, SubsidiaryId};
use serde::{Deserialize, Serialize};

use super::category::ClosingCategory;
use super::error::ClosingError;
use super::quarter::Quarter;
use super::schedule::ScheduleItem;

/// A user gesture on the schedule grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "gesture", rename_all = "snake_case")]
pub enum Gesture {
    /// Click on a (subsidiary, date) cell.
    CellClick {
        /// Row.
        subsidiary_id: SubsidiaryId,
        /// Column.
        date: NaiveDate,
        /// Category picked in the sidebar, if any.
        #[serde(default)]
        selected_category: Option<ClosingCategory>,
    },
    /// Category dragged from the sidebar onto a cell.
    CategoryDrop {
        /// Row.
        subsidiary_id: SubsidiaryId,
        /// Column.
        date: NaiveDate,
        /// Dropped category.
        category: ClosingCategory,
    },
    /// Click on an item badge.
    BadgeClick {
        /// Clicked item.
        item_id: ScheduleItemId,
    },
    /// Item badge dragged onto the trash target.
    TrashDrop {
        /// Dragged item.
        item_id: ScheduleItemId,
    },
}

/// Informational message; nothing changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GridNotice {
    /// The selected category is already planned in this cell.
    ClickBadgeToConfirm,
    /// The dropped category is already confirmed in this cell.
    AlreadyConfirmed,
    /// No category selected on an occupied cell.
    SelectCategoryToEdit,
    /// No category selected on an empty cell.
    SelectCategoryFirst,
}

impl GridNotice {
    /// User-facing text.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ClickBadgeToConfirm => "Badge를 클릭하여 확정 날짜를 선택하세요.",
            Self::AlreadyConfirmed => "이미 확정된 일정입니다.",
            Self::SelectCategoryToEdit => {
                "좌측에서 카테고리를 선택하여 일정을 추가하거나 수정하세요."
            }
            Self::SelectCategoryFirst => "좌측에서 카테고리를 먼저 선택하세요.",
        }
    }
}

/// Which deletion prompt to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletePrompt {
    /// Deleting a confirmed item from its cell.
    Confirmed,
    /// Deleting any item via the trash target.
    Item,
}

impl DeletePrompt {
    /// Confirmation question.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Confirmed => "확정된 일정을 삭제하시겠습니까?",
            Self::Item => "일정을 삭제하시겠습니까?",
        }
    }
}

/// Outcome of a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum GridAction {
    /// Insert a planned item.
    Create {
        /// Row.
        subsidiary_id: SubsidiaryId,
        /// Category.
        category: ClosingCategory,
        /// Column.
        planned_date: NaiveDate,
    },
    /// Ask for a confirmation date, then call confirm.
    PromptConfirmDate {
        /// Item to confirm.
        item_id: ScheduleItemId,
    },
    /// Ask before deleting, then call delete.
    ConfirmDelete {
        /// Item to delete.
        item_id: ScheduleItemId,
        /// Prompt variant.
        prompt: DeletePrompt,
    },
    /// Show a notice.
    Notice {
        /// Notice variant.
        notice: GridNotice,
    },
}

impl GridAction {
    /// Text to show alongside the action, if any.
    #[must_use]
    pub const fn message(&self) -> Option<&'static str> {
        match self {
            Self::Create { .. } | Self::PromptConfirmDate { .. } => None,
            Self::ConfirmDelete { prompt, .. } => Some(prompt.message()),
            Self::Notice { notice } => Some(notice.message()),
        }
    }

    const fn notice(notice: GridNotice) -> Self {
        Self::Notice { notice }
    }
}

/// Decides what a gesture does given the items of the active view.
///
/// # Errors
///
/// Returns `DateOutsideSpan` for cells outside the view, `ItemNotFound` for
/// badges not in `items`, and `CustomRangeReadOnly` when a create is
/// requested in custom range mode.
pub fn decide(
    quarter: &Quarter,
    items: &[ScheduleItem],
    gesture: &Gesture,
) -> Result<GridAction, ClosingError> {
    match *gesture {
        Gesture::CellClick {
            subsidiary_id,
            date,
            selected_category: None,
        } => {
            quarter.ensure_contains(date)?;
            let occupied = items.iter().any(|item| item.occupies(subsidiary_id, date));
            Ok(GridAction::notice(if occupied {
                GridNotice::SelectCategoryToEdit
            } else {
                GridNotice::SelectCategoryFirst
            }))
        }
        Gesture::CellClick {
            subsidiary_id,
            date,
            selected_category: Some(category),
        } => {
            quarter.ensure_contains(date)?;
            match find_in_cell(items, subsidiary_id, date, category) {
                None => create(quarter, subsidiary_id, category, date),
                Some(item) if item.is_confirmed() => Ok(GridAction::ConfirmDelete {
                    item_id: item.id,
                    prompt: DeletePrompt::Confirmed,
                }),
                Some(_) => Ok(GridAction::notice(GridNotice::ClickBadgeToConfirm)),
            }
        }
        Gesture::CategoryDrop {
            subsidiary_id,
            date,
            category,
        } => {
            quarter.ensure_contains(date)?;
            match find_in_cell(items, subsidiary_id, date, category) {
                None => create(quarter, subsidiary_id, category, date),
                Some(item) if item.is_confirmed() => {
                    Ok(GridAction::notice(GridNotice::AlreadyConfirmed))
                }
                Some(_) => Ok(GridAction::notice(GridNotice::ClickBadgeToConfirm)),
            }
        }
        Gesture::BadgeClick { item_id } => {
            let item = find_item(items, item_id)?;
            if item.is_confirmed() {
                Ok(GridAction::ConfirmDelete {
                    item_id,
                    prompt: DeletePrompt::Confirmed,
                })
            } else {
                Ok(GridAction::PromptConfirmDate { item_id })
            }
        }
        Gesture::TrashDrop { item_id } => {
            find_item(items, item_id)?;
            Ok(GridAction::ConfirmDelete {
                item_id,
                prompt: DeletePrompt::Item,
            })
        }
    }
}

fn create(
    quarter: &Quarter,
    subsidiary_id: SubsidiaryId,
    category: ClosingCategory,
    planned_date: NaiveDate,
) -> Result<GridAction, ClosingError> {
    if quarter.is_custom() {
        return Err(ClosingError::CustomRangeReadOnly);
    }
    Ok(GridAction::Create {
        subsidiary_id,
        category,
        planned_date,
    })
}

fn find_in_cell(
    items: &[ScheduleItem],
    subsidiary_id: SubsidiaryId,
    date: NaiveDate,
    category: ClosingCategory,
) -> Option<&ScheduleItem> {
    items
        .iter()
        .find(|item| item.occupies(subsidiary_id, date) && item.category == category)
}

fn find_item(items: &[ScheduleItem], item_id: ScheduleItemId) -> Result<&ScheduleItem, ClosingError> {
    items
        .iter()
        .find(|item| item.id == item_id)
        .ok_or(ClosingError::ItemNotFound(item_id))
}

#[cfg(test)]
#[path = "grid_tests.rs"]
mod tests;

//! Closing schedule item repository.

use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use meridian_core::closing::{ClosingCategory, ClosingError, NewScheduleItem, ScheduleItem};
use meridian_shared::types::{QuarterId, ScheduleItemId, SubsidiaryId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};

use super::is_unique_violation;
use crate::entities::schedule_items;

/// Error types for schedule item operations.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleRepoError {
    /// Schedule item not found.
    #[error("Schedule item not found: {0}")]
    NotFound(ScheduleItemId),

    /// Same category already planned on this cell.
    #[error("이미 해당 카테고리가 추가되어 있습니다.")]
    Duplicate,

    /// Domain rule rejected the change.
    #[error(transparent)]
    Closing(#[from] ClosingError),

    /// Stored row does not map to a valid item.
    #[error("Invalid schedule item record: {0}")]
    InvalidRecord(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Schedule item repository.
#[derive(Debug, Clone)]
pub struct ScheduleRepository {
    db: DatabaseConnection,
}

impl ScheduleRepository {
    /// Creates a new schedule item repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists the items of a quarter ordered by planned date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed.
    pub async fn list_for_quarter(
        &self,
        quarter_id: QuarterId,
    ) -> Result<Vec<ScheduleItem>, ScheduleRepoError> {
        let rows = schedule_items::Entity::find()
            .filter(schedule_items::Column::QuarterId.eq(quarter_id.into_inner()))
            .order_by_asc(schedule_items::Column::PlannedDate)
            .order_by_asc(schedule_items::Column::CreatedAt)
            .all(&self.db)
            .await?;
        rows.into_iter().map(item_from_model).collect()
    }

    /// Finds an item by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is malformed.
    pub async fn find_by_id(
        &self,
        id: ScheduleItemId,
    ) -> Result<Option<ScheduleItem>, ScheduleRepoError> {
        schedule_items::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .map(item_from_model)
            .transpose()
    }

    /// Inserts a planned item.
    ///
    /// # Errors
    ///
    /// Returns `Duplicate` when the cell already holds the category.
    pub async fn create(&self, new: NewScheduleItem) -> Result<ScheduleItem, ScheduleRepoError> {
        let item = ScheduleItem::planned(ScheduleItemId::new(), new, Utc::now());
        let row = schedule_items::ActiveModel {
            id: Set(item.id.into_inner()),
            quarter_id: Set(item.quarter_id.into_inner()),
            subsidiary_id: Set(item.subsidiary_id.into_inner()),
            category: Set(item.category.id().to_string()),
            planned_date: Set(item.planned_date),
            confirmed_date: Set(None),
            status: Set(item.status.into()),
            created_at: Set(item.created_at.into()),
            updated_at: Set(item.updated_at.into()),
        };

        match row.insert(&self.db).await {
            Ok(model) => {
                tracing::info!(
                    item_id = %model.id,
                    category = %model.category,
                    planned_date = %model.planned_date,
                    "Schedule item created"
                );
                item_from_model(model)
            }
            Err(err) if is_unique_violation(&err) => Err(ScheduleRepoError::Duplicate),
            Err(err) => Err(err.into()),
        }
    }

    /// Confirms a planned item on `date`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown item and `AlreadyConfirmed` when the
    /// item was confirmed before.
    pub async fn confirm(
        &self,
        id: ScheduleItemId,
        date: NaiveDate,
    ) -> Result<ScheduleItem, ScheduleRepoError> {
        let model = schedule_items::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(ScheduleRepoError::NotFound(id))?;

        let mut item = item_from_model(model.clone())?;
        item.confirm(date, Utc::now())?;

        let mut active = model.into_active_model();
        active.status = Set(item.status.into());
        active.confirmed_date = Set(item.confirmed_date);
        active.updated_at = Set(item.updated_at.into());
        let row = active.update(&self.db).await?;

        tracing::info!(item_id = %row.id, confirmed_date = %date, "Schedule item confirmed");
        item_from_model(row)
    }

    /// Deletes an item.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the item does not exist.
    pub async fn delete(&self, id: ScheduleItemId) -> Result<(), ScheduleRepoError> {
        let result = schedule_items::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(ScheduleRepoError::NotFound(id));
        }
        tracing::info!(item_id = %id, "Schedule item deleted");
        Ok(())
    }
}

fn item_from_model(model: schedule_items::Model) -> Result<ScheduleItem, ScheduleRepoError> {
    let id = ScheduleItemId::from_uuid(model.id);
    let category = ClosingCategory::from_str(&model.category)
        .map_err(|e| ScheduleRepoError::InvalidRecord(format!("schedule item {id}: {e}")))?;

    let item = ScheduleItem {
        id,
        quarter_id: QuarterId::from_uuid(model.quarter_id),
        subsidiary_id: SubsidiaryId::from_uuid(model.subsidiary_id),
        category,
        planned_date: model.planned_date,
        confirmed_date: model.confirmed_date,
        status: model.status.into(),
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    };
    item.validate()
        .map_err(|e| ScheduleRepoError::InvalidRecord(e.to_string()))?;
    Ok(item)
}

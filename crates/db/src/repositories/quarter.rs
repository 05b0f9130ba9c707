//! Quarter repository.
//!
//! Backs [`QuarterStore`] so the closing resolver can find or create the
//! durable row for a (year, quarter).

use chrono::{NaiveDate, Utc};
use meridian_core::closing::{Quarter, QuarterInsertError, QuarterStore};
use meridian_shared::types::QuarterId;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};

use super::is_unique_violation;
use crate::entities::quarters;

/// Error types for quarter operations.
#[derive(Debug, thiserror::Error)]
pub enum QuarterRepoError {
    /// Stored row does not map to a valid quarter.
    #[error("Invalid quarter record: {0}")]
    InvalidRecord(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Quarter repository.
#[derive(Debug, Clone)]
pub struct QuarterRepository {
    db: DatabaseConnection,
}

impl QuarterRepository {
    /// Creates a new quarter repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a quarter row by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is malformed.
    pub async fn find_by_id(&self, id: QuarterId) -> Result<Option<Quarter>, QuarterRepoError> {
        quarters::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .map(quarter_from_model)
            .transpose()
    }
}

impl QuarterStore for QuarterRepository {
    type Error = QuarterRepoError;

    async fn find_quarter(&self, year: i32, quarter: u8) -> Result<Option<Quarter>, Self::Error> {
        quarters::Entity::find()
            .filter(quarters::Column::Year.eq(year))
            .filter(quarters::Column::Quarter.eq(i16::from(quarter)))
            .one(&self.db)
            .await?
            .map(quarter_from_model)
            .transpose()
    }

    async fn insert_quarter(
        &self,
        year: i32,
        quarter: u8,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Quarter, QuarterInsertError<Self::Error>> {
        let row = quarters::ActiveModel {
            id: Set(QuarterId::new().into_inner()),
            year: Set(year),
            quarter: Set(i16::from(quarter)),
            start_date: Set(start_date),
            end_date: Set(end_date),
            created_at: Set(Utc::now().into()),
        };

        match row.insert(&self.db).await {
            Ok(model) => quarter_from_model(model).map_err(QuarterInsertError::Store),
            Err(err) if is_unique_violation(&err) => Err(QuarterInsertError::Duplicate),
            Err(err) => Err(QuarterInsertError::Store(err.into())),
        }
    }
}

pub(crate) fn quarter_from_model(model: quarters::Model) -> Result<Quarter, QuarterRepoError> {
    let id = model.id;
    let invalid = |detail: String| QuarterRepoError::InvalidRecord(format!("quarter {id}: {detail}"));
    let number = u8::try_from(model.quarter).map_err(|e| invalid(e.to_string()))?;
    Quarter::persisted(
        QuarterId::from_uuid(model.id),
        model.year,
        number,
        model.start_date,
        model.end_date,
    )
    .map_err(|e| invalid(e.to_string()))
}

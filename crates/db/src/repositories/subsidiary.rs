//! Subsidiary repository.

use chrono::Utc;
use meridian_core::subsidiary::{Region, Subsidiary};
use meridian_shared::types::SubsidiaryId;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::subsidiaries;

/// Input for registering a subsidiary.
#[derive(Debug, Clone)]
pub struct NewSubsidiary {
    /// Display name.
    pub name: String,
    /// Short unique code.
    pub code: String,
    /// Country.
    pub country: String,
    /// City.
    pub city: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Region.
    pub region: Region,
}

/// Subsidiary repository for read access and seeding.
#[derive(Debug, Clone)]
pub struct SubsidiaryRepository {
    db: DatabaseConnection,
}

impl SubsidiaryRepository {
    /// Creates a new subsidiary repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all subsidiaries ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<Subsidiary>, DbErr> {
        let rows = subsidiaries::Entity::find()
            .order_by_asc(subsidiaries::Column::Name)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(subsidiary_from_model).collect())
    }

    /// Finds a subsidiary by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: SubsidiaryId) -> Result<Option<Subsidiary>, DbErr> {
        let row = subsidiaries::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?;
        Ok(row.map(subsidiary_from_model))
    }

    /// Finds a subsidiary by its code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Subsidiary>, DbErr> {
        let row = subsidiaries::Entity::find()
            .filter(subsidiaries::Column::Code.eq(code))
            .one(&self.db)
            .await?;
        Ok(row.map(subsidiary_from_model))
    }

    /// Inserts a subsidiary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: NewSubsidiary) -> Result<Subsidiary, DbErr> {
        let row = subsidiaries::ActiveModel {
            id: Set(SubsidiaryId::new().into_inner()),
            name: Set(input.name),
            code: Set(input.code),
            country: Set(input.country),
            city: Set(input.city),
            latitude: Set(input.latitude),
            longitude: Set(input.longitude),
            region: Set(input.region.into()),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await?;

        tracing::info!(subsidiary_id = %row.id, code = %row.code, "Subsidiary created");
        Ok(subsidiary_from_model(row))
    }
}

pub(crate) fn subsidiary_from_model(model: subsidiaries::Model) -> Subsidiary {
    Subsidiary {
        id: SubsidiaryId::from_uuid(model.id),
        name: model.name,
        code: model.code,
        country: model.country,
        city: model.city,
        latitude: model.latitude,
        longitude: model.longitude,
        region: model.region.into(),
        created_at: model.created_at.with_timezone(&Utc),
    }
}

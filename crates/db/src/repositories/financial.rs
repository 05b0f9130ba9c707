//! Financial data repository.
//!
//! Rows are read-only for the dashboard; writes exist for seeding.

use chrono::Utc;
use meridian_core::financial::FinancialData;
use meridian_core::subsidiary::Subsidiary;
use meridian_shared::types::{FinancialDataId, SubsidiaryId};
use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};

use super::subsidiary::subsidiary_from_model;
use crate::entities::{financial_data, subsidiaries};

/// Error types for financial data operations.
#[derive(Debug, thiserror::Error)]
pub enum FinancialRepoError {
    /// Stored row does not map to a valid record.
    #[error("Invalid financial record: {0}")]
    InvalidRecord(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for a quarterly financial row.
#[derive(Debug, Clone)]
pub struct NewFinancialData {
    /// Owning subsidiary.
    pub subsidiary_id: SubsidiaryId,
    /// Fiscal year.
    pub fiscal_year: i32,
    /// Quarter (1..=4).
    pub quarter: u8,
    /// Revenue in KRW.
    pub revenue: Decimal,
    /// Operating profit in KRW.
    pub operating_profit: Option<Decimal>,
    /// Target revenue in KRW.
    pub target_revenue: Option<Decimal>,
}

/// Financial data repository.
#[derive(Debug, Clone)]
pub struct FinancialRepository {
    db: DatabaseConnection,
}

impl FinancialRepository {
    /// Creates a new financial data repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Latest record for a subsidiary, with the subsidiary embedded.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is malformed.
    pub async fn latest_for(
        &self,
        subsidiary_id: SubsidiaryId,
    ) -> Result<Option<(FinancialData, Subsidiary)>, FinancialRepoError> {
        let row = financial_data::Entity::find()
            .filter(financial_data::Column::SubsidiaryId.eq(subsidiary_id.into_inner()))
            .order_by_desc(financial_data::Column::FiscalYear)
            .order_by_desc(financial_data::Column::Quarter)
            .find_also_related(subsidiaries::Entity)
            .one(&self.db)
            .await?;

        row.map(with_subsidiary).transpose()
    }

    /// The last `quarters` records for a subsidiary, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed.
    pub async fn trend(
        &self,
        subsidiary_id: SubsidiaryId,
        quarters: u64,
    ) -> Result<Vec<FinancialData>, FinancialRepoError> {
        let rows = financial_data::Entity::find()
            .filter(financial_data::Column::SubsidiaryId.eq(subsidiary_id.into_inner()))
            .order_by_desc(financial_data::Column::FiscalYear)
            .order_by_desc(financial_data::Column::Quarter)
            .limit(quarters)
            .all(&self.db)
            .await?;

        rows.into_iter().map(financial_from_model).collect()
    }

    /// Every subsidiary's record for the latest period in the table.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed.
    pub async fn all_latest(&self) -> Result<Vec<(FinancialData, Subsidiary)>, FinancialRepoError> {
        let Some(latest) = financial_data::Entity::find()
            .order_by_desc(financial_data::Column::FiscalYear)
            .order_by_desc(financial_data::Column::Quarter)
            .one(&self.db)
            .await?
        else {
            return Ok(Vec::new());
        };

        let rows = financial_data::Entity::find()
            .filter(financial_data::Column::FiscalYear.eq(latest.fiscal_year))
            .filter(financial_data::Column::Quarter.eq(latest.quarter))
            .find_also_related(subsidiaries::Entity)
            .order_by_asc(subsidiaries::Column::Name)
            .all(&self.db)
            .await?;

        rows.into_iter().map(with_subsidiary).collect()
    }

    /// Inserts a record, overwriting the amounts of an existing period.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub async fn upsert(&self, input: NewFinancialData) -> Result<(), FinancialRepoError> {
        let now = Utc::now().into();
        let row = financial_data::ActiveModel {
            id: Set(FinancialDataId::new().into_inner()),
            subsidiary_id: Set(input.subsidiary_id.into_inner()),
            fiscal_year: Set(input.fiscal_year),
            quarter: Set(i16::from(input.quarter)),
            revenue: Set(input.revenue),
            operating_profit: Set(input.operating_profit),
            target_revenue: Set(input.target_revenue),
            created_at: Set(now),
            updated_at: Set(now),
        };

        financial_data::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([
                    financial_data::Column::SubsidiaryId,
                    financial_data::Column::FiscalYear,
                    financial_data::Column::Quarter,
                ])
                .update_columns([
                    financial_data::Column::Revenue,
                    financial_data::Column::OperatingProfit,
                    financial_data::Column::TargetRevenue,
                    financial_data::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }
}

fn with_subsidiary(
    (data, subsidiary): (financial_data::Model, Option<subsidiaries::Model>),
) -> Result<(FinancialData, Subsidiary), FinancialRepoError> {
    let subsidiary = subsidiary.ok_or_else(|| {
        FinancialRepoError::InvalidRecord(format!("financial row {} has no subsidiary", data.id))
    })?;
    Ok((financial_from_model(data)?, subsidiary_from_model(subsidiary)))
}

fn financial_from_model(model: financial_data::Model) -> Result<FinancialData, FinancialRepoError> {
    let quarter = u8::try_from(model.quarter)
        .ok()
        .filter(|q| (1..=4).contains(q))
        .ok_or_else(|| {
            FinancialRepoError::InvalidRecord(format!(
                "financial row {} has quarter {}",
                model.id, model.quarter
            ))
        })?;

    Ok(FinancialData {
        id: FinancialDataId::from_uuid(model.id),
        subsidiary_id: SubsidiaryId::from_uuid(model.subsidiary_id),
        fiscal_year: model.fiscal_year,
        quarter,
        revenue: model.revenue,
        operating_profit: model.operating_profit,
        target_revenue: model.target_revenue,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

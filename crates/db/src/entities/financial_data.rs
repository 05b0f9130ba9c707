//! `SeaORM` Entity for financial_data table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "financial_data")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub subsidiary_id: Uuid,
    pub fiscal_year: i32,
    pub quarter: i16,
    #[sea_orm(column_type = "Decimal(Some((20, 2)))")]
    pub revenue: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 2)))", nullable)]
    pub operating_profit: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((20, 2)))", nullable)]
    pub target_revenue: Option<Decimal>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subsidiaries::Entity",
        from = "Column::SubsidiaryId",
        to = "super::subsidiaries::Column::Id"
    )]
    Subsidiaries,
}

impl Related<super::subsidiaries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subsidiaries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

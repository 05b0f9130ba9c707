//! `SeaORM` Entity for issues table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::IssueStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "issues")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub entity_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub response: Option<String>,
    pub status: IssueStatus,
    pub created_by: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub completed_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subsidiaries::Entity",
        from = "Column::EntityId",
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

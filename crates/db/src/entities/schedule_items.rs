//! `SeaORM` Entity for schedule_items table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ScheduleStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "schedule_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub quarter_id: Uuid,
    pub subsidiary_id: Uuid,
    pub category: String,
    pub planned_date: Date,
    pub confirmed_date: Option<Date>,
    pub status: ScheduleStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quarters::Entity",
        from = "Column::QuarterId",
        to = "super::quarters::Column::Id"
    )]
    Quarters,
    #[sea_orm(
        belongs_to = "super::subsidiaries::Entity",
        from = "Column::SubsidiaryId",
        to = "super::subsidiaries::Column::Id"
    )]
    Subsidiaries,
}

impl Related<super::quarters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quarters.def()
    }
}

impl Related<super::subsidiaries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subsidiaries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

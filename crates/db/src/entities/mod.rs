//! `SeaORM` entity definitions.

pub mod prelude;

pub mod financial_data;
pub mod issues;
pub mod quarters;
pub mod schedule_items;
pub mod sea_orm_active_enums;
pub mod subsidiaries;

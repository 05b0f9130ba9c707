//! Entity re-exports.

pub use super::financial_data::Entity as FinancialData;
pub use super::issues::Entity as Issues;
pub use super::quarters::Entity as Quarters;
pub use super::schedule_items::Entity as ScheduleItems;
pub use super::subsidiaries::Entity as Subsidiaries;

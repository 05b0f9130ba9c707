//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Every row leaving a repository is mapped into a `meridian-core` type.

pub mod financial;
pub mod issue;
pub mod quarter;
pub mod schedule;
pub mod subsidiary;

pub use financial::{FinancialRepoError, FinancialRepository, NewFinancialData};
pub use issue::{IssueRepoError, IssueRepository};
pub use quarter::{QuarterRepoError, QuarterRepository};
pub use schedule::{ScheduleRepoError, ScheduleRepository};
pub use subsidiary::{NewSubsidiary, SubsidiaryRepository};

use sea_orm::{DbErr, SqlErr};

/// True when the error is a unique-constraint violation.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

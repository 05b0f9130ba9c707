//! Postgres enum types and their domain counterparts.

use meridian_core::closing::ScheduleStatus as DomainScheduleStatus;
use meridian_core::issue::IssueStatus as DomainIssueStatus;
use meridian_core::subsidiary::Region as DomainRegion;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `subsidiary_region` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "subsidiary_region")]
pub enum SubsidiaryRegion {
    /// Americas.
    #[sea_orm(string_value = "Americas")]
    Americas,
    /// Europe.
    #[sea_orm(string_value = "Europe")]
    Europe,
    /// Asia-Pacific.
    #[sea_orm(string_value = "Asia-Pacific")]
    AsiaPacific,
}

/// `issue_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "issue_status")]
pub enum IssueStatus {
    /// 확인 중
    #[sea_orm(string_value = "확인 중")]
    InProgress,
    /// 완료
    #[sea_orm(string_value = "완료")]
    Completed,
}

/// `schedule_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "schedule_status")]
pub enum ScheduleStatus {
    /// planned
    #[sea_orm(string_value = "planned")]
    Planned,
    /// confirmed
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
}

impl From<SubsidiaryRegion> for DomainRegion {
    fn from(value: SubsidiaryRegion) -> Self {
        match value {
            SubsidiaryRegion::Americas => Self::Americas,
            SubsidiaryRegion::Europe => Self::Europe,
            SubsidiaryRegion::AsiaPacific => Self::AsiaPacific,
        }
    }
}

impl From<DomainRegion> for SubsidiaryRegion {
    fn from(value: DomainRegion) -> Self {
        match value {
            DomainRegion::Americas => Self::Americas,
            DomainRegion::Europe => Self::Europe,
            DomainRegion::AsiaPacific => Self::AsiaPacific,
        }
    }
}

impl From<IssueStatus> for DomainIssueStatus {
    fn from(value: IssueStatus) -> Self {
        match value {
            IssueStatus::InProgress => Self::InProgress,
            IssueStatus::Completed => Self::Completed,
        }
    }
}

impl From<DomainIssueStatus> for IssueStatus {
    fn from(value: DomainIssueStatus) -> Self {
        match value {
            DomainIssueStatus::InProgress => Self::InProgress,
            DomainIssueStatus::Completed => Self::Completed,
        }
    }
}

impl From<ScheduleStatus> for DomainScheduleStatus {
    fn from(value: ScheduleStatus) -> Self {
        match value {
            ScheduleStatus::Planned => Self::Planned,
            ScheduleStatus::Confirmed => Self::Confirmed,
        }
    }
}

impl From<DomainScheduleStatus> for ScheduleStatus {
    fn from(value: DomainScheduleStatus) -> Self {
        match value {
            DomainScheduleStatus::Planned => Self::Planned,
            DomainScheduleStatus::Confirmed => Self::Confirmed,
        }
    }
}

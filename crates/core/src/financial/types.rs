//! Financial record types.

use chrono::{DateTime, Utc};
use meridian_shared::types::{FinancialDataId, SubsidiaryId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::format::{format_krw, format_margin, format_period};
use super::metrics::{operating_margin, target_achievement};
use crate::subsidiary::Subsidiary;

/// One subsidiary's results for one fiscal quarter. Amounts are in KRW.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialData {
    /// Unique identifier.
    pub id: FinancialDataId,
    /// Subsidiary.
    pub subsidiary_id: SubsidiaryId,
    /// Fiscal year.
    pub fiscal_year: i32,
    /// Quarter (1..=4).
    pub quarter: u8,
    /// Revenue.
    pub revenue: Decimal,
    /// Operating profit.
    pub operating_profit: Option<Decimal>,
    /// Revenue target.
    pub target_revenue: Option<Decimal>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A financial record with its subsidiary and derived figures.
#[derive(Debug, Clone, Serialize)]
pub struct FinancialSnapshot {
    /// The record.
    #[serde(flatten)]
    pub data: FinancialData,
    /// Owning subsidiary.
    pub subsidiary: Subsidiary,
    /// Operating margin in percent.
    pub operating_margin: Decimal,
    /// Revenue against target in percent.
    pub target_achievement: Decimal,
    /// `YYYY QN`.
    pub period_label: String,
    /// Revenue in 억원.
    pub revenue_label: String,
    /// Margin with one decimal.
    pub margin_label: String,
}

impl FinancialSnapshot {
    /// Derives the display figures for a record.
    #[must_use]
    pub fn new(data: FinancialData, subsidiary: Subsidiary) -> Self {
        let margin = operating_margin(data.operating_profit.unwrap_or_default(), data.revenue);
        let achievement = target_achievement(data.revenue, data.target_revenue);
        Self {
            period_label: format_period(data.fiscal_year, data.quarter),
            revenue_label: format_krw(data.revenue),
            margin_label: format_margin(margin),
            operating_margin: margin,
            target_achievement: achievement,
            subsidiary,
            data,
        }
    }
}

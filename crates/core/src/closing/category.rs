//! The nine closing-document categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ClosingError;

/// Closing-document category assigned to a schedule cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClosingCategory {
    /// Employee JD.
    EmployeeJd,
    /// Preliminary Sales/SG&A.
    PreliminarySales,
    /// Sales detail.
    SalesDetail,
    /// Lease detail.
    LeaseDetail,
    /// AR detail.
    ArDetail,
    /// Inventory detail.
    InventoryDetail,
    /// SG&A detail.
    SgaDetail,
    /// Demo detail.
    DemoDetail,
    /// PKG.
    Pkg,
}

impl ClosingCategory {
    /// All categories in sidebar order.
    pub const ALL: [Self; 9] = [
        Self::EmployeeJd,
        Self::PreliminarySales,
        Self::SalesDetail,
        Self::LeaseDetail,
        Self::ArDetail,
        Self::InventoryDetail,
        Self::SgaDetail,
        Self::DemoDetail,
        Self::Pkg,
    ];

    /// Stable identifier stored in the database.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::EmployeeJd => "employee-jd",
            Self::PreliminarySales => "preliminary-sales",
            Self::SalesDetail => "sales-detail",
            Self::LeaseDetail => "lease-detail",
            Self::ArDetail => "ar-detail",
            Self::InventoryDetail => "inventory-detail",
            Self::SgaDetail => "sga-detail",
            Self::DemoDetail => "demo-detail",
            Self::Pkg => "pkg",
        }
    }

    /// Short label shown on badges and in exports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::EmployeeJd => "Employee JD",
            Self::PreliminarySales => "Preliminary Sales/SG&A",
            Self::SalesDetail => "Sales detail",
            Self::LeaseDetail => "Lease detail",
            Self::ArDetail => "AR detail",
            Self::InventoryDetail => "Inventory detail",
            Self::SgaDetail => "SG&A detail",
            Self::DemoDetail => "Demo detail",
            Self::Pkg => "PKG",
        }
    }

    /// Badge colour.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::EmployeeJd => "#3B82F6",
            Self::PreliminarySales => "#10B981",
            Self::SalesDetail => "#F59E0B",
            Self::LeaseDetail => "#8B5CF6",
            Self::ArDetail => "#EC4899",
            Self::InventoryDetail => "#14B8A6",
            Self::SgaDetail => "#F97316",
            Self::DemoDetail => "#6366F1",
            Self::Pkg => "#EF4444",
        }
    }
}

impl fmt::Display for ClosingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ClosingCategory {
    type Err = ClosingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.id() == s)
            .ok_or_else(|| ClosingError::UnknownCategory(s.to_string()))
    }
}

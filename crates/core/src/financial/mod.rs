//! Quarterly financial records, derived metrics and display helpers.

pub mod format;
pub mod metrics;
pub mod types;

pub use format::{format_krw, format_large_number, format_margin, format_period};
pub use metrics::{operating_margin, target_achievement};
pub use types::{FinancialData, FinancialSnapshot};

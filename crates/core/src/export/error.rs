//! Export error types.

use rust_xlsxwriter::XlsxError;
use thiserror::Error;

/// Export failures.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing to put in the sheet.
    #[error("다운로드할 데이터가 없습니다.")]
    Empty,

    /// Workbook could not be written.
    #[error("Failed to write workbook: {0}")]
    Xlsx(#[from] XlsxError),
}

//! Spreadsheet exports.
//!
//! Sheets are assembled as plain rows first ([`Sheet`]) and only then
//! rendered to XLSX bytes, so their contents can be checked without opening
//! a workbook.

pub mod error;
pub mod issues;
pub mod schedule;
pub mod sheet;
pub mod xlsx;

#[cfg(test)]
mod tests;

pub use error::ExportError;
pub use issues::{issue_export_filename, issue_sheet};
pub use schedule::{schedule_export_filename, schedule_sheet};
pub use sheet::{CellValue, Sheet};
pub use xlsx::write_xlsx;

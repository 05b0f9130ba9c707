//! Spreadsheet attachment responses.

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use meridian_core::export::{Sheet, write_xlsx};

use crate::ApiResult;

/// MIME type of an XLSX workbook.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Renders `sheet` and serves it as a download named `filename`.
pub fn xlsx_attachment(sheet: &Sheet, filename: &str) -> ApiResult<Response> {
    let bytes = write_xlsx(sheet)?;
    tracing::info!(filename, bytes = bytes.len(), rows = sheet.rows.len(), "Export generated");

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(filename)),
        ],
        bytes,
    )
        .into_response())
}

fn content_disposition(filename: &str) -> String {
    format!("attachment; filename=\"{}\"", filename.replace('"', ""))
}

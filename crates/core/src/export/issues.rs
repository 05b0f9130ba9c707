//! Issue list export.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use meridian_shared::types::SubsidiaryId;

use super::error::ExportError;
use super::sheet::{CellValue, Sheet};
use crate::issue::Issue;
use crate::subsidiary::Subsidiary;

const HEADERS: [&str; 11] = [
    "순번",
    "제목",
    "카테고리",
    "Entity",
    "상태",
    "설명",
    "대응 내용",
    "작성자",
    "생성일",
    "수정일",
    "완료일",
];

const WIDTHS: [f64; 11] = [5.0, 40.0, 15.0, 20.0, 10.0, 50.0, 50.0, 10.0, 18.0, 18.0, 18.0];

const MISSING: &str = "-";

fn timestamp(at: DateTime<Utc>, tz: Tz) -> String {
    at.with_timezone(&tz).format("%Y-%m-%d %H:%M").to_string()
}

/// One row per issue, in the given order.
///
/// # Errors
///
/// Returns `Empty` when there are no issues.
pub fn issue_sheet(
    issues: &[Issue],
    subsidiaries: &[Subsidiary],
    tz: Tz,
) -> Result<Sheet, ExportError> {
    if issues.is_empty() {
        return Err(ExportError::Empty);
    }
    let names: HashMap<SubsidiaryId, &str> = subsidiaries
        .iter()
        .map(|sub| (sub.id, sub.name.as_str()))
        .collect();

    let rows = issues
        .iter()
        .zip(1u32..)
        .map(|(issue, index)| {
            vec![
                CellValue::from(index),
                issue.title.as_str().into(),
                issue.category.as_str().into(),
                names.get(&issue.entity_id).copied().unwrap_or("Unknown").into(),
                issue.status.as_str().into(),
                issue.description.as_str().into(),
                issue.response.as_deref().unwrap_or(MISSING).into(),
                issue.created_by.as_str().into(),
                timestamp(issue.created_at, tz).into(),
                timestamp(issue.updated_at, tz).into(),
                issue
                    .completed_at
                    .map_or_else(|| MISSING.to_string(), |at| timestamp(at, tz))
                    .into(),
            ]
        })
        .collect();

    Ok(Sheet {
        name: "Issues",
        headers: HEADERS.iter().map(ToString::to_string).collect(),
        rows,
        column_widths: WIDTHS.to_vec(),
    })
}

/// `Issues_{yyyyMMdd_HHmmss}.xlsx` in the export timezone.
#[must_use]
pub fn issue_export_filename(now: DateTime<Utc>, tz: Tz) -> String {
    format!("Issues_{}.xlsx", now.with_timezone(&tz).format("%Y%m%d_%H%M%S"))
}

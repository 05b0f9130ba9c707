//! Closing schedule export.

use chrono::NaiveDate;

use super::error::ExportError;
use super::sheet::{CellValue, Sheet};
use crate::closing::{Quarter, ScheduleItem, achievement_rate};
use crate::subsidiary::Subsidiary;

const ENTITY_WIDTH: f64 = 20.0;
const DAY_WIDTH: f64 = 15.0;
const RATE_WIDTH: f64 = 10.0;

/// One row per subsidiary (by name), one column per day of the span, then
/// the subsidiary's achievement rate.
///
/// `name_prefix` is stripped once from entity names when given.
///
/// # Errors
///
/// Returns `Empty` when there are no subsidiaries.
pub fn schedule_sheet(
    quarter: &Quarter,
    items: &[ScheduleItem],
    subsidiaries: &[Subsidiary],
    name_prefix: Option<&str>,
) -> Result<Sheet, ExportError> {
    if subsidiaries.is_empty() {
        return Err(ExportError::Empty);
    }
    let days: Vec<NaiveDate> = quarter.days().collect();

    let mut headers = Vec::with_capacity(days.len() + 2);
    headers.push("Entity".to_string());
    headers.extend(days.iter().map(|day| day.format("%m/%d").to_string()));
    headers.push("성사율".to_string());

    let mut ordered: Vec<&Subsidiary> = subsidiaries.iter().collect();
    ordered.sort_by(|a, b| a.name.cmp(&b.name));

    let rows = ordered
        .into_iter()
        .map(|sub| {
            let own: Vec<&ScheduleItem> = items
                .iter()
                .filter(|item| item.subsidiary_id == sub.id)
                .collect();

            let mut row = Vec::with_capacity(days.len() + 2);
            row.push(CellValue::from(display_name(&sub.name, name_prefix)));
            for day in &days {
                let labels: Vec<String> = own
                    .iter()
                    .filter(|item| item.planned_date == *day)
                    .map(|item| item.export_label())
                    .collect();
                row.push(CellValue::from(labels.join(", ")));
            }
            let rate = achievement_rate(own.iter().copied()).normalize();
            row.push(CellValue::from(format!("{rate}%")));
            row
        })
        .collect();

    let mut column_widths = Vec::with_capacity(days.len() + 2);
    column_widths.push(ENTITY_WIDTH);
    column_widths.extend(days.iter().map(|_| DAY_WIDTH));
    column_widths.push(RATE_WIDTH);

    Ok(Sheet {
        name: "Schedule",
        headers,
        rows,
        column_widths,
    })
}

fn display_name(name: &str, prefix: Option<&str>) -> String {
    match prefix.filter(|p| !p.is_empty()) {
        Some(prefix) => name.replacen(prefix, "", 1),
        None => name.to_string(),
    }
}

/// `Schedule_{year}Q{q}_{yyyyMMdd}.xlsx`.
#[must_use]
pub fn schedule_export_filename(quarter: &Quarter, today: NaiveDate) -> String {
    format!(
        "Schedule_{}Q{}_{}.xlsx",
        quarter.year,
        quarter.quarter,
        today.format("%Y%m%d")
    )
}

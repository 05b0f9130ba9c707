//! Export scenarios.

#![allow(clippy::float_cmp)]

use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Asia::Seoul;
use meridian_shared::types::{IssueId, QuarterId, ScheduleItemId, SubsidiaryId};

use super::*;
use crate::closing::{ClosingCategory, NewScheduleItem, Quarter, ScheduleItem};
use crate::issue::{Issue, IssueCategory, IssueStatus};
use crate::subsidiary::{Region, Subsidiary};

fn subsidiary(name: &str) -> Subsidiary {
    Subsidiary {
        id: SubsidiaryId::new(),
        name: name.to_string(),
        code: "XX".to_string(),
        country: "X".to_string(),
        city: "X".to_string(),
        latitude: 0.0,
        longitude: 0.0,
        region: Region::Americas,
        created_at: Utc::now(),
    }
}

fn issue(title: &str, entity_id: SubsidiaryId, status: IssueStatus) -> Issue {
    let created = Utc.with_ymd_and_hms(2025, 3, 3, 0, 30, 0).unwrap();
    Issue {
        id: IssueId::new(),
        title: title.to_string(),
        category: IssueCategory::Closing,
        entity_id,
        description: "설명".to_string(),
        response: None,
        status,
        created_by: "Choi".to_string(),
        created_at: created,
        updated_at: created,
        completed_at: (status == IssueStatus::Completed).then_some(created),
    }
}

fn text_column(sheet: &Sheet, index: usize) -> Vec<&str> {
    sheet.column(index).filter_map(CellValue::as_text).collect()
}

#[test]
fn test_issue_sheet_status_and_index_columns() {
    let us = subsidiary("Acme US");
    let issues = vec![
        issue("a", us.id, IssueStatus::Completed),
        issue("b", us.id, IssueStatus::InProgress),
        issue("c", us.id, IssueStatus::Completed),
    ];
    let sheet = issue_sheet(&issues, &[us], Seoul).unwrap();

    assert_eq!(sheet.name, "Issues");
    assert_eq!(sheet.headers[0], "순번");
    assert_eq!(sheet.headers[4], "상태");
    assert_eq!(
        sheet.column(0).cloned().collect::<Vec<_>>(),
        vec![CellValue::Integer(1), CellValue::Integer(2), CellValue::Integer(3)]
    );
    assert_eq!(text_column(&sheet, 4), ["완료", "확인 중", "완료"]);
    assert_eq!(sheet.column_widths.len(), 11);
}

#[test]
fn test_issue_sheet_placeholders_and_timezone() {
    let issues = vec![issue("orphan", SubsidiaryId::new(), IssueStatus::InProgress)];
    let sheet = issue_sheet(&issues, &[], Seoul).unwrap();
    let row = &sheet.rows[0];
    assert_eq!(row[3].as_text(), Some("Unknown"));
    assert_eq!(row[6].as_text(), Some("-"));
    assert_eq!(row[8].as_text(), Some("2025-03-03 09:30"));
    assert_eq!(row[10].as_text(), Some("-"));
}

#[test]
fn test_empty_exports_rejected() {
    assert!(matches!(issue_sheet(&[], &[], Seoul), Err(ExportError::Empty)));
    let quarter = Quarter::pending(2025, 1).unwrap();
    assert!(matches!(
        schedule_sheet(&quarter, &[], &[], None),
        Err(ExportError::Empty)
    ));
}

#[test]
fn test_schedule_sheet_cells_and_rates() {
    let quarter = Quarter::pending(2025, 1).unwrap();
    let us = subsidiary("Group Acme US");
    let de = subsidiary("Group Acme DE");
    let day = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
    let quarter_id = QuarterId::new();
    let new_item = |sub: SubsidiaryId, category| {
        ScheduleItem::planned(
            ScheduleItemId::new(),
            NewScheduleItem {
                quarter_id,
                subsidiary_id: sub,
                category,
                planned_date: day,
            },
            Utc::now(),
        )
    };
    let mut confirmed = new_item(us.id, ClosingCategory::EmployeeJd);
    confirmed.confirm(day, Utc::now()).unwrap();
    let items = vec![confirmed, new_item(us.id, ClosingCategory::Pkg)];

    let sheet = schedule_sheet(&quarter, &items, &[us, de], Some("Group ")).unwrap();

    assert_eq!(sheet.name, "Schedule");
    assert_eq!(sheet.headers.len(), 92);
    assert_eq!(sheet.headers[1], "01/01");
    assert_eq!(sheet.headers[91], "성사율");
    assert_eq!(sheet.column_widths[0], 20.0);
    assert_eq!(sheet.column_widths[1], 15.0);
    assert_eq!(sheet.column_widths[91], 10.0);

    // rows ordered by name: DE before US
    assert_eq!(text_column(&sheet, 0), ["Acme DE", "Acme US"]);
    assert_eq!(sheet.rows[1][2].as_text(), Some("✓Employee JD, ○PKG"));
    assert_eq!(sheet.rows[1][91].as_text(), Some("50%"));
    assert_eq!(sheet.rows[0][91].as_text(), Some("0%"));
}

#[test]
fn test_export_filenames() {
    let quarter = Quarter::pending(2025, 2).unwrap();
    let today = NaiveDate::from_ymd_opt(2025, 5, 7).unwrap();
    assert_eq!(
        schedule_export_filename(&quarter, today),
        "Schedule_2025Q2_20250507.xlsx"
    );
    let now = Utc.with_ymd_and_hms(2025, 5, 7, 15, 4, 5).unwrap();
    assert_eq!(issue_export_filename(now, Seoul), "Issues_20250508_000405.xlsx");
}

#[test]
fn test_write_xlsx_produces_zip_container() {
    let us = subsidiary("Acme US");
    let sheet = issue_sheet(&[issue("a", us.id, IssueStatus::InProgress)], &[us], Seoul).unwrap();
    let bytes = write_xlsx(&sheet).unwrap();
    assert_eq!(&bytes[..2], b"PK");
}

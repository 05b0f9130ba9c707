use super::*;
use chrono::{Duration, TimeZone};
use rstest::rstest;

fn draft() -> IssueDraft {
    IssueDraft {
        title: "  VAT refund delayed ".to_string(),
        category: IssueCategory::Tax,
        entity_id: SubsidiaryId::new(),
        description: "Refund pending since March".to_string(),
        response: Some("   ".to_string()),
        status: None,
        created_by: "Kim".to_string(),
    }
}

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 1, 9, 0, 0).unwrap()
}

#[rstest]
#[case("Labor SG&A", IssueCategory::LaborSga)]
#[case("Bad debt", IssueCategory::BadDebt)]
#[case("FS", IssueCategory::Fs)]
#[case("PKG", IssueCategory::Pkg)]
fn test_category_parse(#[case] raw: &str, #[case] expected: IssueCategory) {
    assert_eq!(raw.parse::<IssueCategory>().unwrap(), expected);
    assert_eq!(expected.to_string(), raw);
}

#[test]
fn test_category_serde_matches_stored_value() {
    for category in IssueCategory::ALL {
        let json = serde_json::to_string(&category).unwrap();
        assert_eq!(json, format!("\"{}\"", category.as_str()));
    }
}

#[test]
fn test_unknown_category_falls_back_to_others() {
    assert_eq!(IssueCategory::parse_or_others("Payroll"), IssueCategory::Others);
    assert_eq!(IssueCategory::parse_or_others(" Lease "), IssueCategory::Lease);
}

#[test]
fn test_status_serde_uses_korean_labels() {
    assert_eq!(
        serde_json::to_string(&IssueStatus::InProgress).unwrap(),
        "\"확인 중\""
    );
    assert_eq!(
        serde_json::from_str::<IssueStatus>("\"완료\"").unwrap(),
        IssueStatus::Completed
    );
    assert!("done".parse::<IssueStatus>().is_err());
}

#[test]
fn test_draft_defaults() {
    let issue = Issue::from_draft(IssueId::new(), draft(), t0());
    assert_eq!(issue.title, "VAT refund delayed");
    assert_eq!(issue.status, IssueStatus::InProgress);
    assert_eq!(issue.response, None);
    assert_eq!(issue.completed_at, None);
}

#[rstest]
#[case::title(IssueDraft { title: " ".to_string(), ..draft() }, "title")]
#[case::description(IssueDraft { description: String::new(), ..draft() }, "description")]
#[case::author(IssueDraft { created_by: "\t".to_string(), ..draft() }, "created_by")]
fn test_draft_requires_fields(#[case] draft: IssueDraft, #[case] field: &'static str) {
    assert_eq!(draft.validate(), Err(IssueError::MissingField(field)));
}

#[test]
fn test_complete_then_reopen() {
    let mut issue = Issue::from_draft(IssueId::new(), draft(), t0());
    let t1 = t0() + Duration::hours(2);
    issue.apply(IssueUpdate::complete(), t1);
    assert_eq!(issue.status, IssueStatus::Completed);
    assert_eq!(issue.completed_at, Some(t1));
    assert_eq!(issue.updated_at, t1);

    let t2 = t1 + Duration::hours(1);
    issue.apply(IssueUpdate::complete(), t2);
    assert_eq!(issue.completed_at, Some(t1));

    issue.apply(
        IssueUpdate {
            status: Some(IssueStatus::InProgress),
            ..IssueUpdate::default()
        },
        t2,
    );
    assert_eq!(issue.completed_at, None);
}

#[test]
fn test_partial_update_keeps_other_fields() {
    let mut issue = Issue::from_draft(IssueId::new(), draft(), t0());
    issue.apply(
        IssueUpdate {
            response: Some("Filed amended return".to_string()),
            ..IssueUpdate::default()
        },
        t0(),
    );
    assert_eq!(issue.response.as_deref(), Some("Filed amended return"));
    assert_eq!(issue.category, IssueCategory::Tax);
    assert_eq!(issue.status, IssueStatus::InProgress);
}

#[test]
fn test_update_rejects_blank_title() {
    let update = IssueUpdate {
        title: Some(String::new()),
        ..IssueUpdate::default()
    };
    assert_eq!(update.validate(), Err(IssueError::MissingField("title")));
}

use super::*;
use chrono::Utc;

use crate::subsidiary::Region;

fn sub(code: &str, name: &str) -> Subsidiary {
    Subsidiary {
        id: SubsidiaryId::new(),
        name: name.to_string(),
        code: code.to_string(),
        country: "Korea".to_string(),
        city: "Seoul".to_string(),
        latitude: 37.5,
        longitude: 127.0,
        region: Region::AsiaPacific,
        created_at: Utc::now(),
    }
}

fn subsidiaries() -> Vec<Subsidiary> {
    vec![
        sub("HQ", "Acme Headquarters"),
        sub("US", "Acme America"),
        sub("DE", "Acme Germany"),
    ]
}

#[test]
fn test_extract_fenced_block() {
    let text = "Here you go:\n```json\n{\"title\": \"a\"}\n```\nThanks";
    assert_eq!(extract_json(text), "{\"title\": \"a\"}");
}

#[test]
fn test_extract_braces_span() {
    let text = "Sure! {\"title\": \"a\", \"nested\": {\"x\": 1}} done";
    assert_eq!(extract_json(text), "{\"title\": \"a\", \"nested\": {\"x\": 1}}");
}

#[test]
fn test_extract_falls_back_to_trimmed_text() {
    assert_eq!(extract_json("  no json here \n"), "no json here");
}

#[test]
fn test_parse_full_reply() {
    let subs = subsidiaries();
    let reply = r#"```json
{"title": "독일 법인 리스 계약 갱신", "category": "Lease", "entity": "de", "description": "리스 계약 만료 예정"}
```"#;
    let suggestion = parse_response(reply, &subs).unwrap();
    assert_eq!(suggestion.title, "독일 법인 리스 계약 갱신");
    assert_eq!(suggestion.category, IssueCategory::Lease);
    assert_eq!(suggestion.entity_code, "DE");
    assert_eq!(suggestion.entity_id, Some(subs[2].id));
}

#[test]
fn test_unknown_category_becomes_others_and_unknown_entity_becomes_hq() {
    let subs = subsidiaries();
    let reply = r#"{"title": "t", "category": "Payroll", "entity": "Mars", "description": "d"}"#;
    let suggestion = parse_response(reply, &subs).unwrap();
    assert_eq!(suggestion.category, IssueCategory::Others);
    assert_eq!(suggestion.entity_code, "HQ");
    assert_eq!(suggestion.entity_id, Some(subs[0].id));
}

#[test]
fn test_entity_matched_by_name() {
    let subs = subsidiaries();
    assert_eq!(resolve_entity("america", &subs).map(|s| s.code.as_str()), Some("US"));
}

#[test]
fn test_no_hq_leaves_entity_unmatched() {
    let subs = vec![sub("US", "Acme America")];
    let reply = r#"{"title": "t", "category": "Tax", "entity": "FR", "description": "d"}"#;
    let suggestion = parse_response(reply, &subs).unwrap();
    assert_eq!(suggestion.entity_id, None);
    assert_eq!(suggestion.entity_code, "FR");
}

#[test]
fn test_missing_field_rejected() {
    let reply = r#"{"title": "t", "category": "Tax", "entity": "US", "description": "  "}"#;
    assert!(matches!(
        parse_response(reply, &subsidiaries()),
        Err(AiParseError::MissingField("description"))
    ));
    let reply = r#"{"title": "t", "category": "Tax", "entity": "US"}"#;
    assert!(matches!(
        parse_response(reply, &subsidiaries()),
        Err(AiParseError::MissingField("description"))
    ));
}

#[test]
fn test_invalid_json_rejected() {
    assert!(matches!(
        parse_response("I could not understand the request.", &subsidiaries()),
        Err(AiParseError::InvalidJson(_))
    ));
}

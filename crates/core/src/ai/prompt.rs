//! Prompt template for issue drafting.

use crate::issue::IssueCategory;
use crate::subsidiary::Subsidiary;

/// Builds the drafting prompt for `input`, listing every category and the
/// known subsidiaries as `- {code}: {name}`.
#[must_use]
pub fn build_prompt(input: &str, subsidiaries: &[Subsidiary]) -> String {
    let categories = IssueCategory::ALL
        .iter()
        .map(|category| format!("- {}", category.as_str()))
        .collect::<Vec<_>>()
        .join("\n");
    let entities = subsidiaries
        .iter()
        .map(|sub| format!("- {}: {}", sub.code, sub.name))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"당신은 회계 이슈를 분석하는 전문가입니다.
사용자가 입력한 텍스트를 분석하여 구조화된 이슈 데이터를 추출해주세요.

# 입력
{input}

# 출력 형식 (반드시 JSON만 출력)
{{
  "title": "이슈 제목 (간결하게, 50자 이내)",
  "category": "카테고리 (아래 목록 중 하나)",
  "entity": "법인 코드 (아래 목록 중 하나)",
  "description": "상세 설명 (입력 내용 기반)"
}}

# 카테고리 목록
{categories}

# 법인 목록
{entities}

# 규칙
1. 출력은 반드시 JSON 형식만 (다른 텍스트 없이)
2. 법인명이 명확하지 않으면 "HQ" 선택
3. 카테고리가 불명확하면 "Others" 선택
4. 제목은 핵심만 간결하게
5. 설명은 입력 내용을 명확하게 정리

JSON 응답:"#,
        input = input.trim(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use meridian_shared::types::SubsidiaryId;

    use crate::subsidiary::Region;

    #[test]
    fn test_prompt_lists_categories_and_entities() {
        let subs = vec![Subsidiary {
            id: SubsidiaryId::new(),
            name: "Acme Japan".to_string(),
            code: "JP".to_string(),
            country: "Japan".to_string(),
            city: "Tokyo".to_string(),
            latitude: 35.7,
            longitude: 139.7,
            region: Region::AsiaPacific,
            created_at: Utc::now(),
        }];
        let prompt = build_prompt("  일본 법인 재고 실사 차이 발생 ", &subs);

        assert!(prompt.starts_with("당신은 회계 이슈를 분석하는 전문가입니다."));
        assert!(prompt.contains("# 입력\n일본 법인 재고 실사 차이 발생\n"));
        assert!(prompt.contains("- Labor SG&A\n"));
        assert!(prompt.contains("- Others\n"));
        assert!(prompt.contains("# 법인 목록\n- JP: Acme Japan\n"));
        assert!(prompt.contains("\"entity\": \"법인 코드 (아래 목록 중 하나)\""));
        assert!(prompt.ends_with("JSON 응답:"));
    }
}

//! Interpreting the model reply.

use meridian_shared::types::SubsidiaryId;
use serde::{Deserialize, Serialize};

use super::error::AiParseError;
use crate::issue::IssueCategory;
use crate::subsidiary::Subsidiary;

/// Code of the subsidiary used when the reply names none we know.
pub const FALLBACK_ENTITY_CODE: &str = "HQ";

/// Raw fields the model is asked for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParsedIssue {
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Category label.
    #[serde(default)]
    pub category: String,
    /// Entity code or name.
    #[serde(default)]
    pub entity: String,
    /// Description.
    #[serde(default)]
    pub description: String,
}

impl ParsedIssue {
    fn validate(&self) -> Result<(), AiParseError> {
        for (name, value) in [
            ("title", &self.title),
            ("category", &self.category),
            ("entity", &self.entity),
            ("description", &self.description),
        ] {
            if value.trim().is_empty() {
                return Err(AiParseError::MissingField(name));
            }
        }
        Ok(())
    }
}

/// A suggested issue ready to prefill the create form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueSuggestion {
    /// Title.
    pub title: String,
    /// Category, `Others` when unrecognised.
    pub category: IssueCategory,
    /// Entity code as returned by the model.
    pub entity_code: String,
    /// Matched subsidiary, if any.
    pub entity_id: Option<SubsidiaryId>,
    /// Description.
    pub description: String,
}

/// Returns the JSON part of a reply.
///
/// A fenced ```` ```json ```` block wins, then the span from the first `{` to
/// the last `}`, then the whole trimmed text.
#[must_use]
pub fn extract_json(text: &str) -> &str {
    if let Some(start) = text.find("```json") {
        let body = &text[start + "```json".len()..];
        if let Some(end) = body.find("```") {
            return body[..end].trim();
        }
    }
    match (text.find('{'), text.rfind('}')) {
        (Some(open), Some(close)) if open < close => &text[open..=close],
        _ => text.trim(),
    }
}

/// Finds the subsidiary a reply refers to: by code (case-insensitive), then
/// by name containment, then the `HQ` subsidiary.
#[must_use]
pub fn resolve_entity<'a>(entity: &str, subsidiaries: &'a [Subsidiary]) -> Option<&'a Subsidiary> {
    let needle = entity.trim().to_lowercase();
    subsidiaries
        .iter()
        .find(|sub| sub.code.to_lowercase() == needle)
        .or_else(|| {
            subsidiaries
                .iter()
                .find(|sub| !needle.is_empty() && sub.name.to_lowercase().contains(&needle))
        })
        .or_else(|| {
            subsidiaries
                .iter()
                .find(|sub| sub.code == FALLBACK_ENTITY_CODE)
        })
}

/// Parses a model reply into a suggestion.
///
/// # Errors
///
/// Returns `InvalidJson` or `MissingField` when the reply is unusable.
pub fn parse_response(
    text: &str,
    subsidiaries: &[Subsidiary],
) -> Result<IssueSuggestion, AiParseError> {
    let parsed: ParsedIssue = serde_json::from_str(extract_json(text))?;
    parsed.validate()?;

    let entity = resolve_entity(&parsed.entity, subsidiaries);
    Ok(IssueSuggestion {
        title: parsed.title.trim().to_string(),
        category: IssueCategory::parse_or_others(&parsed.category),
        entity_code: entity.map_or_else(|| parsed.entity.trim().to_string(), |sub| sub.code.clone()),
        entity_id: entity.map(|sub| sub.id),
        description: parsed.description.trim().to_string(),
    })
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;

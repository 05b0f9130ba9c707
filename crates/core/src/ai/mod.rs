//! AI-assisted issue drafting: the prompt sent to the model and the
//! interpretation of its reply.

pub mod error;
pub mod parse;
pub mod prompt;

pub use error::AiParseError;
pub use parse::{IssueSuggestion, ParsedIssue, extract_json, parse_response, resolve_entity};
pub use prompt::build_prompt;

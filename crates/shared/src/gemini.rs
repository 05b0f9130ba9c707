//! Client for the hosted generative language model.
//!
//! Uses `reqwest` against the `generateContent` REST endpoint. The client only
//! moves text; prompt construction and response parsing live in the core crate.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::config::GeminiConfig;

/// Language-model client errors.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// No access key is configured.
    #[error("Language model API key is not configured")]
    MissingApiKey,
    /// The HTTP request could not be completed.
    #[error("Request to language model failed: {0}")]
    Request(String),
    /// The provider answered with a non-success status.
    #[error("Language model returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },
    /// The response carried no candidate text.
    #[error("Language model returned no text")]
    EmptyResponse,
}

impl From<reqwest::Error> for GeminiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err.to_string())
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// A model offered by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    /// Resource name, e.g. `models/gemini-2.5-flash`.
    pub name: String,
    /// Human readable name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Supported methods, e.g. `generateContent`.
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

/// Client for the hosted language model.
#[derive(Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    /// Creates a new client.
    #[must_use]
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Returns true if an access key is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.config.api_key.trim().is_empty()
    }

    fn api_key(&self) -> Result<&str, GeminiError> {
        if self.is_configured() {
            Ok(self.config.api_key.trim())
        } else {
            Err(GeminiError::MissingApiKey)
        }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn models_url(&self) -> String {
        format!("{}/models", self.config.base_url.trim_end_matches('/'))
    }

    /// Sends a single prompt and returns the first candidate's text.
    ///
    /// # Errors
    ///
    /// Returns an error if no key is configured, the request fails, the
    /// provider answers with a non-success status, or no text comes back.
    pub async fn generate(&self, prompt: &str) -> Result<String, GeminiError> {
        let key = self.api_key()?;
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(self.generate_url())
            .query(&[("key", key)])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "Language model call failed");
            return Err(GeminiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        let text = first_candidate_text(parsed).ok_or(GeminiError::EmptyResponse)?;
        debug!(chars = text.len(), "Language model responded");
        Ok(text)
    }

    /// Lists the models available to the configured key.
    ///
    /// # Errors
    ///
    /// Returns an error if no key is configured or the request fails.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, GeminiError> {
        let key = self.api_key()?;
        let response = self
            .http
            .get(self.models_url())
            .query(&[("key", key)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let list: ModelList = response.json().await?;
        Ok(list.models)
    }
}

fn first_candidate_text(response: GenerateResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .next()?
        .text
        .filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
#[path = "gemini_tests.rs"]
mod tests;

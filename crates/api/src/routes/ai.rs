//! Language-model utility routes.

use axum::{Json, Router, extract::State, routing::get};
use meridian_shared::{AppError, GeminiError, gemini::ModelInfo};
use serde::Serialize;
use tracing::error;

use crate::{ApiError, ApiResult, AppState};

/// Creates the AI routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/ai/models", get(list_models))
}

/// Response for the model listing.
#[derive(Debug, Serialize)]
pub struct ModelListResponse {
    /// Models offered to the configured key.
    pub models: Vec<ModelInfo>,
}

/// GET `/ai/models` - Proxy the provider's model listing.
async fn list_models(State(state): State<AppState>) -> ApiResult<Json<ModelListResponse>> {
    let models = state.gemini.list_models().await.map_err(listing_failed)?;
    Ok(Json(ModelListResponse { models }))
}

fn listing_failed(err: GeminiError) -> ApiError {
    error!(error = %err, "Model listing failed");
    match err {
        GeminiError::MissingApiKey => AppError::Internal(err.to_string()).into(),
        _ => AppError::ExternalService("모델 조회 실패".to_string()).into(),
    }
}

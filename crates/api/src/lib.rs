//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes under `/api/v1`
//! - Conversion of domain and storage errors into JSON error responses
//! - Spreadsheet download responses

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use chrono_tz::Tz;
use meridian_shared::{ExportConfig, GeminiClient};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ApiResult};

/// Export settings resolved at startup.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    /// Timezone for sheet timestamps and file names.
    pub tz: Tz,
    /// Prefix stripped from entity names in the schedule sheet.
    pub entity_name_prefix: Option<String>,
}

impl ExportSettings {
    /// Resolves the configured timezone.
    ///
    /// # Errors
    ///
    /// Returns the unknown timezone name.
    pub fn from_config(config: &ExportConfig) -> Result<Self, String> {
        Ok(Self {
            tz: config.tz()?,
            entity_name_prefix: config
                .entity_name_prefix
                .clone()
                .filter(|prefix| !prefix.is_empty()),
        })
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            tz: chrono_tz::Asia::Seoul,
            entity_name_prefix: None,
        }
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Client for the hosted language model.
    pub gemini: Arc<GeminiClient>,
    /// Spreadsheet export settings.
    pub export: Arc<ExportSettings>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

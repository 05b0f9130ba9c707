//! Subsidiary listing and world-map routes.

use axum::{Json, Router, extract::State, routing::get};
use meridian_core::subsidiary::{MapMarker, RegionLegendEntry, Subsidiary, map_markers, region_legend};
use meridian_db::SubsidiaryRepository;
use serde::Serialize;

use crate::{ApiResult, AppState};

/// Creates the subsidiary routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/subsidiaries", get(list_subsidiaries))
        .route("/subsidiaries/map", get(subsidiary_map))
}

/// Response for the subsidiary list.
#[derive(Debug, Serialize)]
pub struct SubsidiaryListResponse {
    /// Subsidiaries ordered by name.
    pub subsidiaries: Vec<Subsidiary>,
}

/// Response for the world map.
#[derive(Debug, Serialize)]
pub struct SubsidiaryMapResponse {
    /// One marker per subsidiary.
    pub markers: Vec<MapMarker>,
    /// Region colours.
    pub legend: Vec<RegionLegendEntry>,
}

/// GET `/subsidiaries` - List subsidiaries ordered by name.
async fn list_subsidiaries(State(state): State<AppState>) -> ApiResult<Json<SubsidiaryListResponse>> {
    let subsidiaries = SubsidiaryRepository::new((*state.db).clone()).list().await?;
    Ok(Json(SubsidiaryListResponse { subsidiaries }))
}

/// GET `/subsidiaries/map` - Map markers and the region legend.
async fn subsidiary_map(State(state): State<AppState>) -> ApiResult<Json<SubsidiaryMapResponse>> {
    let subsidiaries = SubsidiaryRepository::new((*state.db).clone()).list().await?;
    Ok(Json(SubsidiaryMapResponse {
        markers: map_markers(&subsidiaries),
        legend: region_legend(),
    }))
}

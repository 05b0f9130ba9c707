//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod ai;
pub mod closing;
pub mod download;
pub mod financials;
pub mod health;
pub mod issues;
pub mod subsidiaries;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(subsidiaries::routes())
        .merge(financials::routes())
        .merge(issues::routes())
        .merge(ai::routes())
        .merge(closing::routes())
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod router_tests;

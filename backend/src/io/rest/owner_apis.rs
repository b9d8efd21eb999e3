//! # REST API for Owners
//!
//! The owner details page, where a successful care submission lands.

use axum::{
    extract::State,
    response::IntoResponse,
    routing::get,
    Router,
};
use shared::OwnerDetailsModel;
use tracing::{error, info};

use crate::io::rest::extract::ValidPath;
use crate::io::rest::views::{render, OWNER_DETAILS_VIEW};
use crate::AppState;

/// Create a router for owner related APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/owners/:owner_id", get(show_owner))
}

/// Show an owner with their pets, visits and care records
pub async fn show_owner(
    State(state): State<AppState>,
    ValidPath(owner_id): ValidPath<i64>,
) -> impl IntoResponse {
    info!("GET /owners/{}", owner_id);

    match state.owner_service.find_owner(owner_id).await {
        Ok(owner) => render(OWNER_DETAILS_VIEW, OwnerDetailsModel { owner }),
        Err(e) => {
            error!("Failed to load owner {}: {}", owner_id, e);
            e.into_response()
        }
    }
}

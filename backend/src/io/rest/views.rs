//! View rendering and error translation for the REST layer.
//!
//! Handlers select a view by name and hand it a model; the view is sent as
//! JSON (`{"view": ..., "model": ...}`) for the frontend to render.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{ErrorResponse, ViewResponse};
use tracing::error;

use crate::domain::ClinicError;

pub const CARE_HISTORY_VIEW: &str = "pets/showVisitCares";
pub const CARE_FORM_VIEW: &str = "pets/createOrUpdateCareForm";
pub const OWNER_DETAILS_VIEW: &str = "owners/ownerDetails";

/// Respond with a named view and its model
pub fn render<M: Serialize>(view: &str, model: M) -> Response {
    let body = ViewResponse {
        view: view.to_string(),
        model,
    };
    (StatusCode::OK, Json(body)).into_response()
}

impl IntoResponse for ClinicError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ClinicError::PetNotFound(_) => (StatusCode::NOT_FOUND, "PET_NOT_FOUND"),
            ClinicError::OwnerNotFound(_) => (StatusCode::NOT_FOUND, "OWNER_NOT_FOUND"),
            ClinicError::Storage(e) => {
                error!("Storage failure: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let message = match status {
            StatusCode::INTERNAL_SERVER_ERROR => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

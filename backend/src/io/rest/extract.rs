//! Extractors shared by the REST handlers.

use axum::{
    async_trait,
    extract::{rejection::PathRejection, FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use shared::ErrorResponse;
use tracing::warn;

/// [`Path`] whose rejection is reported as an [`ErrorResponse`] body
#[derive(Debug)]
pub struct ValidPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ValidPath(value)),
            Err(rejection) => {
                warn!("Rejected path {}: {}", parts.uri.path(), rejection.body_text());
                Err(path_rejection_response(rejection))
            }
        }
    }
}

fn path_rejection_response(rejection: PathRejection) -> Response {
    let body = ErrorResponse {
        error: rejection.body_text(),
        code: "INVALID_PATH".to_string(),
    };
    (rejection.status(), Json(body)).into_response()
}

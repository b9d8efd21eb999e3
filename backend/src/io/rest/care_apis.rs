//! # REST API for Care Records
//!
//! Endpoints for viewing a pet's care history and recording new care events.
//! Every endpoint here is preceded by the pet pre-load step
//! ([`PreloadedPet`]), which fetches the pet with its care history and
//! attaches a fresh empty care for the handler to work on.

use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use shared::{parse_iso_date, CareFormModel, CareHistoryModel};
use tracing::{error, info};

use crate::domain::{CareSubmission, PetCareContext};
use crate::io::rest::extract::ValidPath;
use crate::io::rest::views::{render, CARE_FORM_VIEW, CARE_HISTORY_VIEW};
use crate::AppState;

/// Create a router for care related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/owners/:owner_id/pets/:pet_id/cares/:date/show", get(show_cares))
        .route(
            "/owners/:owner_id/pets/:pet_id/cares/new",
            get(init_new_care_form).post(process_new_care_form),
        )
}

/// A date path segment in strict `yyyy-MM-dd` form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CareDate(pub NaiveDate);

impl<'de> Deserialize<'de> for CareDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_iso_date(&raw).map(CareDate).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Deserialize)]
pub struct PetPath {
    pub pet_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct OwnerPetPath {
    pub owner_id: i64,
    pub pet_id: i64,
}

/// The owner segment of the history path is not interpreted
#[derive(Debug, Deserialize)]
pub struct ShowCaresPath {
    pub pet_id: i64,
    pub date: CareDate,
}

/// Pre-load step: the pet named in the path, its care history and a new
/// empty care attached to it
pub struct PreloadedPet(pub PetCareContext);

#[async_trait]
impl FromRequestParts<AppState> for PreloadedPet {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let ValidPath(path) = ValidPath::<PetPath>::from_request_parts(parts, state).await?;

        state
            .care_service
            .load_pet_with_care(path.pet_id)
            .await
            .map(PreloadedPet)
            .map_err(|e| {
                error!("Failed to pre-load pet {}: {}", path.pet_id, e);
                e.into_response()
            })
    }
}

/// Show the care history of a pet
pub async fn show_cares(
    State(state): State<AppState>,
    ValidPath(path): ValidPath<ShowCaresPath>,
    PreloadedPet(context): PreloadedPet,
) -> impl IntoResponse {
    let date = path.date.0;
    info!("GET /owners/*/pets/{}/cares/{}/show", path.pet_id, date);

    match state.care_service.show_cares(path.pet_id, date).await {
        Ok(pet) => {
            let (_, care) = context.into_parts();
            let model = CareHistoryModel { pet, cares: care, date };
            render(CARE_HISTORY_VIEW, model)
        }
        Err(e) => {
            error!("Failed to show cares for pet {}: {}", path.pet_id, e);
            e.into_response()
        }
    }
}

/// Show the empty form for a new care record
pub async fn init_new_care_form(
    ValidPath(path): ValidPath<OwnerPetPath>,
    PreloadedPet(context): PreloadedPet,
) -> impl IntoResponse {
    info!("GET /owners/{}/pets/{}/cares/new", path.owner_id, path.pet_id);

    let (pet, care) = context.into_parts();
    render(
        CARE_FORM_VIEW,
        CareFormModel {
            pet,
            cares: care,
            errors: Vec::new(),
        },
    )
}

/// Record a new care event, redirecting to the owner on success
pub async fn process_new_care_form(
    State(state): State<AppState>,
    ValidPath(path): ValidPath<OwnerPetPath>,
    PreloadedPet(context): PreloadedPet,
    Form(fields): Form<Vec<(String, String)>>,
) -> impl IntoResponse {
    info!("POST /owners/{}/pets/{}/cares/new - fields: {:?}", path.owner_id, path.pet_id, fields);

    match state.care_service.process_new_care_form(context, &fields).await {
        Ok(CareSubmission::Saved(_)) => Redirect::to(&format!("/owners/{}", path.owner_id)).into_response(),
        Ok(CareSubmission::Invalid { pet, care, errors }) => render(
            CARE_FORM_VIEW,
            CareFormModel {
                pet,
                cares: care,
                errors,
            },
        ),
        Err(e) => {
            error!("Failed to save care for pet {}: {}", path.pet_id, e);
            e.into_response()
        }
    }
}

//! # Pet Clinic Backend
//!
//! Care records for the pet clinic: viewing a pet's care history and
//! recording new care events through HTML-form style submissions.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (axum handlers, pre-load extractor, views)
//!     ↓
//! Domain Layer (care and owner services, form binding and validation)
//!     ↓
//! Storage Layer (storage traits, SQLite repositories)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    extract::Request,
    http::{HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, info_span};
use uuid::Uuid;

use crate::config::{ClinicConfig, ServerConfig};
use crate::domain::{CareService, OwnerService};
use crate::storage::{seed_demo_data, DbConnection};

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub care_service: CareService<DbConnection>,
    pub owner_service: OwnerService<DbConnection>,
}

impl AppState {
    pub fn new(connection: Arc<DbConnection>) -> Self {
        Self {
            care_service: CareService::new(connection.clone()),
            owner_service: OwnerService::new(connection),
        }
    }
}

/// Open the database, optionally seed it, and build the services
pub async fn initialize_backend(config: &ClinicConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database.url);
    let connection = Arc::new(DbConnection::new(&config.database.url).await?);

    if config.database.seed_demo_data && seed_demo_data(&connection).await? {
        info!("Database was empty, inserted demo data");
    }

    info!("Setting up domain services");
    Ok(AppState::new(connection))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, server: &ServerConfig) -> Result<Router> {
    let cors = CorsLayer::new()
        .allow_origin(server.cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Ok(Router::new()
        .merge(io::rest::care_apis::router())
        .merge(io::rest::owner_apis::router())
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %Uuid::new_v4(),
            )
        }))
        .layer(cors)
        .with_state(app_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_initialize_backend_seeds_file_database() {
        let dir = tempdir().expect("Failed to create temp dir");
        let mut config = ClinicConfig::default();
        config.database.url = format!("sqlite:{}", dir.path().join("petclinic.db").display());

        let state = initialize_backend(&config).await.expect("Failed to initialize backend");
        let owner = state.owner_service.find_owner(1).await.expect("Seeded owner should exist");
        assert_eq!(owner.last_name, "Franklin");
    }

    #[tokio::test]
    async fn test_initialize_backend_without_seed() {
        let dir = tempdir().unwrap();
        let mut config = ClinicConfig::default();
        config.database.url = format!("sqlite:{}", dir.path().join("empty.db").display());
        config.database.seed_demo_data = false;

        let state = initialize_backend(&config).await.unwrap();
        assert!(state.owner_service.find_owner(1).await.is_err());
    }

    #[tokio::test]
    async fn test_create_router_rejects_bad_cors_origin() {
        let state = AppState::new(Arc::new(DbConnection::in_memory().await.unwrap()));
        let mut server = ServerConfig::default();
        server.cors_origin = "bad\norigin".to_string();
        assert!(create_router(state, &server).is_err());
    }
}

//! Shopdesk API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod dto;
mod error;
mod handlers;
mod state;

use std::path::Path;
use std::sync::Arc;

use shopdesk_application::AccessService;
use shopdesk_core::AppError;
use shopdesk_domain::RoleCatalog;
use shopdesk_infrastructure::InMemoryDirectoryRepository;
use tracing::{info, warn};

use crate::api_config::{ApiConfig, init_tracing};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let role_catalog = RoleCatalog::builtin();
    role_catalog.validate()?;

    let directory = match config.directory_seed_path.as_deref() {
        Some(path) => load_directory_seed(path).await?,
        None => {
            warn!("DIRECTORY_SEED_PATH is not set, starting with an empty directory");
            InMemoryDirectoryRepository::new()
        }
    };

    let app_state = AppState {
        access_service: AccessService::with_catalog(Arc::new(directory), role_catalog),
        role_catalog,
    };

    let app = api_router::build_router(app_state, &config.frontend_url)?;
    let address = config.socket_address()?;

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "shopdesk-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}

async fn load_directory_seed(path: &Path) -> Result<InMemoryDirectoryRepository, AppError> {
    let payload = tokio::fs::read_to_string(path).await.map_err(|error| {
        AppError::Internal(format!(
            "failed to read directory seed '{}': {error}",
            path.display()
        ))
    })?;

    InMemoryDirectoryRepository::from_seed_json(&payload)
}

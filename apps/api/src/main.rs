//! DanceRealmX access API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod dev_seed;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;
mod subscription_sweeper;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use dancerealmx_core::{AppError, AppResult};
use dancerealmx_infrastructure::{
    InMemoryAccessRepository, InMemoryAuditRepository, load_access_policy,
};
use tracing::{error, info};

use crate::api_config::{ApiConfig, init_tracing};

#[tokio::main]
async fn main() -> AppResult<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let policy = load_access_policy(config.access_policy_path.as_deref()).inspect_err(|error| {
        error!(error = %error, "refusing to start with an invalid access policy");
    })?;
    let access_repository = Arc::new(InMemoryAccessRepository::new());
    let audit_repository = Arc::new(InMemoryAuditRepository::new());
    let app_state = api_services::build_app_state(
        Arc::new(policy),
        access_repository.clone(),
        audit_repository,
        config.default_registration_role,
    );

    if config.dev_seed {
        dev_seed::run(&app_state, access_repository.as_ref()).await?;
    }

    let _sweeper = subscription_sweeper::spawn(
        app_state.subscription_service.clone(),
        config.subscription_sweep_interval,
    );

    let app = api_router::build_router(app_state, config.frontend_url.as_str())?;
    let address = config.socket_address()?;

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "dancerealmx-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}

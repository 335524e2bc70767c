//! Application setup and initialization

pub mod routes;
pub mod server;
pub mod services;

use crate::state::AppState;
use anyhow::{Context, Result};
use getchanski_core::Config;
use std::sync::Arc;

/// Build every client and the router. Telemetry must already be initialized.
pub async fn initialize_app(config: &Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::error::set_production_mode(config.is_production());

    let state = services::initialize_services(config)
        .await
        .context("Failed to initialize services")?;

    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}

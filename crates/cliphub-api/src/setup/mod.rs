//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from
//! main.rs for better organization and testability.

pub mod database;
pub mod routes;
pub mod server;

use crate::services::{EngagementService, VideoLifecycleService};
use crate::state::AppState;
use anyhow::{Context, Result};
use cliphub_core::Config;
use cliphub_db::{PgVideoStore, VideoStore};
use std::sync::Arc;
use std::time::Duration;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    // Initialize telemetry first
    crate::telemetry::init_telemetry()
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    // Setup database
    let pool = database::setup_database(&config).await?;

    // Setup object storage
    let storage = cliphub_storage::create_storage(&config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize storage: {}", e))?;

    // Build services around the record store and the object-store gateway
    let store: Arc<dyn VideoStore> = Arc::new(PgVideoStore::new(pool));
    let storage_timeout = Duration::from_secs(config.storage_timeout_secs());

    let lifecycle = VideoLifecycleService::new(
        store.clone(),
        storage,
        config.max_video_size_bytes(),
        storage_timeout,
        config.mutation_retry_limit(),
    );
    let engagement = EngagementService::new(store, config.mutation_retry_limit());

    let state = Arc::new(AppState {
        config: config.clone(),
        lifecycle,
        engagement,
    });

    // Setup routes
    let router = routes::setup_routes(&config, state.clone()).await?;

    Ok((state, router))
}

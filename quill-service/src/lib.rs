//! Quill Service - background article generation over HTTP
//!
//! # Routes
//!
//! - `POST /generate` - Accept a topic and start a job (202)
//! - `GET /status/:job_id` - Job record, or 404 `job not found`
//! - `GET /health` - Health check
//!
//! Jobs run on their own tokio task: acceptance never waits for generation.

mod error;
mod routes;
mod runner;
mod state;
mod tracker;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use quill_core::{Config, MemoryJobStore, Secrets};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::{Result, ServiceError};
pub use routes::{GenerateRequest, GenerateResponse, AUTH_TOKEN_HEADER};
pub use runner::PublishRunner;
pub use state::AppState;
pub use tracker::{GenerateJob, JobRunner, JobTracker};

/// Create the service router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/generate", post(routes::generate))
        .route("/status/:job_id", get(routes::job_status))
        .route("/health", get(routes::health_check))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Run the service until the listener fails
pub async fn serve(config: &Config, secrets: &Secrets) -> Result<()> {
    let runner = PublishRunner::from_config(config, secrets)?;
    info!(runner = ?runner, "Publish runner ready");

    let tracker = JobTracker::new(Arc::new(MemoryJobStore::new()), Arc::new(runner));
    let app = create_router(AppState::new(tracker));

    let address = format!("{}:{}", config.service.bind_address, config.service.port);
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| ServiceError::Bind {
            address: address.clone(),
            source,
        })?;

    info!(address = %address, site = %config.site.base_url, "Quill service listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| ServiceError::Server(e.to_string()))?;

    info!("Quill service stopped");
    Ok(())
}

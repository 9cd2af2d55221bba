//! prd-review library interface
//!
//! Exposes the router and application state for the binary and for
//! integration tests.

pub mod api;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use prd_common::events::EventBus;

use crate::config::ServiceConfig;
use crate::services::{
    AnalysisRunner, CatalogProvider, DocumentRegistry, FixtureCatalog, ProgressSource,
    SessionRegistry, SimulatedProgressStore, UploadStore,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    /// Event bus for SSE broadcasting
    pub event_bus: EventBus,
    pub documents: DocumentRegistry,
    pub uploads: UploadStore,
    /// Upload progress source (mutate-on-read simulation by default)
    pub progress: Arc<dyn ProgressSource>,
    /// Mock data providers
    pub catalog: Arc<dyn CatalogProvider>,
    pub sessions: SessionRegistry,
    pub runner: AnalysisRunner,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last error for diagnostic purposes
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    /// State backed by the fixture catalog and the simulated progress store
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_providers(
            config,
            Arc::new(SimulatedProgressStore::new()),
            Arc::new(FixtureCatalog),
        )
    }

    pub fn with_providers(
        config: ServiceConfig,
        progress: Arc<dyn ProgressSource>,
        catalog: Arc<dyn CatalogProvider>,
    ) -> Self {
        let event_bus = EventBus::new(config.event_capacity);
        let documents = DocumentRegistry::new(fixtures::documents());
        let sessions = SessionRegistry::new();
        let runner = AnalysisRunner::new(
            sessions.clone(),
            documents.clone(),
            event_bus.clone(),
            config.tick_interval,
        );

        Self {
            uploads: UploadStore::new(config.uploads_dir.clone()),
            config: Arc::new(config),
            event_bus,
            documents,
            progress,
            catalog,
            sessions,
            runner,
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Remember an error for `/health`
    pub async fn record_error(&self, message: String) {
        *self.last_error.write().await = Some(message);
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let routes = Router::new()
        .merge(api::document_routes())
        .merge(api::catalog_routes())
        .merge(api::session_routes())
        .merge(api::analysis_routes())
        .merge(api::review_routes())
        .merge(api::report_routes());

    let routes = if state.config.api_base.is_empty() {
        routes
    } else {
        Router::new().nest(&state.config.api_base, routes)
    };

    Router::new()
        .merge(routes)
        .merge(api::health_routes())
        .route("/events", get(api::event_stream))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

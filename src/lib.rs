pub mod config;
pub mod database;
pub mod store;
pub mod models;
pub mod queries;
pub mod filters;
pub mod forms;
pub mod flash;
pub mod error;
pub mod views;
pub mod controllers;
pub mod middleware;

use axum::Router;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::store::Store;

// Shared state handed to every handler
pub struct AppState<S> {
    pub store: S,
    pub config: config::Config,
}

impl AppState<database::Database> {
    /// Connects to Postgres and applies pending migrations.
    pub async fn connect(config: config::Config) -> anyhow::Result<Arc<Self>> {
        let db = database::Database::new(&config.database.url, config.database.pool_size).await?;
        tracing::info!("Database connected");

        db.run_migrations().await?;

        Ok(Arc::new(Self { store: db, config }))
    }
}

impl<S: Store> AppState<S> {
    pub fn new(store: S, config: config::Config) -> Arc<Self> {
        Arc::new(Self { store, config })
    }
}

/// The complete application router for any store.
pub fn app<S: Store>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        .merge(controllers::routes())
        .fallback(controllers::pages::not_found)
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::flash_layer))
        .layer(CatchPanicLayer::custom(controllers::pages::panic_response))
        .layer(TraceLayer::new_for_http())
}

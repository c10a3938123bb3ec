use std::sync::Arc;

use crate::config::AppConfig;

/// The shared application state.
///
/// Cloneable and thread-safe; handed to every handler through Axum's
/// `State` extraction. Nothing here outlives a request except the pool.
#[derive(Clone)]
pub struct AppState {
    /// The SQLite connection pool.
    pub db: sqlx::SqlitePool,
    /// The application configuration.
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: sqlx::SqlitePool, config: AppConfig) -> Self {
        Self { db, config: Arc::new(config) }
    }
}

use std::sync::Arc;

use crate::config::AppConfig;

/// The shared application state.
///
/// Cloneable for Axum's request extraction. The pool is the only shared
/// mutable resource; each handler runs independently against it.
#[derive(Clone)]
pub struct AppState {
    /// The database connection pool.
    pub db: sqlx::SqlitePool,
    /// The application configuration.
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: sqlx::SqlitePool, config: AppConfig) -> Self {
        Self { db, config: Arc::new(config) }
    }

    /// Uploads directory as a path, relative to the working directory.
    pub fn uploads_dir(&self) -> std::path::PathBuf {
        std::path::PathBuf::from(&self.config.uploads.dir)
    }
}

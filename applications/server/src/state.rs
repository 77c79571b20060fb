/// Shared application state
use crate::services::AuthService;
use planzen_storage::Database;
use std::path::PathBuf;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub auth_service: Arc<AuthService>,
    /// Built web app served for the page routes
    pub web_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(db: Arc<Database>, auth_service: Arc<AuthService>, web_dir: PathBuf) -> Self {
        Self {
            db,
            auth_service,
            web_dir: Arc::new(web_dir),
        }
    }
}

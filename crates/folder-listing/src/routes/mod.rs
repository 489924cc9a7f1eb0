//! Routes module - HTTP API endpoints

pub mod folders;

use axum::Router;
use std::sync::Arc;

use crate::services::FolderContentsService;

pub use crate::AuthenticatedUserId;

/// Shared state of the listing routes
#[derive(Clone)]
pub struct AppState {
    pub service: FolderContentsService,
    /// Public absolute base for paging links, e.g. `https://repo.example.org`
    pub base_url: String,
}

/// Configure all listing routes
pub fn configure(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(folders::folder_routes())
        .with_state(state)
}

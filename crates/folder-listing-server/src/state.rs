//! Application state

use anyhow::Result;
use folder_listing::routes::AppState as ListingState;
use folder_listing::security::FolderAcl;
use folder_listing::services::{
    FolderContentsService, FolderStore, MemoryFolderStore, MongoFolderStore,
};
use folder_listing::MongoDb;
use std::path::Path;
use std::sync::Arc;

use crate::config::{Config, DatabaseType};

/// Store backend selected at start-up
#[derive(Clone)]
pub enum DatabaseBackend {
    MongoDB(Arc<MongoDb>),
    Memory(Arc<MemoryFolderStore>),
}

impl DatabaseBackend {
    pub async fn connect(config: &Config) -> Result<Self> {
        match config.database_type {
            DatabaseType::MongoDB => {
                tracing::info!("Connecting to MongoDB: {}", config.database_url);
                let db = MongoDb::connect(&config.database_url, &config.database_name).await?;
                Ok(DatabaseBackend::MongoDB(Arc::new(db)))
            }
            DatabaseType::Memory => {
                let store = match &config.seed_file {
                    Some(path) => MemoryFolderStore::from_json_file(Path::new(path))?,
                    None => MemoryFolderStore::new(),
                };
                tracing::info!("Using in-memory store with {} folders", store.folder_count());
                Ok(DatabaseBackend::Memory(Arc::new(store)))
            }
        }
    }

    pub fn database_type(&self) -> DatabaseType {
        match self {
            DatabaseBackend::MongoDB(_) => DatabaseType::MongoDB,
            DatabaseBackend::Memory(_) => DatabaseType::Memory,
        }
    }

    pub fn folder_store(&self) -> Arc<dyn FolderStore> {
        match self {
            DatabaseBackend::MongoDB(db) => Arc::new(MongoFolderStore::new(db.as_ref().clone())),
            DatabaseBackend::Memory(store) => store.clone(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Store backend (MongoDB or memory)
    pub db: DatabaseBackend,

    /// Server configuration
    pub config: Config,

    /// State of the library listing routes
    pub listing: Arc<ListingState>,
}

impl AppState {
    pub fn new(config: Config, db: DatabaseBackend) -> Self {
        let service = FolderContentsService::new(
            db.folder_store(),
            Arc::new(FolderAcl),
            Arc::new(config.listing.clone()),
        );
        let listing = Arc::new(ListingState {
            service,
            base_url: config.public_base_url(),
        });
        Self {
            db,
            config,
            listing,
        }
    }

    /// User owning an API key
    pub fn user_for_api_key(&self, key: &str) -> Option<&str> {
        self.config.api_keys.get(key).map(String::as_str)
    }
}

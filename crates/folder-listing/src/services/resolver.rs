//! Folder resolution
//!
//! A listing addresses its folder either by canonical path or by id. Both
//! resolvers produce the folder and its ancestor chain, root first, the folder
//! itself last.

use async_trait::async_trait;

use super::path::PathNormalizer;
use super::store::FolderStore;
use crate::config::ListingConfig;
use crate::error::{ListingError, ListingResult};
use crate::models::{AncestorChain, FolderNode};

#[async_trait]
pub trait FolderResolver: Send + Sync {
    /// The address as given, for messages
    fn address(&self) -> &str;

    async fn resolve_folder(&self, store: &dyn FolderStore) -> ListingResult<FolderNode>;

    async fn resolve_ancestors(
        &self,
        store: &dyn FolderStore,
        folder: &FolderNode,
    ) -> ListingResult<AncestorChain>;
}

/// Resolves a folder by canonical path
#[derive(Debug, Clone)]
pub struct PathResolver {
    path: String,
}

impl PathResolver {
    /// Rejects paths that are not already canonical
    pub fn new(raw: &str) -> ListingResult<Self> {
        Ok(Self {
            path: PathNormalizer::validate(raw)?,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait]
impl FolderResolver for PathResolver {
    fn address(&self) -> &str {
        &self.path
    }

    async fn resolve_folder(&self, store: &dyn FolderStore) -> ListingResult<FolderNode> {
        store
            .find_folder_by_path(&self.path)
            .await
            .map_err(|e| ListingError::store(format!("resolving folder {}", self.path), e))?
            .ok_or_else(|| ListingError::FolderNotFound(self.path.clone()))
    }

    async fn resolve_ancestors(
        &self,
        store: &dyn FolderStore,
        folder: &FolderNode,
    ) -> ListingResult<AncestorChain> {
        store
            .folder_path_by_path(&folder.path)
            .await
            .map_err(|e| ListingError::store(format!("reading path of {}", folder.path), e))
    }
}

/// Resolves a folder by identifier
#[derive(Debug, Clone)]
pub struct IdResolver {
    id: String,
    root_name: String,
    max_depth: usize,
}

impl IdResolver {
    pub fn new(raw: &str, config: &ListingConfig) -> ListingResult<Self> {
        let id = raw.trim();
        if id.is_empty() {
            return Err(ListingError::InvalidFolderId);
        }
        Ok(Self {
            id: id.to_string(),
            root_name: config.root_path.clone(),
            max_depth: config.max_folder_depth,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

#[async_trait]
impl FolderResolver for IdResolver {
    fn address(&self) -> &str {
        &self.id
    }

    async fn resolve_folder(&self, store: &dyn FolderStore) -> ListingResult<FolderNode> {
        store
            .find_folder_by_id(&self.id)
            .await
            .map_err(|e| ListingError::store(format!("resolving folder {}", self.id), e))?
            .ok_or_else(|| ListingError::FolderNotFound(self.id.clone()))
    }

    async fn resolve_ancestors(
        &self,
        store: &dyn FolderStore,
        folder: &FolderNode,
    ) -> ListingResult<AncestorChain> {
        // The store walk yields nothing for zero edges
        if folder.is_root(&self.root_name) {
            return Ok(vec![folder.clone()]);
        }
        store
            .folder_path_by_id(&folder.id, self.max_depth)
            .await
            .map_err(|e| ListingError::store(format!("reading path of folder {}", folder.id), e))
    }
}

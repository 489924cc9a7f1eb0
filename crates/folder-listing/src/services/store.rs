//! Backing store contract
//!
//! The store owns the tree and executes the queries; the listing core only
//! reads through this trait. Implementations report failures as
//! `anyhow::Error`, which the core maps to `StoreFailure`.

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{ContentFilter, FolderNode, QuerySpec, ResourceExtract};

#[async_trait]
pub trait FolderStore: Send + Sync {
    /// Folder whose canonical path equals `path`
    async fn find_folder_by_path(&self, path: &str) -> Result<Option<FolderNode>>;

    /// Folder with identifier `id`; identifiers the store cannot parse are
    /// simply not found
    async fn find_folder_by_id(&self, id: &str) -> Result<Option<FolderNode>>;

    /// Folders from the root down to the folder at `path`, inclusive
    async fn folder_path_by_path(&self, path: &str) -> Result<Vec<FolderNode>>;

    /// Folders along the parent edges from the root down to folder `id`.
    ///
    /// Like a shortest-path query, a walk of zero edges yields no folders at
    /// all, so the root asked for its own path returns an empty list.
    async fn folder_path_by_id(&self, id: &str, max_depth: usize) -> Result<Vec<FolderNode>>;

    /// Window `[offset, offset + limit)` of the matching children of
    /// `folder_id`, in `query.sort` order with id as the final tie-break
    async fn find_children(&self, folder_id: &str, query: &QuerySpec)
        -> Result<Vec<ResourceExtract>>;

    /// Number of children of `folder_id` matching `filter`, before paging
    async fn count_children(&self, folder_id: &str, filter: &ContentFilter) -> Result<u64>;

    /// Check the store is reachable
    async fn ping(&self) -> Result<()>;
}

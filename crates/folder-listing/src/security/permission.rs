//! Permission checking utilities

use async_trait::async_trait;

use crate::error::ListingResult;
use crate::models::FolderNode;

/// Reader entry granting read access to every caller
pub const EVERYBODY: &str = "*";

/// Decides whether a caller may read a folder
#[async_trait]
pub trait ReadAccess: Send + Sync {
    async fn can_read(&self, user_id: &str, folder: &FolderNode) -> ListingResult<bool>;
}

/// Access from the folder's own ownership and reader list
#[derive(Debug, Clone, Copy, Default)]
pub struct FolderAcl;

impl FolderAcl {
    pub fn allows(user_id: &str, folder: &FolderNode) -> bool {
        folder.owned_by == user_id
            || folder
                .readers
                .iter()
                .any(|r| r == EVERYBODY || r == user_id)
    }
}

#[async_trait]
impl ReadAccess for FolderAcl {
    async fn can_read(&self, user_id: &str, folder: &FolderNode) -> ListingResult<bool> {
        Ok(Self::allows(user_id, folder))
    }
}

//! Folder content listing

use super::assembler::ListingResponseAssembler;
use super::store::FolderStore;
use crate::error::{ListingError, ListingResult};
use crate::models::{FolderNode, QuerySpec, ResourceExtract};

/// Lists one page of a folder's children plus the unpaged match count
pub struct ContentLister<'a> {
    store: &'a dyn FolderStore,
}

impl<'a> ContentLister<'a> {
    pub fn new(store: &'a dyn FolderStore) -> Self {
        Self { store }
    }

    /// Children in `query.sort` order, at most `limit` of them starting at
    /// `offset`, with the total before paging. An offset at or past the
    /// total yields an empty page.
    pub async fn list(
        &self,
        folder: &FolderNode,
        query: &QuerySpec,
    ) -> ListingResult<(Vec<ResourceExtract>, u64)> {
        let total = self
            .store
            .count_children(&folder.id, &query.filter)
            .await
            .map_err(|e| ListingError::store(failure_context("counting", folder, query), e))?;

        if query.offset() >= total {
            return Ok((Vec::new(), total));
        }

        let mut resources = self
            .store
            .find_children(&folder.id, query)
            .await
            .map_err(|e| ListingError::store(failure_context("listing", folder, query), e))?;
        resources.truncate(query.limit() as usize);

        Ok((resources, total))
    }
}

fn failure_context(action: &str, folder: &FolderNode, query: &QuerySpec) -> String {
    format!(
        "{} contents of folder {} ({}) with {:?}",
        action,
        folder.id,
        folder.path,
        ListingResponseAssembler::echo(query)
    )
}

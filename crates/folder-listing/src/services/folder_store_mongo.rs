//! Folder store for MongoDB

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::options::FindOptions;

use super::path::PathNormalizer;
use super::store::FolderStore;
use crate::db::{collections, MongoDb};
use crate::models::mongo::NodeDocument;
use crate::models::{
    ContentFilter, FolderNode, QuerySpec, ResourceExtract, ResourceType, SortDirection, SortKey,
    SortSpec, VersionFilter,
};

pub struct MongoFolderStore {
    db: MongoDb,
}

impl MongoFolderStore {
    pub fn new(db: MongoDb) -> Self {
        Self { db }
    }

    fn nodes(&self) -> mongodb::Collection<NodeDocument> {
        self.db.collection::<NodeDocument>(collections::NODES)
    }

    async fn find_live_folder(&self, filter: Document) -> Result<Option<FolderNode>> {
        let mut filter = filter;
        filter.insert("node_type", ResourceType::Folder.as_str());
        filter.insert("is_deleted", doc! { "$ne": true });
        Ok(self
            .nodes()
            .find_one(filter, None)
            .await?
            .and_then(NodeDocument::into_folder))
    }
}

fn sort_field(key: SortKey) -> &'static str {
    match key {
        SortKey::Name => "name",
        SortKey::CreatedOn => "created_at",
        SortKey::LastUpdatedOn => "updated_at",
    }
}

/// Sort document for a spec; a repeated key only counts once, `_id` breaks ties
fn sort_document(sort: &SortSpec) -> Document {
    let mut document = Document::new();
    for order in sort.orders() {
        let field = sort_field(order.key);
        if document.contains_key(field) {
            continue;
        }
        let direction = match order.direction {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        };
        document.insert(field, direction);
    }
    document.insert("_id", 1);
    document
}

/// Children of `parent` matching `filter`; unversioned nodes pass the
/// version and status clauses
fn children_filter(parent: ObjectId, filter: &ContentFilter) -> Document {
    let types: Vec<Bson> = filter
        .resource_types
        .iter()
        .map(|t| Bson::String(t.as_str().to_string()))
        .collect();

    let mut clauses = vec![
        doc! { "parent_id": parent },
        doc! { "node_type": { "$in": types } },
        doc! { "is_deleted": { "$ne": true } },
    ];

    match filter.version {
        VersionFilter::All => {}
        VersionFilter::Latest => clauses.push(doc! {
            "$or": [ { "version": Bson::Null }, { "latest_version": true } ]
        }),
        VersionFilter::LatestByStatus => clauses.push(doc! {
            "$or": [
                { "version": Bson::Null },
                { "latest_draft_version": true },
                { "latest_published_version": true },
            ]
        }),
    }

    if let Some(status) = filter.publication_status.status() {
        clauses.push(doc! {
            "$or": [
                { "publication_status": Bson::Null },
                { "publication_status": status.as_str() },
            ]
        });
    }

    doc! { "$and": clauses }
}

/// A soft-deleted or absent ancestor breaks the chain, as it does for the
/// parent walk by id
fn check_ancestor_chain(path: &str, ancestors: &[String], folders: &[FolderNode]) -> Result<()> {
    if let Some(gap) = ancestors
        .iter()
        .find(|p| !folders.iter().any(|f| &f.path == *p))
    {
        bail!("Folder {} is missing ancestor {}", path, gap);
    }
    Ok(())
}

#[async_trait]
impl FolderStore for MongoFolderStore {
    async fn find_folder_by_path(&self, path: &str) -> Result<Option<FolderNode>> {
        self.find_live_folder(doc! { "path": path }).await
    }

    async fn find_folder_by_id(&self, id: &str) -> Result<Option<FolderNode>> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        self.find_live_folder(doc! { "_id": oid }).await
    }

    async fn folder_path_by_path(&self, path: &str) -> Result<Vec<FolderNode>> {
        let ancestors = PathNormalizer::ancestor_paths(path);
        let cursor = self
            .nodes()
            .find(
                doc! {
                    "path": { "$in": ancestors.clone() },
                    "node_type": ResourceType::Folder.as_str(),
                    "is_deleted": { "$ne": true },
                },
                None,
            )
            .await?;
        let docs: Vec<NodeDocument> = cursor.try_collect().await?;

        let mut folders: Vec<FolderNode> =
            docs.into_iter().filter_map(NodeDocument::into_folder).collect();
        folders.sort_by_key(|f| f.path.len());
        if folders.last().is_some_and(|f| f.path == path) {
            check_ancestor_chain(path, &ancestors, &folders)?;
        } else {
            folders.clear();
        }
        Ok(folders)
    }

    async fn folder_path_by_id(&self, id: &str, max_depth: usize) -> Result<Vec<FolderNode>> {
        let Some(start) = self.find_folder_by_id(id).await? else {
            return Ok(Vec::new());
        };

        let mut walked = vec![start];
        while let Some(parent_id) = walked.last().and_then(|f| f.parent_id.clone()) {
            if walked.len() > max_depth {
                bail!("Ancestor walk from folder {} exceeded {} levels", id, max_depth);
            }
            let parent = self
                .find_folder_by_id(&parent_id)
                .await?
                .ok_or_else(|| anyhow!("Folder {} references missing parent {}", id, parent_id))?;
            walked.push(parent);
        }

        // zero edges walked
        if walked.len() == 1 {
            return Ok(Vec::new());
        }
        walked.reverse();
        Ok(walked)
    }

    async fn find_children(
        &self,
        folder_id: &str,
        query: &QuerySpec,
    ) -> Result<Vec<ResourceExtract>> {
        let parent = ObjectId::parse_str(folder_id)?;
        let options = FindOptions::builder()
            .projection(NodeDocument::extract_projection())
            .sort(sort_document(&query.sort))
            .skip(query.offset())
            .limit(i64::from(query.limit()))
            .build();

        let cursor = self
            .nodes()
            .find(children_filter(parent, &query.filter), options)
            .await?;
        let docs: Vec<NodeDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(ResourceExtract::from).collect())
    }

    async fn count_children(&self, folder_id: &str, filter: &ContentFilter) -> Result<u64> {
        let parent = ObjectId::parse_str(folder_id)?;
        Ok(self
            .nodes()
            .count_documents(children_filter(parent, filter), None)
            .await?)
    }

    async fn ping(&self) -> Result<()> {
        self.db.ping().await
    }
}

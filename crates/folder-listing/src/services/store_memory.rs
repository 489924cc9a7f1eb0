//! In-memory folder store
//!
//! Built once, then shared read-only. Serves local development (seeded from a
//! JSON file) and tests. Soft-deleted nodes are simply never inserted.

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use super::path::PathNormalizer;
use super::store::FolderStore;
use crate::models::{ContentFilter, FolderNode, QuerySpec, ResourceExtract};

/// Seed document: folders plus the non-folder resources they contain
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorySeed {
    #[serde(default)]
    pub folders: Vec<FolderNode>,
    #[serde(default)]
    pub resources: Vec<SeedResource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedResource {
    pub parent_id: String,
    #[serde(flatten)]
    pub extract: ResourceExtract,
}

#[derive(Debug, Default, Clone)]
pub struct MemoryFolderStore {
    folders: HashMap<String, FolderNode>,
    /// canonical path -> folder id
    paths: HashMap<String, String>,
    /// folder id -> children, folders included
    children: HashMap<String, Vec<ResourceExtract>>,
}

impl MemoryFolderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: MemorySeed) -> Self {
        let mut store = Self::new();
        for folder in seed.folders {
            store.insert_folder(folder);
        }
        for resource in seed.resources {
            store.insert_resource(&resource.parent_id, resource.extract);
        }
        store
    }

    /// Load a JSON seed file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file: {}", path.display()))?;
        let seed: MemorySeed =
            serde_json::from_str(&content).with_context(|| "Failed to parse seed file")?;
        Ok(Self::from_seed(seed))
    }

    /// Add a folder; it is also listed as a child of its parent
    pub fn insert_folder(&mut self, folder: FolderNode) {
        if let Some(parent_id) = &folder.parent_id {
            self.children
                .entry(parent_id.clone())
                .or_default()
                .push(ResourceExtract::from(&folder));
        }
        self.paths.insert(folder.path.clone(), folder.id.clone());
        self.folders.insert(folder.id.clone(), folder);
    }

    /// Add a non-folder child of `parent_id`
    pub fn insert_resource(&mut self, parent_id: &str, extract: ResourceExtract) {
        self.children
            .entry(parent_id.to_string())
            .or_default()
            .push(extract);
    }

    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }

    fn matching_children<'a>(
        &'a self,
        folder_id: &str,
        filter: &'a ContentFilter,
    ) -> impl Iterator<Item = &'a ResourceExtract> + 'a {
        self.children
            .get(folder_id)
            .into_iter()
            .flatten()
            .filter(move |child| filter.matches(child))
    }
}

#[async_trait]
impl FolderStore for MemoryFolderStore {
    async fn find_folder_by_path(&self, path: &str) -> Result<Option<FolderNode>> {
        Ok(self
            .paths
            .get(path)
            .and_then(|id| self.folders.get(id))
            .cloned())
    }

    async fn find_folder_by_id(&self, id: &str) -> Result<Option<FolderNode>> {
        Ok(self.folders.get(id).cloned())
    }

    async fn folder_path_by_path(&self, path: &str) -> Result<Vec<FolderNode>> {
        if !self.paths.contains_key(path) {
            return Ok(Vec::new());
        }
        PathNormalizer::ancestor_paths(path)
            .iter()
            .map(|p| {
                self.paths
                    .get(p)
                    .and_then(|id| self.folders.get(id))
                    .cloned()
                    .ok_or_else(|| anyhow!("Folder {} is missing ancestor {}", path, p))
            })
            .collect()
    }

    async fn folder_path_by_id(&self, id: &str, max_depth: usize) -> Result<Vec<FolderNode>> {
        let Some(start) = self.folders.get(id) else {
            return Ok(Vec::new());
        };

        let mut walked = vec![start.clone()];
        let mut current = start;
        while let Some(parent_id) = &current.parent_id {
            if walked.len() > max_depth {
                bail!("Ancestor walk from folder {} exceeded {} levels", id, max_depth);
            }
            let parent = self.folders.get(parent_id).ok_or_else(|| {
                anyhow!(
                    "Folder {} references missing parent {}",
                    current.id,
                    parent_id
                )
            })?;
            walked.push(parent.clone());
            current = parent;
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
        let mut matching: Vec<&ResourceExtract> =
            self.matching_children(folder_id, &query.filter).collect();
        matching.sort_by(|a, b| query.sort.compare(a, b));

        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        Ok(matching
            .into_iter()
            .skip(offset)
            .take(query.limit() as usize)
            .cloned()
            .collect())
    }

    async fn count_children(&self, folder_id: &str, filter: &ContentFilter) -> Result<u64> {
        Ok(self.matching_children(folder_id, filter).count() as u64)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ListingConfig;
    use crate::models::{ListingParams, ResourceType};
    use crate::services::fixtures;
    use crate::services::QuerySpecValidator;
    use std::io::Write;

    fn query(types: &str, sort: Option<&str>, limit: &str, offset: &str) -> QuerySpec {
        let config = ListingConfig::default();
        QuerySpecValidator::new(&config)
            .parse(&ListingParams {
                resource_types: Some(types.to_string()),
                sort: sort.map(str::to_string),
                limit: Some(limit.to_string()),
                offset: Some(offset.to_string()),
                ..Default::default()
            })
            .unwrap()
    }

    #[tokio::test]
    async fn test_children_are_filtered_sorted_and_windowed() {
        let store = fixtures::sample_store();
        let page = store
            .find_children(
                fixtures::PROJECTS_ID,
                &query("template", Some("-createdOn"), "3", "1"),
            )
            .await
            .unwrap();
        assert_eq!(page.len(), 3);
        assert!(page.iter().all(|c| c.resource_type == ResourceType::Template));
        assert!(page
            .windows(2)
            .all(|w| w[0].created_on >= w[1].created_on));
    }

    #[tokio::test]
    async fn test_count_ignores_paging() {
        let store = fixtures::sample_store();
        let q = query("template,instance", None, "2", "0");
        let total = store
            .count_children(fixtures::PROJECTS_ID, &q.filter)
            .await
            .unwrap();
        assert_eq!(total, fixtures::PROJECT_TEMPLATES + fixtures::PROJECT_INSTANCES);
    }

    #[tokio::test]
    async fn test_folder_path_by_id_is_empty_for_root() {
        let store = fixtures::sample_store();
        let chain = store.folder_path_by_id(fixtures::ROOT_ID, 64).await.unwrap();
        assert!(chain.is_empty());

        let chain = store.folder_path_by_id(fixtures::ALPHA_ID, 64).await.unwrap();
        let paths: Vec<&str> = chain.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["/", "/Shared", "/Shared/Projects", "/Shared/Projects/Alpha"]);
    }

    #[tokio::test]
    async fn test_orphaned_folder_fails_both_walks() {
        let mut store = fixtures::sample_store();
        store.insert_folder(fixtures::folder(
            "orphan",
            "Orphan",
            "/Gone/Orphan",
            Some("gone"),
            &["*"],
        ));

        let err = store.folder_path_by_path("/Gone/Orphan").await.unwrap_err();
        assert!(err.to_string().contains("missing ancestor /Gone"));
        let err = store.folder_path_by_id("orphan", 64).await.unwrap_err();
        assert!(err.to_string().contains("missing parent gone"));

        assert!(store.folder_path_by_path("/Nowhere").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_folder_path_by_id_respects_depth_bound() {
        let store = fixtures::sample_store();
        assert!(store.folder_path_by_id(fixtures::ALPHA_ID, 2).await.is_err());
    }

    #[test]
    fn test_seed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "folders": [
                    {{"id": "r", "name": "/", "path": "/", "ownedBy": "admin", "readers": ["*"],
                     "createdOn": "2024-01-01T00:00:00Z", "lastUpdatedOn": "2024-01-01T00:00:00Z"}},
                    {{"id": "d", "name": "Docs", "path": "/Docs", "parentId": "r", "ownedBy": "admin",
                     "createdOn": "2024-01-02T00:00:00Z", "lastUpdatedOn": "2024-01-02T00:00:00Z"}}
                ],
                "resources": [
                    {{"parentId": "d", "id": "t1", "name": "Intake", "resourceType": "template",
                     "ownedBy": "admin", "version": "0.0.1", "publicationStatus": "draft",
                     "latestVersion": true,
                     "createdOn": "2024-01-03T00:00:00Z", "lastUpdatedOn": "2024-01-03T00:00:00Z"}}
                ]
            }}"#
        )
        .unwrap();

        let store = MemoryFolderStore::from_json_file(file.path()).unwrap();
        assert_eq!(store.folder_count(), 2);
        assert_eq!(store.children.get("r").map(Vec::len), Some(1));
        assert_eq!(store.children.get("d").map(Vec::len), Some(1));
        assert!(MemoryFolderStore::from_json_file(Path::new("/nonexistent/seed.json")).is_err());
    }
}

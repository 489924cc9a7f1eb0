//! Folder contents service
//!
//! Runs one listing from raw request parameters to the response envelope.
//! Both entry points share the order: validate the address and the query
//! (no store call yet), resolve the folder, check read access, read the
//! ancestor chain, list and count, build paging links, assemble.

use std::sync::Arc;
use url::Url;

use super::assembler::ListingResponseAssembler;
use super::content::ContentLister;
use super::paging::PagingLinkBuilder;
use super::query_spec::QuerySpecValidator;
use super::resolver::{FolderResolver, IdResolver, PathResolver};
use super::store::FolderStore;
use crate::config::ListingConfig;
use crate::error::{ListingError, ListingResult};
use crate::models::{ListingParams, ListingResponse, QuerySpec};
use crate::security::ReadAccess;

#[derive(Clone)]
pub struct FolderContentsService {
    store: Arc<dyn FolderStore>,
    access: Arc<dyn ReadAccess>,
    config: Arc<ListingConfig>,
}

impl FolderContentsService {
    pub fn new(
        store: Arc<dyn FolderStore>,
        access: Arc<dyn ReadAccess>,
        config: Arc<ListingConfig>,
    ) -> Self {
        Self {
            store,
            access,
            config,
        }
    }

    pub fn config(&self) -> &ListingConfig {
        &self.config
    }

    /// Check the backing store is reachable
    pub async fn ping(&self) -> ListingResult<()> {
        self.store
            .ping()
            .await
            .map_err(|e| ListingError::store("pinging store", e))
    }

    /// List a folder addressed by canonical path. Version and publication
    /// status filters do not apply to this entry point.
    pub async fn list_by_path(
        &self,
        user_id: &str,
        raw_path: Option<&str>,
        params: &ListingParams,
        request_url: &Url,
    ) -> ListingResult<ListingResponse> {
        let resolver = PathResolver::new(raw_path.unwrap_or_default())?;
        let query = QuerySpecValidator::new(&self.config).parse(&ListingParams {
            version: None,
            publication_status: None,
            ..params.clone()
        })?;

        let mut canonical = vec![("path", resolver.path().to_string())];
        canonical.extend(canonical_query(&query, false));
        let template = paging_template(request_url, canonical);

        self.list(user_id, &resolver, &query, &template).await
    }

    /// List a folder addressed by identifier
    pub async fn list_by_id(
        &self,
        user_id: &str,
        raw_id: &str,
        params: &ListingParams,
        request_url: &Url,
    ) -> ListingResult<ListingResponse> {
        let resolver = IdResolver::new(raw_id, &self.config)?;
        let query = QuerySpecValidator::new(&self.config).parse(params)?;
        let template = paging_template(request_url, canonical_query(&query, true));

        self.list(user_id, &resolver, &query, &template).await
    }

    async fn list(
        &self,
        user_id: &str,
        resolver: &dyn FolderResolver,
        query: &QuerySpec,
        template: &Url,
    ) -> ListingResult<ListingResponse> {
        let store = self.store.as_ref();

        let folder = resolver.resolve_folder(store).await?;
        if !self.access.can_read(user_id, &folder).await? {
            tracing::warn!(
                "User {} denied read access to folder {}",
                user_id,
                resolver.address()
            );
            return Err(ListingError::AccessDenied(resolver.address().to_string()));
        }

        let path_info = resolver.resolve_ancestors(store, &folder).await?;
        let (resources, total) = ContentLister::new(store).list(&folder, query).await?;
        tracing::debug!(
            "Listed folder {} for {}: {} of {} at offset {}",
            folder.id,
            user_id,
            resources.len(),
            total,
            query.offset()
        );

        let paging = PagingLinkBuilder::build(template, total, query.limit(), query.offset());
        Ok(ListingResponseAssembler::assemble(
            query, total, resources, path_info, paging,
        ))
    }
}

/// Validated query as parameters, in a fixed order
fn canonical_query(query: &QuerySpec, with_version_filters: bool) -> Vec<(&'static str, String)> {
    let mut pairs = vec![("resource_types", query.resource_type_tokens().join(","))];
    if with_version_filters {
        pairs.push(("version", query.filter.version.as_str().to_string()));
        pairs.push((
            "publication_status",
            query.filter.publication_status.as_str().to_string(),
        ));
    }
    pairs.push(("sort", query.sort.tokens().join(",")));
    pairs
}

/// Request URL with its query replaced by the canonical parameters
fn paging_template(request_url: &Url, pairs: Vec<(&'static str, String)>) -> Url {
    let mut url = request_url.clone();
    url.set_fragment(None);
    url.set_query(None);
    url.query_pairs_mut().extend_pairs(pairs);
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentFilter, FolderNode, ResourceExtract};
    use crate::security::FolderAcl;
    use crate::services::fixtures;
    use async_trait::async_trait;

    fn service(store: impl FolderStore + 'static) -> FolderContentsService {
        FolderContentsService::new(
            Arc::new(store),
            Arc::new(FolderAcl),
            Arc::new(ListingConfig::default()),
        )
    }

    fn url(path: &str) -> Url {
        Url::parse("https://repo.example.org").unwrap().join(path).unwrap()
    }

    fn params(types: &str) -> ListingParams {
        ListingParams {
            resource_types: Some(types.to_string()),
            ..Default::default()
        }
    }

    /// Fails every call; proves validation never reaches the store
    struct BrokenStore;

    #[async_trait]
    impl FolderStore for BrokenStore {
        async fn find_folder_by_path(&self, _: &str) -> anyhow::Result<Option<FolderNode>> {
            anyhow::bail!("store down")
        }
        async fn find_folder_by_id(&self, _: &str) -> anyhow::Result<Option<FolderNode>> {
            anyhow::bail!("store down")
        }
        async fn folder_path_by_path(&self, _: &str) -> anyhow::Result<Vec<FolderNode>> {
            anyhow::bail!("store down")
        }
        async fn folder_path_by_id(&self, _: &str, _: usize) -> anyhow::Result<Vec<FolderNode>> {
            anyhow::bail!("store down")
        }
        async fn find_children(
            &self,
            _: &str,
            _: &QuerySpec,
        ) -> anyhow::Result<Vec<ResourceExtract>> {
            anyhow::bail!("store down")
        }
        async fn count_children(&self, _: &str, _: &ContentFilter) -> anyhow::Result<u64> {
            anyhow::bail!("store down")
        }
        async fn ping(&self) -> anyhow::Result<()> {
            anyhow::bail!("store down")
        }
    }

    #[tokio::test]
    async fn test_offset_past_total() {
        let svc = service(fixtures::bulk_store(10));
        let response = svc
            .list_by_id(
                fixtures::READER,
                fixtures::BULK_ID,
                &ListingParams {
                    limit: Some("10".to_string()),
                    offset: Some("20".to_string()),
                    ..params("template")
                },
                &url("/api/folders/bulk/contents"),
            )
            .await
            .unwrap();

        assert!(response.resources.is_empty());
        assert_eq!(response.total_count, 10);
        assert_eq!(response.current_offset, 20);
        assert!(response.paging.next.is_none());
        assert!(response.paging.last.as_deref().unwrap().ends_with("limit=10&offset=0"));
    }

    #[tokio::test]
    async fn test_denied_is_not_not_found() {
        let svc = service(fixtures::sample_store());
        let denied = svc
            .list_by_id(fixtures::READER, fixtures::ALPHA_ID, &params("field"), &url("/x"))
            .await
            .unwrap_err();
        assert!(matches!(denied, ListingError::AccessDenied(_)));

        let denied = svc
            .list_by_path(
                fixtures::READER,
                Some("/Shared/Projects/Alpha"),
                &params("field"),
                &url("/x"),
            )
            .await
            .unwrap_err();
        assert!(matches!(denied, ListingError::AccessDenied(_)));

        let missing = svc
            .list_by_id(fixtures::READER, "nope", &params("field"), &url("/x"))
            .await
            .unwrap_err();
        assert!(matches!(missing, ListingError::FolderNotFound(_)));

        let owner = svc
            .list_by_id(fixtures::OWNER, fixtures::ALPHA_ID, &params("field"), &url("/x"))
            .await
            .unwrap();
        assert_eq!(owner.total_count, 1);
    }

    #[tokio::test]
    async fn test_validation_precedes_store_calls() {
        let svc = service(BrokenStore);
        let err = svc
            .list_by_id(fixtures::READER, "abc", &params("nonsense"), &url("/x"))
            .await
            .unwrap_err();
        assert!(matches!(err, ListingError::UnknownResourceType { .. }));

        let err = svc
            .list_by_path(fixtures::READER, Some("/a/b/"), &params("folder"), &url("/x"))
            .await
            .unwrap_err();
        assert!(matches!(err, ListingError::InvalidPath { .. }));

        let err = svc
            .list_by_path(fixtures::READER, None, &params("folder"), &url("/x"))
            .await
            .unwrap_err();
        assert!(matches!(err, ListingError::InvalidPath { .. }));

        let err = svc
            .list_by_id(fixtures::READER, "abc", &params("folder"), &url("/x"))
            .await
            .unwrap_err();
        assert!(matches!(err, ListingError::StoreFailure { .. }));
        assert!(svc.ping().await.is_err());
    }

    #[tokio::test]
    async fn test_root_listing_by_path_and_id() {
        let svc = service(fixtures::sample_store());
        let by_path = svc
            .list_by_path(fixtures::READER, Some("/"), &params("folder"), &url("/api/folders/contents"))
            .await
            .unwrap();
        let by_id = svc
            .list_by_id(
                fixtures::READER,
                fixtures::ROOT_ID,
                &params("folder"),
                &url("/api/folders/root/contents"),
            )
            .await
            .unwrap();

        assert_eq!(by_path.path_info, by_id.path_info);
        assert_eq!(by_id.path_info.len(), 1);
        assert_eq!(by_path.resources, by_id.resources);
        assert_eq!(by_id.resources[0].id, fixtures::SHARED_ID);
    }

    #[tokio::test]
    async fn test_paging_links_use_canonical_query() {
        let svc = service(fixtures::bulk_store(137));
        let response = svc
            .list_by_path(
                fixtures::READER,
                Some("/Bulk"),
                &ListingParams {
                    sort: Some(" -createdOn ,name".to_string()),
                    limit: Some("50".to_string()),
                    offset: Some("50".to_string()),
                    version: Some("latest".to_string()),
                    ..params("template,")
                },
                &url("/api/folders/contents?path=/Bulk&junk=1#frag"),
            )
            .await
            .unwrap();

        let next = Url::parse(response.paging.next.as_deref().unwrap()).unwrap();
        let pairs: Vec<(String, String)> = next.query_pairs().into_owned().collect();
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["path", "resource_types", "sort", "limit", "offset"]);
        assert_eq!(pairs[2].1, "-createdOn,name");
        assert_eq!(pairs[4].1, "100");
        assert!(next.fragment().is_none());

        assert_eq!(response.request.version, "all");
        assert_eq!(response.resources.len(), 50);
        assert_eq!(response.resources[0].name, "Item 0086");
    }
}

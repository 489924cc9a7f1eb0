//! Listing response assembly

use crate::models::{
    AncestorChain, ListingRequestEcho, ListingResponse, PagingLinks, QuerySpec, ResourceExtract,
};

pub struct ListingResponseAssembler;

impl ListingResponseAssembler {
    /// Echo of the validated query, defaults filled in
    pub fn echo(query: &QuerySpec) -> ListingRequestEcho {
        ListingRequestEcho {
            resource_types: query.resource_type_tokens(),
            version: query.filter.version.as_str().to_string(),
            publication_status: query.filter.publication_status.as_str().to_string(),
            sort: query.sort.tokens(),
            limit: query.limit(),
            offset: query.offset(),
        }
    }

    pub fn assemble(
        query: &QuerySpec,
        total: u64,
        resources: Vec<ResourceExtract>,
        path_info: AncestorChain,
        paging: PagingLinks,
    ) -> ListingResponse {
        ListingResponse {
            request: Self::echo(query),
            total_count: total,
            current_offset: query.offset(),
            resources,
            path_info,
            paging,
        }
    }
}

//! Listing response envelope

use serde::Serialize;

use super::{AncestorChain, ResourceExtract};

/// Absolute URLs of the applicable paging relations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PagingLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
}

impl PagingLinks {
    /// Present relations in `first, prev, next, last` order
    pub fn relations(&self) -> Vec<(&'static str, &str)> {
        [
            ("first", &self.first),
            ("prev", &self.prev),
            ("next", &self.next),
            ("last", &self.last),
        ]
        .into_iter()
        .filter_map(|(rel, url)| url.as_deref().map(|u| (rel, u)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.relations().is_empty()
    }

    /// RFC 5988 `Link` header value, `None` when no relation applies
    pub fn to_link_header(&self) -> Option<String> {
        let parts: Vec<String> = self
            .relations()
            .into_iter()
            .map(|(rel, url)| format!("<{}>; rel=\"{}\"", url, rel))
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// The validated query, echoed back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRequestEcho {
    pub resource_types: Vec<String>,
    pub version: String,
    pub publication_status: String,
    pub sort: Vec<String>,
    pub limit: u32,
    pub offset: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    pub request: ListingRequestEcho,
    pub total_count: u64,
    pub current_offset: u64,
    pub resources: Vec<ResourceExtract>,
    pub path_info: AncestorChain,
    pub paging: PagingLinks,
}

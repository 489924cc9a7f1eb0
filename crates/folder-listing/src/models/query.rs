//! Validated listing query models

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::{PublicationStatus, ResourceExtract, ResourceType};

/// Prefix marking a descending sort key
pub const DESCENDING_MARKER: char = '-';

/// Raw listing parameters as they arrive on the query string.
///
/// Every field is optional here; defaults and bounds are applied by the
/// query spec validator, never by the transport.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingParams {
    /// Comma-separated resource type tags (mandatory once validated)
    pub resource_types: Option<String>,
    /// `all` | `latest` | `latest-by-status`
    pub version: Option<String>,
    /// `all` | `draft` | `published`
    pub publication_status: Option<String>,
    /// Comma-separated sort keys, `-` prefix for descending
    pub sort: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Sortable attribute of a child extract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "createdOn")]
    CreatedOn,
    #[serde(rename = "lastUpdatedOn")]
    LastUpdatedOn,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Name, SortKey::CreatedOn, SortKey::LastUpdatedOn];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::CreatedOn => "createdOn",
            SortKey::LastUpdatedOn => "lastUpdatedOn",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        SortKey::ALL.into_iter().find(|k| k.as_str() == raw)
    }

    fn compare(&self, a: &ResourceExtract, b: &ResourceExtract) -> Ordering {
        match self {
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::CreatedOn => a.created_on.cmp(&b.created_on),
            SortKey::LastUpdatedOn => a.last_updated_on.cmp(&b.last_updated_on),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// One `(key, direction)` pair of a sort spec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Descending,
        }
    }

    /// Wire token, e.g. `name` or `-createdOn`
    pub fn token(&self) -> String {
        match self.direction {
            SortDirection::Ascending => self.key.as_str().to_string(),
            SortDirection::Descending => format!("{}{}", DESCENDING_MARKER, self.key.as_str()),
        }
    }
}

/// Ordered sort pairs; the first pair is primary, later pairs break ties
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec(pub Vec<SortOrder>);

impl SortSpec {
    pub fn orders(&self) -> &[SortOrder] {
        &self.0
    }

    pub fn tokens(&self) -> Vec<String> {
        self.0.iter().map(SortOrder::token).collect()
    }

    /// Total order over extracts: the sort pairs in priority order, then id.
    pub fn compare(&self, a: &ResourceExtract, b: &ResourceExtract) -> Ordering {
        self.0
            .iter()
            .map(|order| {
                let ord = order.key.compare(a, b);
                match order.direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            })
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or_else(|| a.id.cmp(&b.id))
    }
}

/// Requested window of the matching set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    pub limit: u32,
    pub offset: u64,
}

/// Which versions of versioned resources to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionFilter {
    #[default]
    All,
    Latest,
    LatestByStatus,
}

impl VersionFilter {
    pub const ALL: [VersionFilter; 3] = [
        VersionFilter::All,
        VersionFilter::Latest,
        VersionFilter::LatestByStatus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VersionFilter::All => "all",
            VersionFilter::Latest => "latest",
            VersionFilter::LatestByStatus => "latest-by-status",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        VersionFilter::ALL.into_iter().find(|v| v.as_str() == raw)
    }

    fn matches(&self, extract: &ResourceExtract) -> bool {
        if extract.version.is_none() {
            return true;
        }
        match self {
            VersionFilter::All => true,
            VersionFilter::Latest => extract.latest_version,
            VersionFilter::LatestByStatus => {
                extract.latest_draft_version || extract.latest_published_version
            }
        }
    }
}

/// Which publication statuses of versioned resources to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublicationStatusFilter {
    #[default]
    All,
    Draft,
    Published,
}

impl PublicationStatusFilter {
    pub const ALL: [PublicationStatusFilter; 3] = [
        PublicationStatusFilter::All,
        PublicationStatusFilter::Draft,
        PublicationStatusFilter::Published,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PublicationStatusFilter::All => "all",
            PublicationStatusFilter::Draft => "draft",
            PublicationStatusFilter::Published => "published",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        PublicationStatusFilter::ALL
            .into_iter()
            .find(|p| p.as_str() == raw)
    }

    /// The status this filter selects, `None` for `all`
    pub fn status(&self) -> Option<PublicationStatus> {
        match self {
            PublicationStatusFilter::All => None,
            PublicationStatusFilter::Draft => Some(PublicationStatus::Draft),
            PublicationStatusFilter::Published => Some(PublicationStatus::Published),
        }
    }

    fn matches(&self, extract: &ResourceExtract) -> bool {
        match (self.status(), extract.publication_status) {
            (None, _) | (_, None) => true,
            (Some(wanted), Some(actual)) => wanted == actual,
        }
    }
}

/// Restriction on which children are listed and counted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFilter {
    /// Non-empty, in request order
    pub resource_types: Vec<ResourceType>,
    pub version: VersionFilter,
    pub publication_status: PublicationStatusFilter,
}

impl ContentFilter {
    pub fn matches(&self, extract: &ResourceExtract) -> bool {
        self.resource_types.contains(&extract.resource_type)
            && self.version.matches(extract)
            && self.publication_status.matches(extract)
    }
}

/// Fully validated listing query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub filter: ContentFilter,
    pub sort: SortSpec,
    pub page: PageSpec,
}

impl QuerySpec {
    pub fn limit(&self) -> u32 {
        self.page.limit
    }

    pub fn offset(&self) -> u64 {
        self.page.offset
    }

    pub fn resource_type_tokens(&self) -> Vec<String> {
        self.filter
            .resource_types
            .iter()
            .map(|t| t.as_str().to_string())
            .collect()
    }
}

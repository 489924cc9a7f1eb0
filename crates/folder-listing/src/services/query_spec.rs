//! Query spec validation
//!
//! Turns the raw, optional listing parameters into a [`QuerySpec`]. Every
//! field is checked before any store call is made; when several fields are
//! invalid the first one in `resource_types, version, publication_status,
//! sort, limit, offset` order is reported.

use crate::config::ListingConfig;
use crate::error::{ListingError, ListingResult};
use crate::models::{
    ContentFilter, ListingParams, PageSpec, PublicationStatusFilter, QuerySpec, ResourceType,
    SortKey, SortOrder, SortSpec, VersionFilter, DESCENDING_MARKER,
};

/// Validates listing parameters against the enabled types and sort keys
pub struct QuerySpecValidator<'a> {
    config: &'a ListingConfig,
}

impl<'a> QuerySpecValidator<'a> {
    pub fn new(config: &'a ListingConfig) -> Self {
        Self { config }
    }

    pub fn parse(&self, params: &ListingParams) -> ListingResult<QuerySpec> {
        let resource_types = self.parse_resource_types(params.resource_types.as_deref());
        let sort = self.parse_sort(params.sort.as_deref());
        let limit = self.parse_limit(params.limit.as_deref());
        let offset = self.parse_offset(params.offset.as_deref());
        let version = self.parse_version(params.version.as_deref());
        let publication_status = self.parse_publication_status(params.publication_status.as_deref());

        Ok(QuerySpec {
            filter: ContentFilter {
                resource_types: resource_types?,
                version: version?,
                publication_status: publication_status?,
            },
            sort: sort?,
            page: PageSpec {
                limit: limit?,
                offset: offset?,
            },
        })
    }

    /// Mandatory, comma separated, each token an enabled type tag
    pub fn parse_resource_types(&self, raw: Option<&str>) -> ListingResult<Vec<ResourceType>> {
        let tokens = split_tokens(raw.unwrap_or_default());
        if tokens.is_empty() {
            return Err(ListingError::MissingResourceTypes);
        }

        tokens
            .into_iter()
            .map(|token| {
                token
                    .parse::<ResourceType>()
                    .ok()
                    .filter(|t| self.config.resource_types.contains(t))
                    .ok_or_else(|| ListingError::UnknownResourceType {
                        token: token.to_string(),
                        allowed: self.config.allowed_resource_types(),
                    })
            })
            .collect()
    }

    /// Optional; blank or absent falls back to the configured default sort.
    /// Duplicate keys are kept as given.
    pub fn parse_sort(&self, raw: Option<&str>) -> ListingResult<SortSpec> {
        let source = match raw.map(str::trim) {
            Some(s) if !s.is_empty() => s,
            _ => self.config.default_sort.as_str(),
        };

        split_tokens(source)
            .into_iter()
            .map(|token| -> ListingResult<SortOrder> {
                let (bare, descending) = match token.strip_prefix(DESCENDING_MARKER) {
                    Some(bare) => (bare, true),
                    None => (token, false),
                };
                let key = SortKey::parse(bare)
                    .filter(|k| self.config.sort_keys.contains(k))
                    .ok_or_else(|| ListingError::UnknownSortKey {
                        token: token.to_string(),
                        allowed: self.config.allowed_sort_keys(),
                    })?;
                Ok(if descending {
                    SortOrder::descending(key)
                } else {
                    SortOrder::ascending(key)
                })
            })
            .collect::<ListingResult<Vec<_>>>()
            .map(SortSpec)
    }

    /// Optional; within `[1, max_limit]`
    pub fn parse_limit(&self, raw: Option<&str>) -> ListingResult<u32> {
        let Some(value) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(self.config.default_limit);
        };
        let out_of_range = || ListingError::LimitOutOfRange {
            value: value.to_string(),
            max: self.config.max_limit,
        };
        let limit = value.parse::<i64>().map_err(|_| out_of_range())?;
        if limit <= 0 || limit > i64::from(self.config.max_limit) {
            return Err(out_of_range());
        }
        u32::try_from(limit).map_err(|_| out_of_range())
    }

    /// Optional; zero or more
    pub fn parse_offset(&self, raw: Option<&str>) -> ListingResult<u64> {
        let Some(value) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(0);
        };
        value
            .parse::<i64>()
            .ok()
            .and_then(|offset| u64::try_from(offset).ok())
            .ok_or_else(|| ListingError::OffsetOutOfRange {
                value: value.to_string(),
            })
    }

    pub fn parse_version(&self, raw: Option<&str>) -> ListingResult<VersionFilter> {
        let Some(value) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(VersionFilter::default());
        };
        VersionFilter::parse(value).ok_or_else(|| ListingError::UnknownVersionFilter {
            token: value.to_string(),
            allowed: VersionFilter::ALL
                .iter()
                .map(|v| v.as_str().to_string())
                .collect(),
        })
    }

    pub fn parse_publication_status(
        &self,
        raw: Option<&str>,
    ) -> ListingResult<PublicationStatusFilter> {
        let Some(value) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(PublicationStatusFilter::default());
        };
        PublicationStatusFilter::parse(value).ok_or_else(|| {
            ListingError::UnknownPublicationStatus {
                token: value.to_string(),
                allowed: PublicationStatusFilter::ALL
                    .iter()
                    .map(|p| p.as_str().to_string())
                    .collect(),
            }
        })
    }
}

/// Comma separated tokens, trimmed, empty tokens dropped
fn split_tokens(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

//! Paging link construction

use url::Url;

use crate::models::PagingLinks;

const LIMIT_PARAM: &str = "limit";
const OFFSET_PARAM: &str = "offset";

pub struct PagingLinkBuilder;

impl PagingLinkBuilder {
    /// Links for the applicable relations. Every query parameter of `base`
    /// is kept except `limit` and `offset`, which are rewritten per link.
    pub fn build(base: &Url, total: u64, limit: u32, offset: u64) -> PagingLinks {
        if total == 0 || limit == 0 {
            return PagingLinks::default();
        }
        let limit = u64::from(limit);
        let link = |target: u64| Some(Self::with_window(base, limit, target));

        PagingLinks {
            first: link(0),
            prev: if offset > 0 {
                link(offset.saturating_sub(limit))
            } else {
                None
            },
            next: if offset.saturating_add(limit) < total {
                link(offset + limit)
            } else {
                None
            },
            last: link((total - 1) / limit * limit),
        }
    }

    fn with_window(base: &Url, limit: u64, offset: u64) -> String {
        let kept: Vec<(String, String)> = base
            .query_pairs()
            .filter(|(k, _)| k != LIMIT_PARAM && k != OFFSET_PARAM)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let mut url = base.clone();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair(LIMIT_PARAM, &limit.to_string())
            .append_pair(OFFSET_PARAM, &offset.to_string());
        url.to_string()
    }
}

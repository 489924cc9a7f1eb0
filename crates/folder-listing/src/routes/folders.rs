//! Folder contents API

use axum::{
    extract::{rejection::QueryRejection, Extension, OriginalUri, Path, Query, State},
    http::{header, HeaderMap, HeaderValue, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use url::Url;

use super::AppState;
use crate::error::{ListingError, ListingResult};
use crate::models::{ListingParams, ListingResponse};
use crate::AuthenticatedUserId;

/// Query of the by-path entry point
#[derive(Debug, Default, Deserialize)]
pub struct ContentsByPathQuery {
    pub path: Option<String>,
    pub resource_types: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl ContentsByPathQuery {
    fn listing_params(&self) -> ListingParams {
        ListingParams {
            resource_types: self.resource_types.clone(),
            sort: self.sort.clone(),
            limit: self.limit.clone(),
            offset: self.offset.clone(),
            ..Default::default()
        }
    }
}

pub fn folder_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/folders/contents", get(contents_by_path))
        .route("/folders/{id}/contents", get(contents_by_id))
}

async fn contents_by_path(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUserId>,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<ContentsByPathQuery>, QueryRejection>,
) -> ListingResult<Response> {
    let Query(q) = query.map_err(malformed)?;
    let request_url = absolute_url(&state.base_url, &uri)?;
    let response = state
        .service
        .list_by_path(user.as_str(), q.path.as_deref(), &q.listing_params(), &request_url)
        .await?;
    Ok(listing_reply(response))
}

async fn contents_by_id(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUserId>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
    query: Result<Query<ListingParams>, QueryRejection>,
) -> ListingResult<Response> {
    let Query(params) = query.map_err(malformed)?;
    let request_url = absolute_url(&state.base_url, &uri)?;
    let response = state
        .service
        .list_by_id(user.as_str(), &id, &params, &request_url)
        .await?;
    Ok(listing_reply(response))
}

fn malformed(rejection: QueryRejection) -> ListingError {
    ListingError::MalformedQuery(rejection.body_text())
}

/// The request as seen from outside: the original path and query appended
/// to the public base, whose own path is kept as a prefix
fn absolute_url(base_url: &str, uri: &Uri) -> ListingResult<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|e| ListingError::Internal(format!("Invalid base URL '{}': {}", base_url, e)))?;
    let path = format!("{}{}", url.path().trim_end_matches('/'), uri.path());
    url.set_path(&path);
    url.set_query(uri.query());
    url.set_fragment(None);
    Ok(url)
}

/// JSON body plus the paging relations as a `Link` header
fn listing_reply(response: ListingResponse) -> Response {
    let mut headers = HeaderMap::new();
    if let Some(link) = response.paging.to_link_header() {
        match HeaderValue::from_str(&link) {
            Ok(value) => {
                headers.insert(header::LINK, value);
            }
            Err(e) => tracing::warn!("Skipping unencodable Link header: {}", e),
        }
    }
    (headers, Json(response)).into_response()
}

//! Authentication middleware

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::state::AppState;

use folder_listing::AuthenticatedUserId;

const API_KEY_HEADER: &str = "X-API-Key";

/// API key from `X-API-Key` or `Authorization: Bearer`
fn request_api_key(request: &Request<Body>) -> Option<String> {
    if let Some(value) = request.headers().get(API_KEY_HEADER) {
        value.to_str().ok().map(|s| s.trim().to_string())
    } else if let Some(value) = request.headers().get(header::AUTHORIZATION) {
        value
            .to_str()
            .ok()
            .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
            .map(|s| s.trim().to_string())
    } else {
        None
    }
}

fn unauthorized(error: &str, hint: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "code": "UNAUTHORIZED",
            "message": error,
            "details": { "hint": hint }
        })),
    )
        .into_response()
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(api_key) = request_api_key(&request).filter(|k| !k.is_empty()) else {
        return unauthorized(
            "Missing API key",
            "Provide X-API-Key header or Authorization: Bearer <key>",
        );
    };

    match state.user_for_api_key(&api_key) {
        Some(user_id) => {
            let user_id = user_id.to_string();
            tracing::debug!("Authenticated request for user {}", user_id);
            request.extensions_mut().insert(AuthenticatedUserId(user_id));
            next.run(request).await
        }
        None => unauthorized("Invalid API key", "The key is not registered"),
    }
}

//! `/api/*` forwarding to the patient backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser only ever talks to this host. Everything under `/api` except
//! the auth endpoints is replayed against `BADAL_API_URL` with the same
//! method, path, query and body. Only `content-type`, `accept` and
//! `authorization` cross the hop in either direction that matters to the
//! client; the upstream status and body come back untouched.

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;

use crate::state::AppState;

const FORWARDED_HEADERS: [header::HeaderName; 3] = [header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION];

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("patient backend unreachable: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("request body exceeds {0} bytes")]
    BodyTooLarge(usize),
}

impl ProxyError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::BodyTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), Json(serde_json::json!({ "detail": self.to_string() }))).into_response()
    }
}

/// `{base}{path}` plus the query string when there is one.
#[must_use]
pub fn upstream_url(base: &str, path: &str, query: Option<&str>) -> String {
    match query.filter(|q| !q.is_empty()) {
        Some(q) => format!("{base}{path}?{q}"),
        None => format!("{base}{path}"),
    }
}

/// Copy the allow-listed headers; everything else (cookies, host, hop-by-hop)
/// stays behind.
#[must_use]
pub fn forwarded_headers(incoming: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::new();
    for name in &FORWARDED_HEADERS {
        for value in incoming.get_all(name) {
            out.append(name.clone(), value.clone());
        }
    }
    out
}

/// Catch-all handler for `/api/{*rest}`.
///
/// # Errors
///
/// `ProxyError::BodyTooLarge` (413) before contacting the backend,
/// `ProxyError::Upstream` (502) when the backend cannot be reached.
pub async fn forward(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Body,
) -> Result<Response, ProxyError> {
    let limit = state.config.proxy_body_limit_bytes;
    let body = axum::body::to_bytes(body, limit).await.map_err(|_| ProxyError::BodyTooLarge(limit))?;
    let url = upstream_url(&state.config.api_url, uri.path(), uri.query());

    let upstream = state
        .http
        .request(method.clone(), &url)
        .headers(forwarded_headers(&headers))
        .body(body)
        .send()
        .await
        .inspect_err(|e| tracing::warn!(%method, path = uri.path(), error = %e, "proxy: upstream failed"))?;

    let status = upstream.status();
    let content_type = upstream.headers().get(header::CONTENT_TYPE).cloned();
    let bytes: Bytes = upstream.bytes().await?;
    tracing::debug!(%method, path = uri.path(), %status, "proxy: forwarded");

    let mut response = (status, bytes).into_response();
    if let Some(value) = content_type {
        response.headers_mut().insert(header::CONTENT_TYPE, value);
    } else {
        response.headers_mut().remove(header::CONTENT_TYPE);
    }
    Ok(response)
}

#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;

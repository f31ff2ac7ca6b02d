//! axum router for the browser-facing API.

use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, Request, State};
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Extension, Json, Router};
use orderdesk_client::OrderBackend;
use orderdesk_core::RequestId;
use tower_http::trace::TraceLayer;

use crate::dispatch::{dispatch, Action, DispatchError};

/// Response header carrying the request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Shared, read-only state of the router.
#[derive(Clone)]
pub struct AppState {
    backend: Arc<dyn OrderBackend>,
    bulk_concurrency: usize,
}

impl AppState {
    /// Create router state.
    pub fn new(backend: Arc<dyn OrderBackend>, bulk_concurrency: usize) -> Self {
        Self {
            backend,
            bulk_concurrency,
        }
    }
}

/// Longest inbound request id that is echoed back instead of replaced.
const MAX_REQUEST_ID_LEN: usize = 128;

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.to_json())).into_response()
    }
}

/// Build the router.
///
/// `POST /` and `POST /api` are equivalent.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", post(handle_action))
        .route("/api", post(handle_action))
        .with_state(state)
        .layer(middleware::from_fn(assign_request_id))
        .layer(TraceLayer::new_for_http())
}

async fn handle_action(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, DispatchError> {
    let started = Instant::now();
    let name = query
        .map(|Query(pairs)| action_param(pairs))
        .unwrap_or_default();

    let action = match name.parse::<Action>() {
        Ok(action) => action,
        Err(e) => {
            tracing::info!(request_id = %request_id, action = %name, "rejected unknown action");
            return Err(e);
        }
    };

    let result = dispatch(action, &body, state.backend.as_ref(), state.bulk_concurrency).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match &result {
        Ok(_) => tracing::info!(
            request_id = %request_id,
            action = %action,
            elapsed_ms,
            "action completed"
        ),
        Err(e) => tracing::warn!(
            request_id = %request_id,
            action = %action,
            status = e.status().as_u16(),
            error = %e,
            elapsed_ms,
            "action failed"
        ),
    }

    result.map(Json)
}

/// The last `action` value in the query string, or empty.
fn action_param(pairs: Vec<(String, String)>) -> String {
    pairs
        .into_iter()
        .filter(|(key, _)| key == "action")
        .map(|(_, value)| value)
        .last()
        .unwrap_or_default()
}

/// Inbound `x-request-id`, when it is short, non-blank, visible ASCII.
fn inbound_request_id(request: &Request) -> Option<RequestId> {
    let value = request.headers().get(REQUEST_ID_HEADER)?.to_str().ok()?;
    let valid = !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.bytes().all(|b| b.is_ascii_graphic());
    valid.then(|| RequestId::from_string(value))
}

/// Attach a request id to the request and echo it on the response.
///
/// A well-formed inbound `x-request-id` is kept; otherwise a new one is
/// generated.
async fn assign_request_id(mut request: Request, next: Next) -> Response {
    let request_id = inbound_request_id(&request).unwrap_or_else(RequestId::generate);
    request.extensions_mut().insert(request_id.clone());

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn request_with_id(id: &str) -> Request {
        Request::builder()
            .header(REQUEST_ID_HEADER, id)
            .body(axum::body::Body::empty())
            .unwrap()
    }

    #[test]
    fn test_action_param_takes_last_value() {
        let query = pairs(&[("action", "submit-order"), ("x", "1"), ("action", "check-stock")]);
        assert_eq!(action_param(query), "check-stock");
        assert_eq!(action_param(pairs(&[("x", "1")])), "");
    }

    #[test]
    fn test_inbound_request_id() {
        let id = inbound_request_id(&request_with_id("abc-123")).unwrap();
        assert_eq!(id.as_str(), "abc-123");

        assert!(inbound_request_id(&request_with_id("has space")).is_none());
        assert!(inbound_request_id(&request_with_id(&"a".repeat(129))).is_none());
        assert!(inbound_request_id(&request_with_id(&"a".repeat(128))).is_some());

        let bare = Request::builder().body(axum::body::Body::empty()).unwrap();
        assert!(inbound_request_id(&bare).is_none());
    }
}

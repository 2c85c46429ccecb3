//! Axum routes and middleware stack for the concierge API.

use std::time::Duration;

use axum::extract::Request;
use axum::http::{header, HeaderValue, Method};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::application::OriginPolicy;

use super::handlers::{self, ConciergeState};

/// Builds the full router: endpoints plus CORS, tracing, timeout, and
/// security-header layers.
///
/// CORS admission uses the same origin policy as the gate, so a
/// preflight and the request it precedes always agree.
pub fn concierge_router(
    state: ConciergeState,
    policy: OriginPolicy,
    request_timeout: Duration,
) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            origin.to_str().map(|o| policy.allows(o)).unwrap_or(false)
        }))
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(86400));

    Router::new()
        .route("/api/chat", post(handlers::chat))
        .route("/api/notify", post(handlers::notify))
        .route("/health", get(handlers::health))
        .layer(middleware::from_fn(security_headers))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Adds browser hardening headers to every response.
async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    response
}

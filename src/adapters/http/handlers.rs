//! HTTP handlers for the concierge endpoints.
//!
//! These handlers connect axum routes to application layer operations.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Json, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::application::{ChatService, NotifyService};

use super::dto::{ChatRequest, ChatResponse, HealthResponse, NotifyRequest, NotifyResponse};
use super::error::ApiError;

/// Shared application state for the concierge handlers.
#[derive(Clone)]
pub struct ConciergeState {
    pub chat: Arc<ChatService>,
    pub notify: Arc<NotifyService>,
}

impl ConciergeState {
    pub fn new(chat: Arc<ChatService>, notify: Arc<NotifyService>) -> Self {
        Self { chat, notify }
    }
}

/// POST /api/chat - run one conversation turn.
///
/// # Errors
/// - 400 Bad Request: empty, oversized, or unsalvageable payload
/// - 403 Forbidden: origin missing or not allowed
/// - 429 Too Many Requests: client exhausted its window
pub async fn chat(
    State(state): State<ConciergeState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    Json(request): Json<ChatRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let origin = headers.get(header::ORIGIN).and_then(|v| v.to_str().ok());
    let client = extract_client_ip(&headers, connect_info.map(|ConnectInfo(addr)| addr));

    let turn = state
        .chat
        .handle_turn(origin, &client, &request.messages, request.notified)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ChatResponse {
            reply: turn.reply,
            notified: turn.notified,
        }),
    ))
}

/// POST /api/notify - dispatch notifications for a caller-supplied lead.
///
/// # Errors
/// - 502 Bad Gateway: an email channel failed upstream
pub async fn notify(
    State(state): State<ConciergeState>,
    Json(request): Json<NotifyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.notify.notify(&request.lead).await?;
    Ok((StatusCode::OK, Json(NotifyResponse { success: true })))
}

/// GET /health - liveness probe.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}

/// Best-effort client identity for rate limiting.
///
/// Proxy headers win over the socket address: first entry of
/// `X-Forwarded-For`, then `X-Real-IP`, then the peer address.
pub fn extract_client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(forwarded) = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> Option<SocketAddr> {
        Some("10.0.0.1:443".parse().unwrap())
    }

    #[test]
    fn forwarded_for_takes_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.2"),
        );
        assert_eq!(extract_client_ip(&headers, peer()), "203.0.113.7");
    }

    #[test]
    fn real_ip_used_when_no_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.4"));
        assert_eq!(extract_client_ip(&headers, peer()), "198.51.100.4");
    }

    #[test]
    fn peer_address_is_the_fallback() {
        assert_eq!(extract_client_ip(&HeaderMap::new(), peer()), "10.0.0.1");
    }

    #[test]
    fn unknown_without_any_source() {
        assert_eq!(extract_client_ip(&HeaderMap::new(), None), "unknown");
    }

    #[test]
    fn empty_forwarded_for_falls_through() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("  "));
        assert_eq!(extract_client_ip(&headers, peer()), "10.0.0.1");
    }
}

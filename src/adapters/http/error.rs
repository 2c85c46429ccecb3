//! API error type that converts pipeline errors to HTTP responses.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::application::{GateRejection, NotifyError};

use super::dto::ErrorResponse;

/// Errors surfaced by the concierge endpoints.
#[derive(Debug)]
pub enum ApiError {
    /// The admission gate rejected the request.
    Gate(GateRejection),
    /// Synchronous notification delivery failed upstream.
    Delivery,
}

impl From<GateRejection> for ApiError {
    fn from(rejection: GateRejection) -> Self {
        ApiError::Gate(rejection)
    }
}

impl From<NotifyError> for ApiError {
    fn from(_: NotifyError) -> Self {
        ApiError::Delivery
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Gate(rejection) => {
                let (status, message) = match &rejection {
                    GateRejection::Forbidden => (StatusCode::FORBIDDEN, "Origin not allowed"),
                    GateRejection::RateLimited { .. } => {
                        (StatusCode::TOO_MANY_REQUESTS, "Too many requests")
                    }
                    GateRejection::BadRequest => {
                        (StatusCode::BAD_REQUEST, "Invalid conversation payload")
                    }
                    GateRejection::ConversationTooLong => (
                        StatusCode::BAD_REQUEST,
                        "Conversation too long, please start a new session",
                    ),
                };

                let body = ErrorResponse::new(message, rejection.code());
                let mut response = (status, Json(body)).into_response();

                if let GateRejection::RateLimited { retry_after_secs } = rejection {
                    if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
                        response.headers_mut().insert(header::RETRY_AFTER, value);
                    }
                }

                response
            }
            ApiError::Delivery => {
                let body = ErrorResponse::new("Notification delivery failed", "delivery_failed");
                (StatusCode::BAD_GATEWAY, Json(body)).into_response()
            }
        }
    }
}

//! HTTP adapter - the axum surface over the turn pipeline.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;

pub use error::ApiError;
pub use handlers::ConciergeState;
pub use routes::concierge_router;

//! Adapters - concrete implementations of the ports plus the HTTP surface.

pub mod ai;
pub mod email;
pub mod http;
pub mod rate_limiter;

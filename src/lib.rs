//! Studio Concierge - Conversational Lead Qualification Front Door
//!
//! This crate drives a scripted sales-qualification dialogue over HTTP,
//! extracts structured lead records from the generated replies, and fans
//! them out to notification channels at most once per lead identity.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

//! Route handlers.
//!
//! - [`summary`]: `GET /`, the composite provider response
//! - [`health`]: `GET /health` liveness probe and the JSON 404 fallback

pub mod health;
pub mod summary;

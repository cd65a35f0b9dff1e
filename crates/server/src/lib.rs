//! Server crate: Axum service exposing the morning brief.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  GET /   ┌──────────────┐  fan-out  ┌─────────────────────┐
//! │    Client    │ ───────> │ Axum router  │ ────────> │ Aggregator          │
//! │              │ <─────── │ (summary.rs) │ <──────── │ market ∥ AQI ∥ wx   │
//! └──────────────┘   200    └──────────────┘   join    └─────────────────────┘
//! ```
//!
//! Upstream failures never change the status code: they are embedded in the
//! JSON body as error payloads.
//!
//! # Modules
//!
//! - [`app`]: router builder and [`ServerConfig`](app::ServerConfig)
//! - [`state`]: shared state handed to every handler
//! - [`error`]: router-level errors with HTTP status mapping
//! - [`routes`]: handlers (summary, health)

pub mod app;
pub mod error;
pub mod routes;
pub mod state;

pub use app::{ServerConfig, create_app};
pub use error::AppError;
pub use state::ServerState;

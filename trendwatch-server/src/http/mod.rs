//! HTTP server layer
//!
//! Axum server with:
//! - CORS and request tracing
//! - Graceful shutdown with explicit pool drain
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{run_server, ServerConfig};

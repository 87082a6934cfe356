//! trendwatch-server: REST service over the trends table
//!
//! Exposes CRUD and query operations for trend records via HTTP and
//! owns the PostgreSQL access layer behind them.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::Config;
pub use http::server::{run_server, ServerConfig};

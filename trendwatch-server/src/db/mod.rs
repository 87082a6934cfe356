//! PostgreSQL access layer
//!
//! Pool lifecycle, bootstrap migrations, predicate assembly, and the
//! trend repository.

pub mod migrations;
pub mod pool;
pub mod predicate;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options};
pub use predicate::{PredicateList, SqlParam};
pub use repos::{DbError, TrendRepo};

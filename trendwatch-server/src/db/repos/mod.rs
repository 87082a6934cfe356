//! Repository implementations for database access
//!
//! Every operation is a single parameterized statement; each execution
//! is logged with statement text, row count, and elapsed time.

pub mod trends;

pub use trends::{DbError, TrendRepo, DEFAULT_MOCK_COUNT, MAX_MOCK_COUNT};

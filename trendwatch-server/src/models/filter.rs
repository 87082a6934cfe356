//! Optional filter criteria for trend queries
//!
//! Whether a criterion applies is decided by Option-ness, never by the
//! value itself: min_popularity = 0 is a real constraint.

use serde::Deserialize;

/// Conjunctive filter criteria. Absent criteria are unconstrained.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrendFilter {
    pub category: Option<String>,
    pub source: Option<String>,
    #[serde(rename = "minPopularity")]
    pub min_popularity: Option<i32>,
}

impl TrendFilter {
    /// True when no criterion is supplied.
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.source.is_none() && self.min_popularity.is_none()
    }
}

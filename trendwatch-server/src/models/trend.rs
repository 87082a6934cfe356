//! Trend record and validated write inputs
//!
//! Column limits match the trends schema: keyword VARCHAR(255),
//! category/source VARCHAR(100), popularity_score INTEGER >= 0.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::ValidationError;

/// Maximum length for keywords
const MAX_KEYWORD_LEN: usize = 255;

/// Maximum length for category and source labels
const MAX_LABEL_LEN: usize = 100;

/// One row of the trends table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Trend {
    pub id: i64,
    pub keyword: String,
    pub category: Option<String>,
    pub popularity_score: Option<i32>,
    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated input for inserting a trend
#[derive(Debug, Clone)]
pub struct TrendDraft {
    pub keyword: String,
    pub category: Option<String>,
    pub popularity_score: Option<i32>,
    pub source: Option<String>,
}

impl TrendDraft {
    /// Validate insert input.
    ///
    /// # Rules
    /// - keyword required, non-empty, max 255 chars
    /// - category/source max 100 chars
    /// - popularity_score >= 0 when present
    pub fn new(
        keyword: String,
        category: Option<String>,
        popularity_score: Option<i32>,
        source: Option<String>,
    ) -> Result<Self, ValidationError> {
        check_keyword(&keyword)?;
        check_label("category", category.as_deref())?;
        check_label("source", source.as_deref())?;
        check_score(popularity_score)?;

        Ok(Self {
            keyword,
            category,
            popularity_score,
            source,
        })
    }
}

/// Validated partial update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct TrendPatch {
    pub keyword: Option<String>,
    pub category: Option<String>,
    pub popularity_score: Option<i32>,
    pub source: Option<String>,
}

impl TrendPatch {
    /// Validate update input. An all-absent patch is valid and leaves
    /// the row unchanged.
    pub fn new(
        keyword: Option<String>,
        category: Option<String>,
        popularity_score: Option<i32>,
        source: Option<String>,
    ) -> Result<Self, ValidationError> {
        if let Some(keyword) = keyword.as_deref() {
            check_keyword(keyword)?;
        }
        check_label("category", category.as_deref())?;
        check_label("source", source.as_deref())?;
        check_score(popularity_score)?;

        Ok(Self {
            keyword,
            category,
            popularity_score,
            source,
        })
    }
}

/// Aggregate summary over all trends
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrendStats {
    /// Total row count
    pub total_trends: i64,
    /// Mean popularity_score; NULL-scored rows are excluded, None when
    /// no row carries a score
    pub average_score: Option<f64>,
}

fn check_keyword(keyword: &str) -> Result<(), ValidationError> {
    if keyword.trim().is_empty() {
        return Err(ValidationError::Empty { field: "keyword" });
    }
    if keyword.len() > MAX_KEYWORD_LEN {
        return Err(ValidationError::TooLong {
            field: "keyword",
            max: MAX_KEYWORD_LEN,
        });
    }
    Ok(())
}

fn check_label(field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
    if let Some(value) = value {
        if value.len() > MAX_LABEL_LEN {
            return Err(ValidationError::TooLong {
                field,
                max: MAX_LABEL_LEN,
            });
        }
    }
    Ok(())
}

fn check_score(score: Option<i32>) -> Result<(), ValidationError> {
    if let Some(score) = score {
        if score < 0 {
            return Err(ValidationError::Negative {
                field: "popularity_score",
            });
        }
    }
    Ok(())
}

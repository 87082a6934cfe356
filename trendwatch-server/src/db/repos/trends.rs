//! Trend repository
//!
//! One method per record operation, each a single SQL statement against
//! the trends table.

use std::time::Instant;

use rand::Rng;
use sqlx::PgPool;

use crate::db::predicate::{PredicateList, SqlParam};
use crate::models::{Page, Trend, TrendDraft, TrendFilter, TrendPatch, TrendStats};

/// Default row count for mock generation
pub const DEFAULT_MOCK_COUNT: u32 = 10;

/// Upper bound for a single batched mock insert; four binds per row must
/// stay under the Postgres parameter limit
pub const MAX_MOCK_COUNT: u32 = 10_000;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

/// Trend repository
pub struct TrendRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> TrendRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a trend; id and created_at are store-generated.
    pub async fn create(&self, draft: &TrendDraft) -> Result<Trend, DbError> {
        let sql = r#"
            INSERT INTO trends (keyword, category, popularity_score, source)
            VALUES ($1, $2, $3, $4)
            RETURNING id, keyword, category, popularity_score, source, created_at
            "#;

        let started = Instant::now();
        let trend = sqlx::query_as::<_, Trend>(sql)
            .bind(&draft.keyword)
            .bind(draft.category.as_deref())
            .bind(draft.popularity_score)
            .bind(draft.source.as_deref())
            .fetch_one(self.pool)
            .await?;
        log_statement(sql, 1, started);

        Ok(trend)
    }

    /// All trends, most recent first.
    pub async fn list(&self) -> Result<Vec<Trend>, DbError> {
        let sql = r#"
            SELECT id, keyword, category, popularity_score, source, created_at
            FROM trends
            ORDER BY created_at DESC
            "#;

        let started = Instant::now();
        let trends = sqlx::query_as::<_, Trend>(sql).fetch_all(self.pool).await?;
        log_statement(sql, trends.len() as u64, started);

        Ok(trends)
    }

    /// Trends with an exact category match, most recent first.
    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Trend>, DbError> {
        let sql = r#"
            SELECT id, keyword, category, popularity_score, source, created_at
            FROM trends
            WHERE category = $1
            ORDER BY created_at DESC
            "#;

        let started = Instant::now();
        let trends = sqlx::query_as::<_, Trend>(sql)
            .bind(category)
            .fetch_all(self.pool)
            .await?;
        log_statement(sql, trends.len() as u64, started);

        Ok(trends)
    }

    /// Trends whose keyword contains the fragment, case-insensitive.
    pub async fn search(&self, fragment: &str) -> Result<Vec<Trend>, DbError> {
        let sql = r#"
            SELECT id, keyword, category, popularity_score, source, created_at
            FROM trends
            WHERE keyword ILIKE $1
            ORDER BY created_at DESC
            "#;
        let pattern = format!("%{}%", escape_like(fragment));

        let started = Instant::now();
        let trends = sqlx::query_as::<_, Trend>(sql)
            .bind(&pattern)
            .fetch_all(self.pool)
            .await?;
        log_statement(sql, trends.len() as u64, started);

        Ok(trends)
    }

    /// Single trend by id.
    pub async fn get(&self, id: i64) -> Result<Trend, DbError> {
        let sql = r#"
            SELECT id, keyword, category, popularity_score, source, created_at
            FROM trends
            WHERE id = $1
            "#;

        let started = Instant::now();
        let row = sqlx::query_as::<_, Trend>(sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        log_statement(sql, row.is_some() as u64, started);

        row.ok_or_else(|| DbError::NotFound {
            resource: "trend",
            id: id.to_string(),
        })
    }

    /// Partial update: supplied fields replace stored values, absent
    /// fields are retained via COALESCE.
    pub async fn update(&self, id: i64, patch: &TrendPatch) -> Result<Trend, DbError> {
        let sql = r#"
            UPDATE trends
            SET
                keyword = COALESCE($2, keyword),
                category = COALESCE($3, category),
                popularity_score = COALESCE($4, popularity_score),
                source = COALESCE($5, source)
            WHERE id = $1
            RETURNING id, keyword, category, popularity_score, source, created_at
            "#;

        let started = Instant::now();
        let row = sqlx::query_as::<_, Trend>(sql)
            .bind(id)
            .bind(patch.keyword.as_deref())
            .bind(patch.category.as_deref())
            .bind(patch.popularity_score)
            .bind(patch.source.as_deref())
            .fetch_optional(self.pool)
            .await?;
        log_statement(sql, row.is_some() as u64, started);

        row.ok_or_else(|| DbError::NotFound {
            resource: "trend",
            id: id.to_string(),
        })
    }

    /// Delete a trend, returning its prior contents.
    pub async fn delete(&self, id: i64) -> Result<Trend, DbError> {
        let sql = r#"
            DELETE FROM trends
            WHERE id = $1
            RETURNING id, keyword, category, popularity_score, source, created_at
            "#;

        let started = Instant::now();
        let row = sqlx::query_as::<_, Trend>(sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        log_statement(sql, row.is_some() as u64, started);

        row.ok_or_else(|| DbError::NotFound {
            resource: "trend",
            id: id.to_string(),
        })
    }

    /// A limit/offset slice of the default ordering.
    pub async fn list_page(&self, page: Page) -> Result<Vec<Trend>, DbError> {
        let sql = r#"
            SELECT id, keyword, category, popularity_score, source, created_at
            FROM trends
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#;

        let started = Instant::now();
        let trends = sqlx::query_as::<_, Trend>(sql)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(self.pool)
            .await?;
        log_statement(sql, trends.len() as u64, started);

        Ok(trends)
    }

    /// Up to `limit` trends by descending popularity; unscored rows sort
    /// last.
    pub async fn list_popular(&self, limit: i64) -> Result<Vec<Trend>, DbError> {
        let sql = r#"
            SELECT id, keyword, category, popularity_score, source, created_at
            FROM trends
            ORDER BY popularity_score DESC NULLS LAST
            LIMIT $1
            "#;

        let started = Instant::now();
        let trends = sqlx::query_as::<_, Trend>(sql)
            .bind(limit)
            .fetch_all(self.pool)
            .await?;
        log_statement(sql, trends.len() as u64, started);

        Ok(trends)
    }

    /// Trends matching every supplied criterion; zero criteria returns
    /// everything in the default ordering.
    pub async fn filter(&self, filter: &TrendFilter) -> Result<Vec<Trend>, DbError> {
        // Fixed criterion order: category, source, min popularity
        let mut pred = PredicateList::new();
        if let Some(category) = &filter.category {
            pred.push("category", "=", SqlParam::Text(category.clone()));
        }
        if let Some(source) = &filter.source {
            pred.push("source", "=", SqlParam::Text(source.clone()));
        }
        if let Some(min) = filter.min_popularity {
            pred.push("popularity_score", ">=", SqlParam::Int(min.into()));
        }

        let sql = format!(
            "SELECT id, keyword, category, popularity_score, source, created_at \
             FROM trends{} ORDER BY created_at DESC",
            pred.where_clause()
        );

        let mut query = sqlx::query_as::<_, Trend>(&sql);
        for param in pred.params() {
            query = match param {
                SqlParam::Text(s) => query.bind(s.clone()),
                SqlParam::Int(i) => query.bind(*i),
            };
        }

        let started = Instant::now();
        let trends = query.fetch_all(self.pool).await?;
        log_statement(&sql, trends.len() as u64, started);

        Ok(trends)
    }

    /// Row count and mean popularity score across all trends.
    pub async fn statistics(&self) -> Result<TrendStats, DbError> {
        let sql = r#"
            SELECT
                COUNT(*) AS total_trends,
                AVG(popularity_score)::float8 AS average_score
            FROM trends
            "#;

        let started = Instant::now();
        let stats = sqlx::query_as::<_, TrendStats>(sql)
            .fetch_one(self.pool)
            .await?;
        log_statement(sql, 1, started);

        Ok(stats)
    }

    /// Insert `count` synthetic trends in one batched statement.
    ///
    /// Callers validate count against 1..=MAX_MOCK_COUNT.
    pub async fn insert_mocks(&self, count: u32) -> Result<u64, DbError> {
        let rows = mock_rows(count);
        if rows.is_empty() {
            return Ok(0);
        }

        let mut builder = sqlx::QueryBuilder::new(
            "INSERT INTO trends (keyword, category, popularity_score, source) ",
        );
        builder.push_values(rows.iter(), |mut b, row| {
            b.push_bind(&row.keyword)
                .push_bind(row.category)
                .push_bind(row.popularity_score)
                .push_bind(row.source);
        });

        let started = Instant::now();
        let result = builder.build().execute(self.pool).await?;
        log_statement(
            "INSERT INTO trends (keyword, category, popularity_score, source) VALUES ...",
            result.rows_affected(),
            started,
        );

        Ok(result.rows_affected())
    }
}

/// One synthetic trend row
#[derive(Debug, Clone)]
struct MockRow {
    keyword: String,
    category: &'static str,
    popularity_score: i32,
    source: &'static str,
}

/// Deterministic-by-index labels, pseudo-random scores in [0, 100).
fn mock_rows(count: u32) -> Vec<MockRow> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| MockRow {
            keyword: format!("Keyword {}", i + 1),
            category: if i % 2 == 0 { "tech" } else { "gaming" },
            popularity_score: rng.gen_range(0..100),
            source: if i % 3 == 0 { "YouTube" } else { "Twitter" },
        })
        .collect()
}

/// Escape LIKE wildcards so a search fragment matches literally.
fn escape_like(fragment: &str) -> String {
    fragment
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn log_statement(sql: &str, rows: u64, started: Instant) {
    tracing::debug!(
        statement = sql,
        rows,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "executed statement"
    );
}

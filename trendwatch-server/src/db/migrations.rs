//! Bootstrap migration for the trends table

use sqlx::PgPool;

/// Create the trends table and its indexes if they don't exist.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running trends migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS trends (
            id BIGSERIAL PRIMARY KEY,
            keyword VARCHAR(255) NOT NULL,
            category VARCHAR(100),
            popularity_score INTEGER,
            source VARCHAR(100),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("Trends migrations complete");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<(), sqlx::Error> {
    // One index per query access path: default ordering, category match,
    // popularity ranking
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_trends_created ON trends(created_at DESC)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_trends_category ON trends(category)")
        .execute(pool)
        .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_trends_popularity ON trends(popularity_score DESC)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

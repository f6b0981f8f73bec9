use anyhow::Context as _;
use sqlx::PgPool;

use crate::settings::Settings;

/// Connect the pool and make sure the schema exists.
pub async fn connect(settings: &Settings) -> anyhow::Result<PgPool> {
    let pool = api::db::connect(&settings.database.url())
        .await
        .context("failed to connect to postgres")?;
    init_database(&pool).await?;
    Ok(pool)
}

/// Initialize the database with tables if they don't exist
async fn init_database(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            username TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL
        );",
    )
    .execute(pool)
    .await
    .context("failed to create users table")?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS items (
            id UUID PRIMARY KEY,
            owner_id UUID NOT NULL REFERENCES users (id),
            name TEXT NOT NULL,
            comment TEXT,
            priority INTEGER NOT NULL DEFAULT 0,
            due TIMESTAMPTZ,
            done BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMPTZ NOT NULL
        );",
    )
    .execute(pool)
    .await
    .context("failed to create items table")?;

    Ok(())
}

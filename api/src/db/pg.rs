//! Postgres-backed [`ItemStore`].
//!
//! Reads are single statements. Mutations are read-guard-write inside one
//! transaction, so a request's change is applied atomically and the
//! ownership check sees the same row the write does. Patch application is
//! shared with every other backend through [`Item::apply`].

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use store::models::{Item, ItemPatch};
use store::repo::{ensure_owner, ItemStore, StoreError};

/// Items table persistence over a sqlx Postgres pool.
#[derive(Clone, Debug)]
pub struct PgItems {
    pool: PgPool,
}

impl PgItems {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Row shape of the `items` table; the domain crate stays sqlx-free.
#[derive(FromRow)]
struct ItemRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    comment: Option<String>,
    priority: i32,
    due: Option<DateTime<Utc>>,
    done: bool,
    created_at: DateTime<Utc>,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            comment: row.comment,
            priority: row.priority,
            due: row.due,
            done: row.done,
            created_at: row.created_at,
        }
    }
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(Box::new(err))
}

impl ItemStore for PgItems {
    async fn insert(&self, item: Item) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO items (id, owner_id, name, comment, priority, due, done, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(item.id)
        .bind(item.owner_id)
        .bind(&item.name)
        .bind(&item.comment)
        .bind(item.priority)
        .bind(item.due)
        .bind(item.done)
        .bind(item.created_at)
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Item>, StoreError> {
        let row: Option<ItemRow> = sqlx::query_as("SELECT * FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;
        Ok(row.map(Item::from))
    }

    async fn list_owned(&self, owner_id: Uuid) -> Result<Vec<Item>, StoreError> {
        let rows: Vec<ItemRow> =
            sqlx::query_as("SELECT * FROM items WHERE owner_id = $1 ORDER BY created_at")
                .bind(owner_id)
                .fetch_all(&self.pool)
                .await
                .map_err(backend)?;
        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn update(&self, id: Uuid, requester_id: Uuid, patch: ItemPatch) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(backend)?;

        let row: Option<ItemRow> = sqlx::query_as("SELECT * FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(backend)?;
        let mut item = Item::from(row.ok_or(StoreError::NotFound)?);
        ensure_owner(&item, requester_id)?;
        item.apply(patch);

        sqlx::query(
            "UPDATE items SET name = $2, comment = $3, priority = $4, due = $5 WHERE id = $1",
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(&item.comment)
        .bind(item.priority)
        .bind(item.due)
        .execute(&mut *tx)
        .await
        .map_err(backend)?;

        tx.commit().await.map_err(backend)
    }

    async fn mark_done(&self, id: Uuid, requester_id: Uuid) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(backend)?;

        let row: Option<ItemRow> = sqlx::query_as("SELECT * FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(backend)?;
        let item = Item::from(row.ok_or(StoreError::NotFound)?);
        ensure_owner(&item, requester_id)?;

        sqlx::query("UPDATE items SET done = TRUE WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(backend)?;

        tx.commit().await.map_err(backend)
    }

    async fn delete(&self, id: Uuid, requester_id: Uuid) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(backend)?;

        let row: Option<ItemRow> = sqlx::query_as("SELECT * FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(backend)?;
        let item = Item::from(row.ok_or(StoreError::NotFound)?);
        ensure_owner(&item, requester_id)?;

        sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(backend)?;

        tx.commit().await.map_err(backend)
    }
}

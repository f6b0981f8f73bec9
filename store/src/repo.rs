//! # Item persistence behind an abstract store
//!
//! [`ItemStore`] is the async interface every backend implements — the
//! Postgres table in production, [`crate::MemoryStore`] in tests and local
//! development. Reads return owned copies; `list_owned` yields the owner's
//! items in insertion order, which is what an unsorted listing serves.
//!
//! Every mutating operation applies the ownership rule inline, before
//! touching anything: the requester must be the item's owner, or the call
//! fails with [`StoreError::Forbidden`] and the item is left unchanged.
//! Operations on an id that does not exist fail with
//! [`StoreError::NotFound`]. There are no roles and no delegation — the
//! equality check is the entire authorization model.

use std::future::Future;

use thiserror::Error;
use uuid::Uuid;

use crate::models::{Item, ItemPatch};

/// Why a store operation failed.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("item not found")]
    NotFound,
    #[error("item belongs to another user")]
    Forbidden,
    #[error("storage error: {0}")]
    Backend(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// The requester must own the item to mutate it.
pub fn ensure_owner(item: &Item, requester_id: Uuid) -> Result<(), StoreError> {
    if item.owner_id == requester_id {
        Ok(())
    } else {
        Err(StoreError::Forbidden)
    }
}

/// Async interface for storing and retrieving items.
pub trait ItemStore {
    fn insert(&self, item: Item) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn get(&self, id: Uuid) -> impl Future<Output = Result<Option<Item>, StoreError>> + Send;

    /// The owner's items, oldest first.
    fn list_owned(
        &self,
        owner_id: Uuid,
    ) -> impl Future<Output = Result<Vec<Item>, StoreError>> + Send;

    fn update(
        &self,
        id: Uuid,
        requester_id: Uuid,
        patch: ItemPatch,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn mark_done(
        &self,
        id: Uuid,
        requester_id: Uuid,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn delete(
        &self,
        id: Uuid,
        requester_id: Uuid,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

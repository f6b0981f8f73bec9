//! Item operations, generic over the store backend.
//!
//! Each function is a thin composition of validation, the ownership-guarded
//! store call, and (for listings) the sort layer. Handlers call these with
//! the Postgres store; the tests below run the same code against
//! [`store::MemoryStore`].

use thiserror::Error;
use uuid::Uuid;

use store::models::{Item, ItemDraft, ItemPatch};
use store::sort::{sort_items, SortField, SortOrder};
use store::validate;
use store::{ItemStore, StoreError, ValidationError};

/// Why an item operation failed.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Create an item owned by `owner_id`; returns the new id.
pub async fn add<S: ItemStore>(
    store: &S,
    owner_id: Uuid,
    draft: ItemDraft,
) -> Result<Uuid, ItemError> {
    validate::check_draft(&draft)?;
    let item = Item::new(owner_id, draft);
    let id = item.id;
    store.insert(item).await?;
    Ok(id)
}

/// Fetch a single item by id.
pub async fn get<S: ItemStore>(store: &S, id: Uuid) -> Result<Item, ItemError> {
    Ok(store.get(id).await?.ok_or(StoreError::NotFound)?)
}

/// The owner's items, sorted per `order`; `None` keeps insertion order.
pub async fn list<S: ItemStore>(
    store: &S,
    owner_id: Uuid,
    field: SortField,
    order: Option<SortOrder>,
) -> Result<Vec<Item>, ItemError> {
    let mut items = store.list_owned(owner_id).await?;
    if let Some(order) = order {
        sort_items(&mut items, field, order);
    }
    Ok(items)
}

/// Apply a validated partial update; only the owner may do this.
pub async fn update<S: ItemStore>(
    store: &S,
    id: Uuid,
    requester_id: Uuid,
    patch: ItemPatch,
) -> Result<(), ItemError> {
    validate::check_patch(&patch)?;
    Ok(store.update(id, requester_id, patch).await?)
}

/// Flag an item as completed; only the owner may do this.
pub async fn mark_done<S: ItemStore>(
    store: &S,
    id: Uuid,
    requester_id: Uuid,
) -> Result<(), ItemError> {
    Ok(store.mark_done(id, requester_id).await?)
}

/// Remove an item; only the owner may do this.
pub async fn delete<S: ItemStore>(
    store: &S,
    id: Uuid,
    requester_id: Uuid,
) -> Result<(), ItemError> {
    Ok(store.delete(id, requester_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use store::MemoryStore;

    fn draft(name: &str, priority: i32) -> ItemDraft {
        ItemDraft {
            name: name.to_string(),
            priority,
            ..ItemDraft::default()
        }
    }

    #[tokio::test]
    async fn add_rejects_out_of_range_priority() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();

        for priority in [-1, 11, 100] {
            let result = add(&store, owner, draft("task", priority)).await;
            assert!(matches!(
                result,
                Err(ItemError::Invalid(ValidationError::PriorityOutOfRange(_)))
            ));
        }
        assert!(list(&store, owner, SortField::Priority, None)
            .await
            .unwrap()
            .is_empty());

        for priority in [0, 5, 10] {
            add(&store, owner, draft("task", priority)).await.unwrap();
        }
    }

    #[tokio::test]
    async fn update_validates_before_touching_the_store() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let id = add(&store, owner, draft("task", 3)).await.unwrap();

        let patch = ItemPatch {
            priority: Some(99),
            ..ItemPatch::default()
        };
        assert!(matches!(
            update(&store, id, owner, patch).await,
            Err(ItemError::Invalid(_))
        ));
        assert_eq!(get(&store, id).await.unwrap().priority, 3);
    }

    #[tokio::test]
    async fn list_sorts_by_priority_both_ways() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        for (name, priority) in [("mid", 5), ("low", 1), ("high", 9)] {
            add(&store, owner, draft(name, priority)).await.unwrap();
        }

        let ascending = list(&store, owner, SortField::Priority, Some(SortOrder::Ascending))
            .await
            .unwrap();
        assert!(ascending.windows(2).all(|w| w[0].priority <= w[1].priority));

        let descending = list(
            &store,
            owner,
            SortField::Priority,
            Some(SortOrder::Descending),
        )
        .await
        .unwrap();
        assert!(descending
            .windows(2)
            .all(|w| w[0].priority >= w[1].priority));

        // No order requested: insertion order.
        let natural = list(&store, owner, SortField::Priority, None).await.unwrap();
        let names: Vec<_> = natural.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["mid", "low", "high"]);
    }

    #[tokio::test]
    async fn list_never_leaks_across_users() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        add(&store, alice, draft("hers", 1)).await.unwrap();
        add(&store, bob, draft("his", 2)).await.unwrap();

        let listed = list(&store, alice, SortField::Due, Some(SortOrder::Descending))
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed.iter().all(|i| i.owner_id == alice));
    }

    #[tokio::test]
    async fn due_sort_handles_unscheduled_items() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let soon = ItemDraft {
            due: Some(Utc::now() + Duration::hours(1)),
            ..draft("soon", 0)
        };
        add(&store, owner, draft("never", 0)).await.unwrap();
        add(&store, owner, soon).await.unwrap();

        let ascending = list(&store, owner, SortField::Due, Some(SortOrder::Ascending))
            .await
            .unwrap();
        assert_eq!(ascending[0].name, "never");
        assert_eq!(ascending[1].name, "soon");
    }

    #[tokio::test]
    async fn foreign_requester_changes_nothing() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let id = add(&store, owner, draft("task", 3)).await.unwrap();
        let before = get(&store, id).await.unwrap();

        let patch = ItemPatch {
            name: Some("hijacked".to_string()),
            ..ItemPatch::default()
        };
        assert!(matches!(
            update(&store, id, stranger, patch).await,
            Err(ItemError::Store(StoreError::Forbidden))
        ));
        assert!(matches!(
            mark_done(&store, id, stranger).await,
            Err(ItemError::Store(StoreError::Forbidden))
        ));
        assert!(matches!(
            delete(&store, id, stranger).await,
            Err(ItemError::Store(StoreError::Forbidden))
        ));

        assert_eq!(get(&store, id).await.unwrap(), before);
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let id = add(&store, owner, draft("task", 3)).await.unwrap();

        delete(&store, id, owner).await.unwrap();
        assert!(matches!(
            get(&store, id).await,
            Err(ItemError::Store(StoreError::NotFound))
        ));
    }
}

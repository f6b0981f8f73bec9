use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::models::{Item, ItemPatch};
use crate::repo::{ensure_owner, ItemStore, StoreError};

/// In-memory ItemStore for tests and local development.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: Arc<Mutex<Vec<Item>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ItemStore for MemoryStore {
    async fn insert(&self, item: Item) -> Result<(), StoreError> {
        self.items.lock().unwrap().push(item);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Item>, StoreError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == id)
            .cloned())
    }

    async fn list_owned(&self, owner_id: Uuid) -> Result<Vec<Item>, StoreError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn update(&self, id: Uuid, requester_id: Uuid, patch: ItemPatch) -> Result<(), StoreError> {
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(StoreError::NotFound)?;
        ensure_owner(item, requester_id)?;
        item.apply(patch);
        Ok(())
    }

    async fn mark_done(&self, id: Uuid, requester_id: Uuid) -> Result<(), StoreError> {
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(StoreError::NotFound)?;
        ensure_owner(item, requester_id)?;
        item.done = true;
        Ok(())
    }

    async fn delete(&self, id: Uuid, requester_id: Uuid) -> Result<(), StoreError> {
        let mut items = self.items.lock().unwrap();
        let pos = items
            .iter()
            .position(|i| i.id == id)
            .ok_or(StoreError::NotFound)?;
        ensure_owner(&items[pos], requester_id)?;
        items.remove(pos);
        Ok(())
    }
}

//! # Domain models for to-do items
//!
//! Defines the item record kept by every [`crate::ItemStore`] backend and the
//! two request payloads that feed it:
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Item`] | A stored to-do entry. Owned by exactly one user for its whole lifetime: `owner_id` is set at creation and never changes. |
//! | [`ItemDraft`] | A creation payload. `name` is required, `priority` defaults to 0, everything else is optional. |
//! | [`ItemPatch`] | A partial update. Absent fields leave the stored value untouched; present fields overwrite it. |
//!
//! Patch application lives here ([`Item::apply`]) so every backend mutates
//! items with the same semantics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single to-do entry owned by one user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub comment: Option<String>,
    pub priority: i32,
    pub due: Option<DateTime<Utc>>,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Create a new item owned by `owner_id` from a validated draft.
    pub fn new(owner_id: Uuid, draft: ItemDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            name: draft.name,
            comment: draft.comment,
            priority: draft.priority,
            due: draft.due,
            done: false,
            created_at: Utc::now(),
        }
    }

    /// Overwrite the fields present in `patch`; absent fields keep their value.
    pub fn apply(&mut self, patch: ItemPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(comment) = patch.comment {
            self.comment = Some(comment);
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due) = patch.due {
            self.due = Some(due);
        }
    }
}

/// Payload for creating an item.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub due: Option<DateTime<Utc>>,
}

/// Partial update for an item. `None` means "leave unchanged".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub due: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> ItemDraft {
        ItemDraft {
            name: name.to_string(),
            ..ItemDraft::default()
        }
    }

    #[test]
    fn new_item_defaults() {
        let owner = Uuid::new_v4();
        let item = Item::new(owner, draft("laundry"));

        assert_eq!(item.owner_id, owner);
        assert_eq!(item.name, "laundry");
        assert_eq!(item.priority, 0);
        assert!(item.comment.is_none());
        assert!(item.due.is_none());
        assert!(!item.done);
    }

    #[test]
    fn apply_overwrites_only_present_fields() {
        let mut item = Item::new(Uuid::new_v4(), draft("laundry"));
        item.comment = Some("whites only".to_string());

        item.apply(ItemPatch {
            priority: Some(7),
            ..ItemPatch::default()
        });

        assert_eq!(item.priority, 7);
        assert_eq!(item.name, "laundry");
        assert_eq!(item.comment.as_deref(), Some("whites only"));
    }

    #[test]
    fn apply_full_patch() {
        let mut item = Item::new(Uuid::new_v4(), draft("laundry"));
        let due = Utc::now();

        item.apply(ItemPatch {
            name: Some("dishes".to_string()),
            comment: Some("tonight".to_string()),
            priority: Some(3),
            due: Some(due),
        });

        assert_eq!(item.name, "dishes");
        assert_eq!(item.comment.as_deref(), Some("tonight"));
        assert_eq!(item.priority, 3);
        assert_eq!(item.due, Some(due));
    }
}

//! Field-level checks applied before anything reaches a store.

use thiserror::Error;

use crate::models::{ItemDraft, ItemPatch};

pub const PRIORITY_MIN: i32 = 0;
pub const PRIORITY_MAX: i32 = 10;

/// A payload field failed its constraint.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    MissingName,
    #[error("priority {0} is outside {PRIORITY_MIN}..={PRIORITY_MAX}")]
    PriorityOutOfRange(i32),
}

/// Check a creation payload: `name` present, `priority` in range.
pub fn check_draft(draft: &ItemDraft) -> Result<(), ValidationError> {
    if draft.name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    check_priority(draft.priority)
}

/// Check an update payload: only the fields that are present.
pub fn check_patch(patch: &ItemPatch) -> Result<(), ValidationError> {
    if let Some(name) = &patch.name {
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }
    }
    match patch.priority {
        Some(priority) => check_priority(priority),
        None => Ok(()),
    }
}

fn check_priority(priority: i32) -> Result<(), ValidationError> {
    if (PRIORITY_MIN..=PRIORITY_MAX).contains(&priority) {
        Ok(())
    } else {
        Err(ValidationError::PriorityOutOfRange(priority))
    }
}

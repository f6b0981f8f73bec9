//! # Listing order for a user's items
//!
//! Listing accepts a sort field and a legacy integer direction flag. The flag
//! keeps its historical meaning on the wire and is mapped to an explicit
//! [`SortOrder`] at the edge ([`SortOrder::from_flag`]):
//!
//! | flag | effect |
//! |------|--------|
//! | `0` | no sort — items come back in insertion order |
//! | `> 0` | sort descending |
//! | `< 0` | sort ascending |
//!
//! Sorting is stable: items with equal keys keep their insertion order.
//! An absent `due` timestamp uses `Option`'s total order, so unscheduled
//! items sort before every scheduled one ascending and after them descending.

use std::str::FromStr;

use thiserror::Error;

use crate::models::Item;

/// Field a listing can be ordered by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Priority,
    Due,
}

/// The requested sort field is not one of the sortable columns.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("cannot sort by `{0}`")]
pub struct UnknownSortField(pub String);

impl FromStr for SortField {
    type Err = UnknownSortField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "priority" => Ok(Self::Priority),
            "due" => Ok(Self::Due),
            other => Err(UnknownSortField(other.to_string())),
        }
    }
}

/// Direction of an explicitly requested sort.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Map the legacy direction flag; `None` keeps the store's natural order.
    pub fn from_flag(flag: i32) -> Option<Self> {
        match flag {
            0 => None,
            f if f > 0 => Some(Self::Descending),
            _ => Some(Self::Ascending),
        }
    }
}

/// Stable in-place sort of `items` by `field` in `order`.
pub fn sort_items(items: &mut [Item], field: SortField, order: SortOrder) {
    match (field, order) {
        (SortField::Priority, SortOrder::Ascending) => items.sort_by_key(|i| i.priority),
        (SortField::Priority, SortOrder::Descending) => {
            items.sort_by(|a, b| b.priority.cmp(&a.priority))
        }
        (SortField::Due, SortOrder::Ascending) => items.sort_by_key(|i| i.due),
        (SortField::Due, SortOrder::Descending) => items.sort_by(|a, b| b.due.cmp(&a.due)),
    }
}

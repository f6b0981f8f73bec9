pub mod models;
pub mod repo;
pub mod sort;
pub mod validate;

mod memory;
pub use memory::MemoryStore;

pub use models::{Item, ItemDraft, ItemPatch};
pub use repo::{ItemStore, StoreError};
pub use sort::{SortField, SortOrder};
pub use validate::ValidationError;

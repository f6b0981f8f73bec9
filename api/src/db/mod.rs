pub mod pool;

mod pg;
pub use pg::PgItems;
pub use pool::connect;

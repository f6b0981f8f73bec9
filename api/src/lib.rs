//! # Application services for the to-do service
//!
//! Everything the HTTP layer calls lives here, with no HTTP types in sight.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Local password authentication: registration, login, session identity lookup, Argon2id hashing |
//! | [`db`] | PostgreSQL connection pool construction and the Postgres-backed [`store::ItemStore`] |
//! | [`items`] | Item operations — create, list (with sort), fetch, update, mark done, delete — generic over the store backend |
//! | [`models`] | Database models (`User`) and their client-safe projections (`UserInfo`) |

pub mod auth;
pub mod db;
pub mod items;
pub mod models;

pub use models::user::{User, UserInfo};

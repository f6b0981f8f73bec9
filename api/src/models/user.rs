//! # User model for authenticated users
//!
//! Two representations of a registered user:
//!
//! - [`User`] — the complete row from the `users` table, loaded straight from
//!   queries via [`sqlx::FromRow`]. Carries the Argon2 `password_hash` and
//!   therefore never leaves the server. [`User::to_info`] projects it into
//!   the client-safe form.
//! - [`UserInfo`] — the subset that may cross to clients: id, email,
//!   username. No hash, no timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Full user record from the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Convert to UserInfo for client consumption.
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id,
            email: self.email.clone(),
            username: self.username.clone(),
        }
    }
}

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: Uuid,
    pub email: String,
    pub username: String,
}

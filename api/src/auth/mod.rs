//! # Local (email + password) authentication
//!
//! Registration, credential checks, and session identity lookup. Session
//! cookie plumbing belongs to the HTTP layer; this module only defines the
//! session key and the database side of the flow. The queries run inline
//! against the injected pool — there is no user-manager framework, just the
//! `users` table.

mod password;

pub use password::{hash_password, verify_password};

use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::models::user::{User, UserInfo};

/// Key for storing user ID in session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// Why an authentication operation failed.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email is already registered")]
    EmailTaken,
    #[error("invalid email or password")]
    BadCredentials,
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Registration payload.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Registration {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Login payload.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Create a user with a hashed password; the email must be unused.
pub async fn register(pool: &PgPool, registration: Registration) -> Result<UserInfo, AuthError> {
    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(&registration.email)
        .fetch_optional(pool)
        .await?;
    if existing.is_some() {
        return Err(AuthError::EmailTaken);
    }

    let user = User {
        id: Uuid::new_v4(),
        email: registration.email,
        username: registration.username,
        password_hash: hash_password(&registration.password).map_err(AuthError::Hash)?,
        created_at: chrono::Utc::now(),
    };

    sqlx::query(
        "INSERT INTO users (id, email, username, password_hash, created_at)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(user.id)
    .bind(&user.email)
    .bind(&user.username)
    .bind(&user.password_hash)
    .bind(user.created_at)
    .execute(pool)
    .await?;

    tracing::info!(user_id = %user.id, "user registered");
    Ok(user.to_info())
}

/// Check credentials and return the user on success.
pub async fn login(pool: &PgPool, credentials: &Credentials) -> Result<UserInfo, AuthError> {
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(&credentials.email)
        .fetch_optional(pool)
        .await?;
    let Some(user) = user else {
        return Err(AuthError::BadCredentials);
    };

    if !verify_password(&credentials.password, &user.password_hash).map_err(AuthError::Hash)? {
        return Err(AuthError::BadCredentials);
    }

    tracing::info!(user_id = %user.id, "user logged in");
    Ok(user.to_info())
}

/// Look up the user behind a session identity, if it still exists.
pub async fn user_info(pool: &PgPool, id: Uuid) -> Result<Option<UserInfo>, AuthError> {
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user.map(|u| u.to_info()))
}

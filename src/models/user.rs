//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Salted Argon2id hash, never the plaintext password
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email: String,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub is_staff: bool,
}

/// Account details supplied at registration, before the password is hashed
#[derive(Debug, Clone)]
pub struct NewUserAccount {
    pub username: String,
    pub password: String,
    pub email: String,
    pub is_staff: bool,
}

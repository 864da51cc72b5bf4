//! User repository implementation

use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::user::{CreateUserRequest, User};
use crate::utils::errors::EventDeskError;

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user
    ///
    /// A username or email collision maps to `DuplicateUser`.
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, EventDeskError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, email, is_staff, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, username, password_hash, email, is_staff, created_at
            "#,
        )
        .bind(&request.username)
        .bind(&request.password_hash)
        .bind(&request.email)
        .bind(request.is_staff)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &request.username))?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, EventDeskError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, email, is_staff, created_at FROM users WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, EventDeskError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, email, is_staff, created_at FROM users WHERE username = ?1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, EventDeskError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, email, is_staff, created_at FROM users WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

fn map_unique_violation(error: sqlx::Error, username: &str) -> EventDeskError {
    match &error {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            EventDeskError::DuplicateUser(username.to_string())
        }
        _ => EventDeskError::Database(error),
    }
}

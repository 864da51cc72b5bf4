//! Shared test helpers: embedded SQLite pools and seeded records

#![allow(dead_code)]

use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use EventDesk::database::{connection, DatabasePool, DatabaseService};
use EventDesk::models::{CreateEventRequest, CreateUserRequest, Event, User};
use EventDesk::services::{AuthService, Session};

/// Open a fresh in-memory store with the schema applied
pub async fn setup_test_db() -> DatabaseService {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(
            SqliteConnectOptions::new()
                .in_memory(true)
                .foreign_keys(true),
        )
        .await
        .expect("in-memory pool");

    connection::init_schema(&pool).await.expect("schema");
    DatabaseService::new(pool)
}

/// Open a file-backed store so multiple connections can race
pub async fn setup_file_db(path: &Path) -> (DatabaseService, DatabasePool) {
    let config = connection::DatabaseConfig {
        path: path.to_path_buf(),
        max_connections: 4,
        busy_timeout: Duration::from_secs(5),
        create_if_missing: true,
    };
    let pool = connection::create_pool(&config).await.expect("file pool");
    connection::init_schema(&pool).await.expect("schema");
    (DatabaseService::new(pool.clone()), pool)
}

pub fn auth_service(db: &DatabaseService) -> AuthService {
    AuthService::new(db.users.clone())
}

/// Insert a user directly, skipping the (slow) password hash
pub async fn seed_user(db: &DatabaseService, username: &str, is_staff: bool) -> User {
    db.users
        .create(CreateUserRequest {
            username: username.to_string(),
            password_hash: "unused-test-hash".to_string(),
            email: format!("{username}@example.com"),
            is_staff,
        })
        .await
        .expect("seed user")
}

pub fn session_for(user: &User) -> Session {
    Session {
        user_id: user.id,
        username: user.username.clone(),
        is_staff: user.is_staff,
    }
}

/// Create an event through the service, timed relative to now.
///
/// `start_offset_secs` may be negative for events already started or ended.
pub async fn seed_event(
    db: &DatabaseService,
    session: &Session,
    title: &str,
    start_offset_secs: i64,
    duration_secs: i64,
    max_participants: i64,
) -> Event {
    let start = Utc::now() + chrono::Duration::seconds(start_offset_secs);
    db.create_event(
        session,
        CreateEventRequest {
            title: title.to_string(),
            description: Some(format!("{title} description")),
            location: Some("Community hall".to_string()),
            start_time: start,
            end_time: start + chrono::Duration::seconds(duration_secs),
            organizer: String::new(),
            max_participants,
        },
    )
    .await
    .expect("seed event")
}

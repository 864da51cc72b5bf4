//! Error handling for EventDesk
//!
//! This module defines the main error type used throughout the application.
//! Registration failures are reported as distinct variants so callers can
//! show differentiated messages instead of a bare boolean.

use thiserror::Error;

/// Main error type for EventDesk operations
#[derive(Error, Debug)]
pub enum EventDeskError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i64 },

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: i64 },

    #[error("No registration for user {user_id} on event {event_id}")]
    RegistrationNotFound { event_id: i64, user_id: i64 },

    #[error("User {user_id} is already registered for event {event_id}")]
    AlreadyRegistered { event_id: i64, user_id: i64 },

    #[error("Event {event_id} has reached its maximum participants")]
    EventFull { event_id: i64 },

    #[error("Duplicate user: {0}")]
    DuplicateUser(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for EventDesk operations
pub type Result<T> = std::result::Result<T, EventDeskError>;

impl EventDeskError {
    /// True for errors caused by a record that does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            EventDeskError::UserNotFound { .. }
                | EventDeskError::EventNotFound { .. }
                | EventDeskError::RegistrationNotFound { .. }
        )
    }

    /// True for errors caused by a uniqueness conflict
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            EventDeskError::AlreadyRegistered { .. } | EventDeskError::DuplicateUser(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(EventDeskError::EventNotFound { event_id: 1 }.is_not_found());
        assert!(EventDeskError::AlreadyRegistered { event_id: 1, user_id: 2 }.is_conflict());
        assert!(!EventDeskError::EventFull { event_id: 1 }.is_conflict());
        assert!(!EventDeskError::EventFull { event_id: 1 }.is_not_found());
    }
}

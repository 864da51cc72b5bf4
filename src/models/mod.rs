//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod event;
pub mod registration;
pub mod user;

// Re-export commonly used models
pub use event::{
    CreateEventRequest, Event, EventSnapshot, StatusFilter, TimeFilter, UpdateEventRequest,
};
pub use registration::Registration;
pub use user::{CreateUserRequest, NewUserAccount, User};

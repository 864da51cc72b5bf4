//! EventDesk event management core
//!
//! A local event-management core: users browse, create, edit, and register
//! for events backed by an embedded SQLite store. This library provides the
//! data operations a presentation layer calls — registration with capacity
//! enforcement, composable event search, and account management — and
//! returns plain data, never callbacks.

#![allow(non_snake_case)]

pub mod config;
pub mod database;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{EventDeskError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::{AuthService, Session};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}

//! Database module
//!
//! This module handles database connections and operations

pub mod connection;
pub mod repositories;
pub mod service;

// Re-export commonly used database components
pub use connection::{
    create_pool, health_check, init_schema, DatabaseConfig, DatabasePool, SCHEMA_VERSION,
};
pub use repositories::{EventRepository, RegistrationRepository, UserRepository};
pub use service::DatabaseService;

//! Services module
//!
//! This module contains business logic services

pub mod auth;

// Re-export commonly used services
pub use auth::{AuthService, Session};

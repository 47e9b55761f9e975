//! Shared Module
//!
//! Types that carry no HTTP or database dependency: configuration, the
//! validation error type and user roles. The backend builds on these.

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// User roles
pub mod role;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::{FieldErrors, SharedError};
pub use role::Role;

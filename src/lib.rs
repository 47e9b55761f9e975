//! Profiles API - Main Library
//!
//! A small REST backend: user registration and token login, profile CRUD
//! with ownership checks, and a feed with role-gated posting and liking.
//!
//! # Module Structure
//!
//! - **`shared`** - Configuration, roles and the validation error type
//! - **`backend`** - axum server, SQLite persistence, handlers
//!
//! # Usage
//!
//! ```rust,no_run
//! use profiles_api::backend::server::init::create_app;
//! use profiles_api::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::builder()
//!     .jwt_secret("change-me")
//!     .database_url("sqlite::memory:")
//!     .build()?;
//! let app = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::SharedError` for validation failures
//! - `backend::error::BackendError` for everything a handler can return;
//!   it renders as `{"error": ..., "status": ...}`

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;

//! Server Module
//!
//! Initialization of the Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Database pool creation and migrations
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration**: the binary loads `AppConfig` (env, `.env`, or TOML)
//! 2. **Database**: SQLite pool is opened and migrated
//! 3. **State**: pool, token service and config go into `AppState`
//! 4. **Router**: routes, auth middleware and tracing layer are assembled
//!
//! # Example
//!
//! ```rust,no_run
//! use profiles_api::backend::server::create_app;
//! use profiles_api::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::builder().jwt_secret("change-me").build()?;
//! let app = create_app(config).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Database bootstrap
pub mod config;

/// Server initialization
pub mod init;

pub use init::create_app;
pub use state::AppState;

//! Backend Module
//!
//! All server-side code: an axum HTTP server over a SQLite store that
//! provides user registration and login, profile CRUD, and a feed where
//! teachers publish posts and students like them.
//!
//! # Architecture
//!
//! - **`server`** - Application state, database bootstrap, app creation
//! - **`routes`** - Route configuration and router assembly
//! - **`auth`** - Users, password hashing, tokens, login
//! - **`middleware`** - Bearer token authentication
//! - **`profiles`** - Profile endpoints and validation
//! - **`feeds`** - Feed store and feed endpoints
//! - **`error`** - Backend error type and its HTTP rendering
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! ├── profiles/       - /profile/ endpoints
//! ├── feeds/          - /feeds/ endpoints
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds the connection pool, the token service and the
//! configuration. Handlers take only the piece they need through
//! `State<SqlitePool>`, `State<TokenService>` or `State<Arc<AppConfig>>`.
//! Nothing else is shared between requests; concurrent like toggles are
//! serialized by the database transaction.

/// Server initialization and state
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication
pub mod auth;

/// Request middleware
pub mod middleware;

/// Profile endpoints
pub mod profiles;

/// Feed endpoints
pub mod feeds;

/// Error types
pub mod error;

//! Authentication Module
//!
//! User records, password hashing, bearer tokens and the login endpoint.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── passwords.rs    - bcrypt hashing and verification
//! ├── sessions.rs     - Token issue and verification
//! └── handlers/       - HTTP handlers (login)
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: `POST /profile/` stores the user with a bcrypt hash
//! 2. **Login**: `POST /login/` checks the password and returns a signed token
//! 3. **Requests**: the auth middleware verifies `Authorization: Bearer <token>`,
//!    loads the user and attaches it to the request
//!
//! Tokens are stateless and expire after the configured lifetime (two hours
//! by default). There is no revocation.

/// User data model and database operations
pub mod users;

/// Password hashing
pub mod passwords;

/// Token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::login;
pub use handlers::types::{LoginRequest, LoginResponse, UserResponse};
pub use sessions::{Claims, TokenError, TokenService};
pub use users::User;

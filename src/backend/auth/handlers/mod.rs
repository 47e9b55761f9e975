//! Authentication Handlers Module
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports
//! ├── types.rs    - Request and response types
//! └── login.rs    - POST /login/
//! ```
//!
//! Registration lives with the profile endpoints (`POST /profile/`).

/// Request and response types
pub mod types;

/// Login handler
pub mod login;

pub use login::login;
pub use types::{LoginRequest, LoginResponse, UserResponse};

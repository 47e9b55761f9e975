//! Profiles Module
//!
//! Registration and CRUD over user accounts.
//!
//! ```text
//! profiles/
//! ├── mod.rs         - Module exports
//! ├── validation.rs  - Field rules and email normalization
//! └── handlers.rs    - HTTP handlers for /profile/
//! ```

pub mod validation;
pub mod handlers;

pub use handlers::{
    create_profile, delete_profile, get_profile, list_profiles, partial_update_profile,
    update_profile, MessageResponse, ProfileResponse,
};
pub use validation::{normalize_email, ProfilePayload};

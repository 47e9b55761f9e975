//! Route Configuration Module
//!
//! Assembles every HTTP route of the backend into one axum `Router`.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Router creation, middleware layers, fallback
//! ├── api_routes.rs   - Profile and login routes
//! └── feed_routes.rs  - Feed and like routes
//! ```
//!
//! # Routes
//!
//! | Method | Path                | Auth                    |
//! |--------|---------------------|-------------------------|
//! | GET    | `/profile/`         | optional                |
//! | POST   | `/profile/`         | none                    |
//! | GET    | `/profile/{id}/`    | optional                |
//! | PUT    | `/profile/{id}/`    | required, self only     |
//! | PATCH  | `/profile/{id}/`    | required, self only     |
//! | DELETE | `/profile/{id}/`    | required, self only     |
//! | POST   | `/login/`           | none                    |
//! | GET    | `/feeds/`           | required                |
//! | POST   | `/feeds/`           | required, teacher only  |
//! | POST   | `/feeds/{id}/like/` | required, student only  |
//!
//! The auth middleware runs on every route; whether a missing identity is
//! acceptable is decided by each handler's extractor.

/// Main router creation
pub mod router;

/// Profile and login routes
pub mod api_routes;

/// Feed routes
pub mod feed_routes;

pub use router::create_router;

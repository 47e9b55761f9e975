//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! - **`auth`** - resolves bearer tokens to users and exposes them to handlers

pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser, MaybeAuthUser};

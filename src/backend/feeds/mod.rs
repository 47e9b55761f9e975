//! Feeds Module
//!
//! Teachers publish posts; students like and unlike them.
//!
//! ```text
//! feeds/
//! ├── mod.rs       - Module exports
//! ├── types.rs     - Post, list item and request/response types
//! ├── db.rs        - Feed store (posts and the liked-by join table)
//! └── handlers.rs  - HTTP handlers for /feeds/
//! ```

pub mod types;
pub mod db;
pub mod handlers;

pub use handlers::{create_feed, list_feeds, toggle_like};
pub use types::{CreateFeedRequest, Feed, FeedItem, LikeAction, LikeToggleResponse};

/**
 * Feed Types
 *
 * Stored posts, the list view with aggregate like counts, and the
 * request/response bodies of the feed endpoints.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::{FieldErrors, SharedError};

pub const MAX_TEXT_LENGTH: usize = 1000;
pub const MAX_IMAGE_LENGTH: usize = 100;

/// A post as stored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Feed {
    pub id: Uuid,
    /// Author
    pub user_id: Uuid,
    pub text: Option<String>,
    /// Image reference (path or URL), not the image itself
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post as listed, annotated with its author and like count
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub author_name: String,
    pub text: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub likes_count: i64,
}

/// Body of `POST /feeds/`
///
/// Author and timestamps are assigned by the server; unknown fields such
/// as `user_id` are ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CreateFeedRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl CreateFeedRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        let mut errors = FieldErrors::new();

        if let Some(text) = &self.text {
            if text.chars().count() > MAX_TEXT_LENGTH {
                errors.entry("text".to_string()).or_default().push(format!(
                    "Ensure this field has no more than {} characters.",
                    MAX_TEXT_LENGTH
                ));
            }
        }
        if let Some(image) = &self.image {
            if image.chars().count() > MAX_IMAGE_LENGTH {
                errors.entry("image".to_string()).or_default().push(format!(
                    "Ensure this field has no more than {} characters.",
                    MAX_IMAGE_LENGTH
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SharedError::validation_errors(errors))
        }
    }
}

/// What a like toggle did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeAction {
    Liked,
    Unliked,
}

/// Body returned by `POST /feeds/{id}/like/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LikeToggleResponse {
    pub action: LikeAction,
    /// Count after the toggle
    pub likes_count: i64,
}

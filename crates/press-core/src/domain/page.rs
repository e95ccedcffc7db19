use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PostStatus;

/// Page entity - static site content (about, contact, landing pages).
///
/// Pages form a shallow hierarchy through `parent_id` and are ordered
/// explicitly within their level. They share the post status lifecycle
/// but have no category or tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: Uuid,
    pub author_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub template: Option<String>,
    pub status: PostStatus,
    pub order: i32,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Page {
    /// Create a new draft page at the end of the root level.
    pub fn new(author_id: Uuid, title: String, slug: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            parent_id: None,
            title,
            slug,
            content,
            excerpt: None,
            template: None,
            status: PostStatus::Draft,
            order: 0,
            published_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

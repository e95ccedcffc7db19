use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// SEO metadata attached to exactly one post or one page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeoMetadata {
    pub id: Uuid,
    pub post_id: Option<Uuid>,
    pub page_id: Option<Uuid>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub og_title: Option<String>,
    pub og_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The editable SEO fields, as submitted with a content save.
#[derive(Debug, Clone, Default)]
pub struct SeoDraft {
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub og_title: Option<String>,
    pub og_image: Option<String>,
}

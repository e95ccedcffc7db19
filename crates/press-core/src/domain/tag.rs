use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::slug;

/// Tag entity - a free-form label attached to posts.
///
/// Tags are created lazily the first time a post references an unknown
/// name, and only removed by an explicit admin action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tag {
    pub fn new(name: String, slug: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            slug,
            color: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A tag as submitted with a post save, before it is resolved against
/// storage. The slug is always derived from the name, never taken from
/// the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDraft {
    pub name: String,
    pub slug: String,
}

impl TagDraft {
    /// Build a draft from a submitted name. Returns `None` when the name
    /// normalizes to nothing.
    pub fn new(name: &str) -> Option<Self> {
        let slug = slug::normalize(name);
        if slug.is_empty() {
            return None;
        }
        Some(Self {
            name: name.trim().to_string(),
            slug,
        })
    }

    /// Turn submitted names into drafts, dropping unusable names and
    /// de-duplicating by derived slug. The first occurrence of a slug
    /// keeps its display name, so `["React", "react"]` yields a single
    /// draft named "React".
    pub fn dedupe<'a, I>(names: I) -> Vec<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut drafts: Vec<Self> = Vec::new();
        for name in names {
            let Some(draft) = Self::new(name) else {
                continue;
            };
            if drafts.iter().any(|d| d.slug == draft.slug) {
                continue;
            }
            drafts.push(draft);
        }
        drafts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_derives_slug_from_name() {
        let draft = TagDraft::new("Growth Hacking").unwrap();
        assert_eq!(draft.name, "Growth Hacking");
        assert_eq!(draft.slug, "growth-hacking");
    }

    #[test]
    fn unusable_names_are_rejected() {
        assert!(TagDraft::new("***").is_none());
        assert!(TagDraft::new("").is_none());
    }

    #[test]
    fn dedupe_collapses_case_variants() {
        let drafts = TagDraft::dedupe(["React", "react"]);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].name, "React");
        assert_eq!(drafts[0].slug, "react");
    }

    #[test]
    fn dedupe_preserves_submission_order() {
        let drafts = TagDraft::dedupe(["News", "Tutorial", "news", "Rust"]);
        let slugs: Vec<&str> = drafts.iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(slugs, ["news", "tutorial", "rust"]);
    }

    #[test]
    fn dedupe_of_empty_list_is_empty() {
        let names: [&str; 0] = [];
        assert!(TagDraft::dedupe(names).is_empty());
    }
}

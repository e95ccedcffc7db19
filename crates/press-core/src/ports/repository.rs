use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    Category, Page, Post, PostStatus, SeoDraft, SeoMetadata, Tag, TagDraft, User,
};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
///
/// `create` and `update` are separate on purpose: ids are generated by
/// the domain, so the storage layer cannot infer intent from a missing
/// primary key.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn create(&self, entity: T) -> Result<T, RepoError>;

    /// Update an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Filters for the post listing.
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    pub page: u64,
    pub per_page: u64,
    pub status: Option<PostStatus>,
    pub category_id: Option<Uuid>,
    pub tag_slug: Option<String>,
    pub search: Option<String>,
}

/// Filters for the page listing.
#[derive(Debug, Clone, Default)]
pub struct PageQuery {
    pub page: u64,
    pub per_page: u64,
    pub status: Option<PostStatus>,
    pub search: Option<String>,
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// All users, newest first.
    async fn list(&self) -> Result<Vec<User>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Filtered page of posts plus the total match count.
    /// Ordered sticky-first, then by publish/creation date, newest first.
    async fn list(&self, query: &PostQuery) -> Result<(Vec<Post>, u64), RepoError>;

    /// Slugs of posts starting with `prefix`, optionally excluding one
    /// record (so editing a post does not collide with itself).
    async fn find_slugs_with_prefix(
        &self,
        prefix: &str,
        exclude: Option<Uuid>,
    ) -> Result<Vec<String>, RepoError>;

    /// Replace the post's tag associations so they match `drafts`
    /// exactly, creating missing tags on the way. Runs as one
    /// transaction; an empty draft list removes every association.
    /// Returns the resolved tags in draft order.
    async fn set_tags(&self, post_id: Uuid, drafts: Vec<TagDraft>) -> Result<Vec<Tag>, RepoError>;
}

/// Page repository.
#[async_trait]
pub trait PageRepository: BaseRepository<Page, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Page>, RepoError>;

    /// Filtered page of pages plus the total match count.
    /// Ordered by explicit order, then title.
    async fn list(&self, query: &PageQuery) -> Result<(Vec<Page>, u64), RepoError>;

    async fn find_slugs_with_prefix(
        &self,
        prefix: &str,
        exclude: Option<Uuid>,
    ) -> Result<Vec<String>, RepoError>;

    /// Direct children of a page, in display order.
    async fn children_of(&self, page_id: Uuid) -> Result<Vec<Page>, RepoError>;
}

/// Tag repository.
#[async_trait]
pub trait TagRepository: BaseRepository<Tag, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError>;

    /// Tags ordered by name, optionally filtered by a substring of the
    /// name or slug, capped at `limit`.
    async fn list(&self, search: Option<&str>, limit: u64) -> Result<Vec<Tag>, RepoError>;

    /// Tags attached to a post, ordered by name.
    async fn find_for_post(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError>;

    /// Number of posts carrying this tag.
    async fn post_count(&self, tag_id: Uuid) -> Result<u64, RepoError>;

    /// A tag whose name or slug collides with the given values,
    /// excluding one record when editing.
    async fn find_conflicting(
        &self,
        name: &str,
        slug: &str,
        exclude: Option<Uuid>,
    ) -> Result<Option<Tag>, RepoError>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError>;

    /// All categories ordered by name.
    async fn list(&self) -> Result<Vec<Category>, RepoError>;

    /// Number of posts filed under this category.
    async fn post_count(&self, category_id: Uuid) -> Result<u64, RepoError>;

    async fn find_conflicting(
        &self,
        name: &str,
        slug: &str,
        exclude: Option<Uuid>,
    ) -> Result<Option<Category>, RepoError>;
}

/// SEO metadata repository. Records are keyed by their owning post or
/// page; deletion rides on the owner's cascade.
#[async_trait]
pub trait SeoMetadataRepository: Send + Sync {
    async fn find_for_post(&self, post_id: Uuid) -> Result<Option<SeoMetadata>, RepoError>;

    async fn find_for_page(&self, page_id: Uuid) -> Result<Option<SeoMetadata>, RepoError>;

    /// Create or update the record attached to a post.
    async fn upsert_for_post(
        &self,
        post_id: Uuid,
        draft: SeoDraft,
    ) -> Result<SeoMetadata, RepoError>;

    /// Create or update the record attached to a page.
    async fn upsert_for_page(
        &self,
        page_id: Uuid,
        draft: SeoDraft,
    ) -> Result<SeoMetadata, RepoError>;
}

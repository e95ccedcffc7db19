//! Post CRUD handlers. Saves run the slug fallback, tag reconciliation
//! and SEO upsert described by the editors' workflow: the client is
//! expected to have called the slug check endpoint first, and the
//! unique index turns any remaining race into a 409.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use press_core::domain::{Post, PostStatus, SeoDraft, TagDraft};
use press_core::ports::PostQuery;
use press_core::slug;
use press_shared::Paginated;
use press_shared::dto::{
    CategorySummary, PostListQuery, PostResponse, SavePostRequest, SeoMetadataPayload,
    SeoMetadataResponse, TagSummary,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: u64 = 10;
const MAX_PAGE_SIZE: u64 = 100;

pub(super) fn parse_status(value: &str) -> Result<PostStatus, AppError> {
    PostStatus::parse(value)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown status '{value}'")))
}

/// Use the client slug when it is present and well-formed, derive one
/// from the title otherwise.
pub(super) fn resolve_slug(requested: Option<String>, title: &str) -> Result<String, AppError> {
    match requested {
        Some(s) if !s.trim().is_empty() => {
            let s = s.trim().to_string();
            if !slug::is_valid(&s) {
                return Err(AppError::BadRequest(format!("Invalid slug '{s}'")));
            }
            Ok(s)
        }
        _ => Ok(slug::normalize_or_generated(title)),
    }
}

pub(super) fn seo_response(seo: press_core::domain::SeoMetadata) -> SeoMetadataResponse {
    SeoMetadataResponse {
        id: seo.id,
        meta_title: seo.meta_title,
        meta_description: seo.meta_description,
        meta_keywords: seo.meta_keywords,
        og_title: seo.og_title,
        og_image: seo.og_image,
    }
}

pub(super) fn seo_draft(payload: SeoMetadataPayload) -> SeoDraft {
    SeoDraft {
        meta_title: payload.meta_title,
        meta_description: payload.meta_description,
        meta_keywords: payload.meta_keywords,
        og_title: payload.og_title,
        og_image: payload.og_image,
    }
}

/// Assemble the full response shape: the post plus its category, tags
/// and SEO record.
pub(super) async fn post_response(state: &AppState, post: Post) -> AppResult<PostResponse> {
    let category = match post.category_id {
        Some(id) => state
            .categories
            .find_by_id(id)
            .await?
            .map(|c| CategorySummary {
                id: c.id,
                name: c.name,
                slug: c.slug,
            }),
        None => None,
    };

    let tags = state
        .tags
        .find_for_post(post.id)
        .await?
        .into_iter()
        .map(|t| TagSummary {
            id: t.id,
            name: t.name,
            slug: t.slug,
            color: t.color,
        })
        .collect();

    let seo_metadata = state.seo.find_for_post(post.id).await?.map(seo_response);

    Ok(PostResponse {
        id: post.id,
        author_id: post.author_id,
        title: post.title,
        slug: post.slug,
        content: post.content,
        excerpt: post.excerpt,
        featured_image: post.featured_image,
        status: post.status.as_str().to_string(),
        sticky: post.sticky,
        published_at: post.published_at,
        category,
        tags,
        seo_metadata,
        created_at: post.created_at,
        updated_at: post.updated_at,
    })
}

/// GET /api/posts
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<PostListQuery>,
) -> AppResult<HttpResponse> {
    let q = query.into_inner();

    let status = match q.status.as_deref() {
        None | Some("all") => None,
        Some(value) => Some(parse_status(value)?),
    };

    let repo_query = PostQuery {
        page: q.page.unwrap_or(1).max(1),
        per_page: q.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        status,
        category_id: q.category_id,
        tag_slug: q.tag,
        search: q.search,
    };

    let (posts, total) = state.posts.list(&repo_query).await?;

    let mut items = Vec::with_capacity(posts.len());
    for post in posts {
        items.push(post_response(&state, post).await?);
    }

    Ok(HttpResponse::Ok().json(Paginated::new(
        items,
        repo_query.page,
        repo_query.per_page,
        total,
    )))
}

/// GET /api/posts/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {id} not found")))?;

    Ok(HttpResponse::Ok().json(post_response(&state, post).await?))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<SavePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }

    let slug = resolve_slug(req.slug, &req.title)?;

    let mut post = Post::new(identity.user_id, req.title, slug, req.content);
    post.excerpt = req.excerpt;
    post.featured_image = req.featured_image;
    post.category_id = req.category_id;
    post.sticky = req.sticky.unwrap_or(false);
    post.published_at = req.published_at;
    if let Some(status) = req.status.as_deref() {
        post.status = parse_status(status)?;
    }

    let saved = state.posts.create(post).await?;

    // Reconcile tag associations; duplicates collapse before storage is
    // touched
    let drafts = TagDraft::dedupe(req.tags.iter().map(|t| t.name.as_str()));
    state.posts.set_tags(saved.id, drafts).await?;

    if let Some(payload) = req.seo_metadata {
        state.seo.upsert_for_post(saved.id, seo_draft(payload)).await?;
    }

    tracing::info!(post_id = %saved.id, slug = %saved.slug, "Post created");

    Ok(HttpResponse::Created().json(post_response(&state, saved).await?))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<SavePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }

    let mut post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {id} not found")))?;

    // Slugs never change behind an author's back: only an explicit
    // value in the payload replaces the stored one
    if let Some(slug) = req.slug.filter(|s| !s.trim().is_empty()) {
        post.slug = resolve_slug(Some(slug), &req.title)?;
    }
    post.title = req.title;
    post.content = req.content;
    post.excerpt = req.excerpt;
    post.featured_image = req.featured_image;
    post.category_id = req.category_id;
    post.sticky = req.sticky.unwrap_or(post.sticky);
    post.published_at = req.published_at;
    if let Some(status) = req.status.as_deref() {
        post.status = parse_status(status)?;
    }
    post.updated_at = chrono::Utc::now();

    let saved = state.posts.update(post).await?;

    let drafts = TagDraft::dedupe(req.tags.iter().map(|t| t.name.as_str()));
    state.posts.set_tags(saved.id, drafts).await?;

    if let Some(payload) = req.seo_metadata {
        state.seo.upsert_for_post(saved.id, seo_draft(payload)).await?;
    }

    Ok(HttpResponse::Ok().json(post_response(&state, saved).await?))
}

/// DELETE /api/posts/{id}
///
/// Associations and SEO metadata ride on the foreign-key cascades.
pub async fn delete(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state.posts.delete(id).await?;

    tracing::info!(post_id = %id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}

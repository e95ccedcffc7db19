//! Tag management handlers. Tags created here get explicit slugs and
//! colors; the ones created lazily during post saves arrive through the
//! reconciler instead.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use press_core::domain::Tag;
use press_core::slug;
use press_shared::dto::{SaveTagRequest, TagResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const DEFAULT_LIST_LIMIT: u64 = 50;

#[derive(Debug, Deserialize)]
pub struct TagListQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub limit: Option<u64>,
}

async fn tag_response(state: &AppState, tag: Tag) -> AppResult<TagResponse> {
    let post_count = state.tags.post_count(tag.id).await?;

    Ok(TagResponse {
        id: tag.id,
        name: tag.name,
        slug: tag.slug,
        color: tag.color,
        post_count,
    })
}

/// Derive or validate the slug for an explicitly managed tag/category.
pub(super) fn taxonomy_slug(requested: Option<String>, name: &str) -> Result<String, AppError> {
    match requested {
        Some(s) if !s.trim().is_empty() => {
            let s = s.trim().to_string();
            if !slug::is_valid(&s) {
                return Err(AppError::BadRequest(format!("Invalid slug '{s}'")));
            }
            Ok(s)
        }
        _ => {
            let derived = slug::normalize(name);
            if derived.is_empty() {
                return Err(AppError::BadRequest(
                    "Name does not produce a usable slug".to_string(),
                ));
            }
            Ok(derived)
        }
    }
}

/// GET /api/tags
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<TagListQuery>,
) -> AppResult<HttpResponse> {
    let q = query.into_inner();

    let tags = state
        .tags
        .list(q.search.as_deref(), q.limit.unwrap_or(DEFAULT_LIST_LIMIT))
        .await?;

    let mut items = Vec::with_capacity(tags.len());
    for tag in tags {
        items.push(tag_response(&state, tag).await?);
    }

    Ok(HttpResponse::Ok().json(items))
}

/// GET /api/tags/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let tag = state
        .tags
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Tag {id} not found")))?;

    Ok(HttpResponse::Ok().json(tag_response(&state, tag).await?))
}

/// POST /api/tags
pub async fn create(
    state: web::Data<AppState>,
    _identity: Identity,
    body: web::Json<SaveTagRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }

    let name = req.name.trim().to_string();
    let slug = taxonomy_slug(req.slug, &name)?;

    if let Some(existing) = state.tags.find_conflicting(&name, &slug, None).await? {
        return Err(AppError::Conflict(format!(
            "Tag with this name or slug already exists: {}",
            existing.name
        )));
    }

    let mut tag = Tag::new(name, slug);
    tag.color = req.color;

    let saved = state.tags.create(tag).await?;

    Ok(HttpResponse::Created().json(tag_response(&state, saved).await?))
}

/// PUT /api/tags/{id}
pub async fn update(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<SaveTagRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }

    let mut tag = state
        .tags
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Tag {id} not found")))?;

    let name = req.name.trim().to_string();
    let slug = taxonomy_slug(req.slug, &name)?;

    if let Some(existing) = state.tags.find_conflicting(&name, &slug, Some(id)).await? {
        return Err(AppError::Conflict(format!(
            "Tag with this name or slug already exists: {}",
            existing.name
        )));
    }

    tag.name = name;
    tag.slug = slug;
    tag.color = req.color;
    tag.updated_at = chrono::Utc::now();

    let saved = state.tags.update(tag).await?;

    Ok(HttpResponse::Ok().json(tag_response(&state, saved).await?))
}

/// DELETE /api/tags/{id}
///
/// Associations are removed by the foreign-key cascade.
pub async fn delete(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state.tags.delete(id).await?;

    tracing::info!(tag_id = %id, "Tag deleted");

    Ok(HttpResponse::NoContent().finish())
}

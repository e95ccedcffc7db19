//! Page CRUD handlers. Pages share the post save flow minus taxonomy:
//! slug fallback, SEO upsert, plus parent/children hierarchy.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use press_core::domain::Page;
use press_core::ports::PageQuery;
use press_shared::Paginated;
use press_shared::dto::{PageListQuery, PageResponse, PageSummary, SavePageRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

use super::posts::{parse_status, resolve_slug, seo_draft, seo_response};

const DEFAULT_PAGE_SIZE: u64 = 10;
const MAX_PAGE_SIZE: u64 = 100;

fn summary(page: &Page) -> PageSummary {
    PageSummary {
        id: page.id,
        title: page.title.clone(),
        slug: page.slug.clone(),
        order: page.order,
    }
}

pub(super) async fn page_response(state: &AppState, page: Page) -> AppResult<PageResponse> {
    let parent = match page.parent_id {
        Some(id) => state.pages.find_by_id(id).await?.map(|p| summary(&p)),
        None => None,
    };

    let children = state
        .pages
        .children_of(page.id)
        .await?
        .iter()
        .map(summary)
        .collect();

    let seo_metadata = state.seo.find_for_page(page.id).await?.map(seo_response);

    Ok(PageResponse {
        id: page.id,
        author_id: page.author_id,
        parent_id: page.parent_id,
        title: page.title,
        slug: page.slug,
        content: page.content,
        excerpt: page.excerpt,
        template: page.template,
        status: page.status.as_str().to_string(),
        order: page.order,
        published_at: page.published_at,
        parent,
        children,
        seo_metadata,
        created_at: page.created_at,
        updated_at: page.updated_at,
    })
}

/// GET /api/pages
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<PageListQuery>,
) -> AppResult<HttpResponse> {
    let q = query.into_inner();

    let status = match q.status.as_deref() {
        None | Some("all") => None,
        Some(value) => Some(parse_status(value)?),
    };

    let repo_query = PageQuery {
        page: q.page.unwrap_or(1).max(1),
        per_page: q.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        status,
        search: q.search,
    };

    let (pages, total) = state.pages.list(&repo_query).await?;

    let mut items = Vec::with_capacity(pages.len());
    for page in pages {
        items.push(page_response(&state, page).await?);
    }

    Ok(HttpResponse::Ok().json(Paginated::new(
        items,
        repo_query.page,
        repo_query.per_page,
        total,
    )))
}

/// GET /api/pages/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let page = state
        .pages
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Page {id} not found")))?;

    Ok(HttpResponse::Ok().json(page_response(&state, page).await?))
}

/// POST /api/pages
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<SavePageRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }

    let slug = resolve_slug(req.slug, &req.title)?;

    let mut page = Page::new(identity.user_id, req.title, slug, req.content);
    page.excerpt = req.excerpt;
    page.template = req.template;
    page.parent_id = req.parent_id;
    page.order = req.order.unwrap_or(0);
    page.published_at = req.published_at;
    if let Some(status) = req.status.as_deref() {
        page.status = parse_status(status)?;
    }

    let saved = state.pages.create(page).await?;

    if let Some(payload) = req.seo_metadata {
        state.seo.upsert_for_page(saved.id, seo_draft(payload)).await?;
    }

    tracing::info!(page_id = %saved.id, slug = %saved.slug, "Page created");

    Ok(HttpResponse::Created().json(page_response(&state, saved).await?))
}

/// PUT /api/pages/{id}
pub async fn update(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<SavePageRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }

    let mut page = state
        .pages
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Page {id} not found")))?;

    if req.parent_id == Some(id) {
        return Err(AppError::BadRequest(
            "A page cannot be its own parent".to_string(),
        ));
    }

    if let Some(slug) = req.slug.filter(|s| !s.trim().is_empty()) {
        page.slug = resolve_slug(Some(slug), &req.title)?;
    }
    page.title = req.title;
    page.content = req.content;
    page.excerpt = req.excerpt;
    page.template = req.template;
    page.parent_id = req.parent_id;
    page.order = req.order.unwrap_or(page.order);
    page.published_at = req.published_at;
    if let Some(status) = req.status.as_deref() {
        page.status = parse_status(status)?;
    }
    page.updated_at = chrono::Utc::now();

    let saved = state.pages.update(page).await?;

    if let Some(payload) = req.seo_metadata {
        state.seo.upsert_for_page(saved.id, seo_draft(payload)).await?;
    }

    Ok(HttpResponse::Ok().json(page_response(&state, saved).await?))
}

/// DELETE /api/pages/{id}
pub async fn delete(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state.pages.delete(id).await?;

    tracing::info!(page_id = %id, "Page deleted");

    Ok(HttpResponse::NoContent().finish())
}

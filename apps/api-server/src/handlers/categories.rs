//! Category management handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use press_core::domain::Category;
use press_shared::dto::{CategoryResponse, SaveCategoryRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

use super::tags::taxonomy_slug;

async fn category_response(state: &AppState, category: Category) -> AppResult<CategoryResponse> {
    let post_count = state.categories.post_count(category.id).await?;

    Ok(CategoryResponse {
        id: category.id,
        name: category.name,
        slug: category.slug,
        description: category.description,
        color: category.color,
        post_count,
    })
}

/// GET /api/categories
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.categories.list().await?;

    let mut items = Vec::with_capacity(categories.len());
    for category in categories {
        items.push(category_response(&state, category).await?);
    }

    Ok(HttpResponse::Ok().json(items))
}

/// GET /api/categories/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let category = state
        .categories
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category {id} not found")))?;

    Ok(HttpResponse::Ok().json(category_response(&state, category).await?))
}

/// POST /api/categories
pub async fn create(
    state: web::Data<AppState>,
    _identity: Identity,
    body: web::Json<SaveCategoryRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }

    let name = req.name.trim().to_string();
    let slug = taxonomy_slug(req.slug, &name)?;

    if let Some(existing) = state
        .categories
        .find_conflicting(&name, &slug, None)
        .await?
    {
        return Err(AppError::Conflict(format!(
            "Category with this name or slug already exists: {}",
            existing.name
        )));
    }

    let mut category = Category::new(name, slug);
    category.description = req.description;
    category.color = req.color;

    let saved = state.categories.create(category).await?;

    Ok(HttpResponse::Created().json(category_response(&state, saved).await?))
}

/// PUT /api/categories/{id}
pub async fn update(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<SaveCategoryRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }

    let mut category = state
        .categories
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category {id} not found")))?;

    let name = req.name.trim().to_string();
    let slug = taxonomy_slug(req.slug, &name)?;

    if let Some(existing) = state
        .categories
        .find_conflicting(&name, &slug, Some(id))
        .await?
    {
        return Err(AppError::Conflict(format!(
            "Category with this name or slug already exists: {}",
            existing.name
        )));
    }

    category.name = name;
    category.slug = slug;
    category.description = req.description;
    category.color = req.color;
    category.updated_at = chrono::Utc::now();

    let saved = state.categories.update(category).await?;

    Ok(HttpResponse::Ok().json(category_response(&state, saved).await?))
}

/// DELETE /api/categories/{id}
///
/// Posts keep existing; their category is nulled by the foreign key.
pub async fn delete(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state.categories.delete(id).await?;

    tracing::info!(category_id = %id, "Category deleted");

    Ok(HttpResponse::NoContent().finish())
}

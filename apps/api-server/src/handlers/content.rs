//! Public permalink resolution.
//!
//! Posts and pages may share a slug value; the public router
//! disambiguates by trying published posts first, then pages.

use actix_web::{HttpResponse, web};

use press_core::domain::PostStatus;
use press_shared::dto::ContentResponse;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

use super::pages::page_response;
use super::posts::post_response;

/// GET /api/content/{slug}
pub async fn resolve(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();

    if let Some(post) = state.posts.find_by_slug(&slug).await? {
        if post.status == PostStatus::Published {
            let body = ContentResponse::Post(post_response(&state, post).await?);
            return Ok(HttpResponse::Ok().json(body));
        }
    }

    if let Some(page) = state.pages.find_by_slug(&slug).await? {
        if page.status == PostStatus::Published {
            let body = ContentResponse::Page(page_response(&state, page).await?);
            return Ok(HttpResponse::Ok().json(body));
        }
    }

    Err(AppError::NotFound(format!("No content at '{slug}'")))
}

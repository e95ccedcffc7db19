//! Slug check endpoint consumed by the post/page editors.

use std::collections::HashSet;

use actix_web::{HttpResponse, web};

use press_core::slug;
use press_shared::dto::{ContentKind, SlugCheckRequest, SlugCheckResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/slugs/check
///
/// Normalizes the submitted text and resolves it against the slugs
/// already used by the same content type, excluding the record being
/// edited. The result is a suggestion: the unique index still has the
/// final word when the save lands.
pub async fn check(
    state: web::Data<AppState>,
    _identity: Identity,
    body: web::Json<SlugCheckRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.text.trim().is_empty() {
        return Err(AppError::BadRequest("Text is required".to_string()));
    }

    let base = slug::normalize_or_generated(&req.text);

    let existing: HashSet<String> = match req.kind {
        ContentKind::Post => {
            state
                .posts
                .find_slugs_with_prefix(&base, req.current_id)
                .await?
        }
        ContentKind::Page => {
            state
                .pages
                .find_slugs_with_prefix(&base, req.current_id)
                .await?
        }
    }
    .into_iter()
    .collect();

    let resolved = slug::ensure_unique(&base, &existing);
    let is_unique = resolved == base;

    // Alternatives are editor-facing hints only; they are not checked
    // for uniqueness themselves
    let suggestions = if existing.is_empty() {
        Vec::new()
    } else {
        vec![
            resolved.clone(),
            format!("{base}-2"),
            format!("{base}-alternative"),
        ]
    };

    Ok(HttpResponse::Ok().json(SlugCheckResponse {
        slug: resolved,
        is_unique,
        suggestions,
    }))
}

//! Authentication handlers.

use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::{HttpResponse, web};
use std::sync::Arc;

use press_core::ports::{PasswordService, TokenService};
use press_shared::dto::{AuthResponse, LoginRequest};

use crate::middleware::auth::{AUTH_COOKIE, Identity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

use super::users::user_response;

/// POST /api/auth/login
///
/// Verifies credentials and issues a JWT, returned in the body and as
/// an HttpOnly session cookie for the admin dashboard.
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Find user by email
    let user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !user.is_active {
        return Err(AppError::Unauthorized);
    }

    // Verify password
    let valid = password_service
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::Unauthorized);
    }

    // Generate token
    let token = token_service
        .generate_token(user.id, &user.email, user.role)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let expires_in = token_service.expiration_seconds();
    let cookie = Cookie::build(AUTH_COOKIE, token.clone())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(expires_in))
        .finish();

    Ok(HttpResponse::Ok().cookie(cookie).json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: expires_in as u64,
    }))
}

/// POST /api/auth/logout - clears the session cookie.
pub async fn logout() -> AppResult<HttpResponse> {
    let mut cookie = Cookie::build(AUTH_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();
    cookie.make_removal();

    Ok(HttpResponse::NoContent().cookie(cookie).finish())
}

/// GET /api/auth/me - the authenticated user's profile.
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(HttpResponse::Ok().json(user_response(user)))
}

//! User management handlers. Admin-only: accounts are provisioned from
//! the dashboard, there is no self-service signup.

use actix_web::{HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;

use press_core::domain::{Role, User};
use press_core::ports::PasswordService;
use press_shared::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(super) fn user_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        email: user.email,
        username: user.username,
        name: user.name,
        role: user.role.as_str().to_string(),
        is_active: user.is_active,
        avatar: user.avatar,
        created_at: user.created_at,
    }
}

fn parse_role(value: &str) -> Result<Role, AppError> {
    match value {
        "admin" => Ok(Role::Admin),
        "editor" => Ok(Role::Editor),
        "author" => Ok(Role::Author),
        other => Err(AppError::BadRequest(format!("Unknown role '{other}'"))),
    }
}

fn validate_email(email: &str) -> Result<(), AppError> {
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), AppError> {
    if password.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    Ok(())
}

/// GET /api/users
pub async fn list(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    identity.require_admin()?;

    let users = state.users.list().await?;
    let items: Vec<UserResponse> = users.into_iter().map(user_response).collect();

    Ok(HttpResponse::Ok().json(items))
}

/// GET /api/users/{id}
pub async fn get(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    identity.require_admin()?;
    let id = path.into_inner();

    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {id} not found")))?;

    Ok(HttpResponse::Ok().json(user_response(user)))
}

/// POST /api/users
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<CreateUserRequest>,
) -> AppResult<HttpResponse> {
    identity.require_admin()?;
    let req = body.into_inner();

    validate_email(&req.email)?;
    validate_password(&req.password)?;
    if req.username.trim().is_empty() {
        return Err(AppError::BadRequest("Username is required".to_string()));
    }
    let role = parse_role(&req.role)?;

    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = password_service
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let mut user = User::new(
        req.email,
        req.username.trim().to_string(),
        req.name,
        password_hash,
        role,
    );
    user.avatar = req.avatar;

    let saved = state.users.create(user).await?;

    tracing::info!(user_id = %saved.id, "User created");

    Ok(HttpResponse::Created().json(user_response(saved)))
}

/// PUT /api/users/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    password_service: web::Data<Arc<dyn PasswordService>>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateUserRequest>,
) -> AppResult<HttpResponse> {
    identity.require_admin()?;
    let id = path.into_inner();
    let req = body.into_inner();

    let mut user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {id} not found")))?;

    if let Some(email) = req.email {
        validate_email(&email)?;
        user.email = email;
    }
    if let Some(username) = req.username {
        if username.trim().is_empty() {
            return Err(AppError::BadRequest("Username cannot be empty".to_string()));
        }
        user.username = username.trim().to_string();
    }
    if let Some(name) = req.name {
        user.name = name;
    }
    if let Some(password) = req.password {
        validate_password(&password)?;
        user.password_hash = password_service
            .hash(&password)
            .map_err(|e| AppError::Internal(e.to_string()))?;
    }
    if let Some(role) = req.role.as_deref() {
        user.role = parse_role(role)?;
    }
    if let Some(is_active) = req.is_active {
        user.is_active = is_active;
    }
    if let Some(avatar) = req.avatar {
        user.avatar = Some(avatar);
    }
    user.updated_at = chrono::Utc::now();

    let saved = state.users.update(user).await?;

    Ok(HttpResponse::Ok().json(user_response(saved)))
}

/// DELETE /api/users/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    identity.require_admin()?;
    let id = path.into_inner();

    // Deleting yourself would orphan the session mid-request
    if identity.user_id == id {
        return Err(AppError::BadRequest(
            "You cannot delete your own account".to_string(),
        ));
    }

    state.users.delete(id).await?;

    tracing::info!(user_id = %id, "User deleted");

    Ok(HttpResponse::NoContent().finish())
}

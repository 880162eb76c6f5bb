use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::{
    error::{AppError, AppResult},
    password,
    state::AppState,
    types::{LoginRequest, LoginResponse, RegisterRequest, User, UserDto},
};

/// POST /api/auth/register
///
/// The INSERT itself is the uniqueness check: a duplicate email or username
/// trips the UNIQUE constraint, which `From<sqlx::Error>` maps to Conflict.
/// No check-then-insert, so concurrent registrations cannot race into
/// duplicate users.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    if req.username.trim().is_empty() {
        return Err(AppError::BadRequest("username is required".into()));
    }
    if req.email.trim().is_empty() {
        return Err(AppError::BadRequest("email is required".into()));
    }
    if req.password.is_empty() {
        return Err(AppError::BadRequest("password is required".into()));
    }

    let hashed = password::hash_password(&req.password)?;

    let res = sqlx::query("INSERT INTO users (username, email, password) VALUES (?1, ?2, ?3)")
        .bind(&req.username)
        .bind(&req.email)
        .bind(&hashed)
        .execute(&state.db)
        .await;

    match res {
        Ok(_) => {
            tracing::info!("registered user {}", req.username);
            Ok((StatusCode::CREATED, Json(json!({ "message": "User registered successfully" }))))
        }
        Err(e) => match AppError::from(e) {
            AppError::Conflict(_) => Err(AppError::Conflict("User already exists".into())),
            other => Err(other),
        },
    }
}

/// POST /api/auth/login
///
/// `identifier` is matched against email only, never username. Unknown email
/// and wrong password both collapse into the same Unauthorized response.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user: Option<User> =
        sqlx::query_as("SELECT id, username, email, password FROM users WHERE email = ?1")
            .bind(&req.identifier)
            .fetch_optional(&state.db)
            .await?;

    let user = user.ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;
    if !password::verify_password(&req.password, &user.password)? {
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user: UserDto::from(user),
    }))
}

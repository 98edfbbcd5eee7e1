use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use tower_sessions::Session;

use crate::{
    dto::auth::{CredentialsRequest, LogoutResponse, UserResponse},
    error::{AppError, ErrorBody},
    services::auth_service,
    state::SharedState,
};

/// Session-based account endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/me", get(me))
}

/// Create an account and log it in.
#[utoipa::path(
    post,
    path = "/api/register",
    tag = "auth",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Registered and logged in", body = UserResponse),
        (status = 400, description = "Missing username or password", body = ErrorBody),
        (status = 409, description = "Username already registered", body = ErrorBody)
    )
)]
pub async fn register(
    State(state): State<SharedState>,
    session: Session,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, AppError> {
    let Json(request) = payload?;
    Ok(Json(auth_service::register(&state, &session, request).await?))
}

/// Log in with a username and password.
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "auth",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Logged in", body = UserResponse),
        (status = 400, description = "Missing username or password", body = ErrorBody),
        (status = 401, description = "Invalid credentials", body = ErrorBody)
    )
)]
pub async fn login(
    State(state): State<SharedState>,
    session: Session,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, AppError> {
    let Json(request) = payload?;
    Ok(Json(auth_service::login(&state, &session, request).await?))
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/logout",
    tag = "auth",
    responses((status = 200, description = "Logged out", body = LogoutResponse))
)]
pub async fn logout(session: Session) -> Result<Json<LogoutResponse>, AppError> {
    auth_service::logout(&session).await?;
    Ok(Json(LogoutResponse { ok: true }))
}

/// The user bound to the current session.
#[utoipa::path(
    get,
    path = "/api/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Not logged in", body = ErrorBody)
    )
)]
pub async fn me(
    State(state): State<SharedState>,
    session: Session,
) -> Result<Json<UserResponse>, AppError> {
    Ok(Json(auth_service::me(&state, &session).await?))
}

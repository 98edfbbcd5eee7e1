use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::{get, post},
};

use crate::{
    dto::{
        comment::{CommentPayload, CreateCommentRequest},
        game::{CreateGameRequest, GameDetailResponse, GameResponse},
    },
    error::{AppError, ErrorBody},
    services::{game_service, snapshot_service, write_service},
    state::SharedState,
};

/// Routes for the game catalog and per-game discussion.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/games", get(list_games).post(create_game))
        .route("/api/games/{id}", get(get_game))
        .route("/api/games/{id}/comments", post(create_comment))
}

/// List every game, latest start first.
#[utoipa::path(
    get,
    path = "/api/games",
    tag = "games",
    responses((status = 200, description = "Known games", body = [GameResponse]))
)]
pub async fn list_games(
    State(state): State<SharedState>,
) -> Result<Json<Vec<GameResponse>>, AppError> {
    Ok(Json(game_service::list_games(&state).await?))
}

/// Schedule a new game.
#[utoipa::path(
    post,
    path = "/api/games",
    tag = "games",
    request_body = CreateGameRequest,
    responses(
        (status = 200, description = "Game created", body = GameResponse),
        (status = 400, description = "Missing required fields", body = ErrorBody)
    )
)]
pub async fn create_game(
    State(state): State<SharedState>,
    payload: Result<Json<CreateGameRequest>, JsonRejection>,
) -> Result<Json<GameResponse>, AppError> {
    let Json(request) = payload?;
    Ok(Json(game_service::create_game(&state, request).await?))
}

/// A game with its comments and check-ins, newest first.
#[utoipa::path(
    get,
    path = "/api/games/{id}",
    tag = "games",
    params(("id" = String, Path, description = "Identifier of the game")),
    responses(
        (status = 200, description = "Game detail", body = GameDetailResponse),
        (status = 404, description = "Unknown game", body = ErrorBody)
    )
)]
pub async fn get_game(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<GameDetailResponse>, AppError> {
    Ok(Json(snapshot_service::get_game(&state, &id).await?))
}

/// Post a comment to a game's discussion; members of its room receive `comment:new`.
#[utoipa::path(
    post,
    path = "/api/games/{id}/comments",
    tag = "games",
    params(("id" = String, Path, description = "Identifier of the game")),
    request_body = CreateCommentRequest,
    responses(
        (status = 200, description = "Comment stored and broadcast", body = CommentPayload),
        (status = 400, description = "Missing username or body", body = ErrorBody),
        (status = 404, description = "Unknown game", body = ErrorBody)
    )
)]
pub async fn create_comment(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<CreateCommentRequest>, JsonRejection>,
) -> Result<Json<CommentPayload>, AppError> {
    let Json(request) = payload?;
    Ok(Json(write_service::record_comment(&state, id, request).await?))
}

use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI document for Huddle Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::feed::list_feed,
        crate::routes::feed::feed_stream,
        crate::routes::game::list_games,
        crate::routes::game::create_game,
        crate::routes::game::get_game,
        crate::routes::game::create_comment,
        crate::routes::checkin::create_checkin,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::me,
        crate::routes::websocket::ws_handler,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::health::HealthStatus,
            crate::dto::checkin::CreateCheckinRequest,
            crate::dto::checkin::CheckinPayload,
            crate::dto::comment::CreateCommentRequest,
            crate::dto::comment::CommentPayload,
            crate::dto::feed::FeedEntry,
            crate::dto::game::CreateGameRequest,
            crate::dto::game::GameResponse,
            crate::dto::game::GameDetailResponse,
            crate::dto::auth::CredentialsRequest,
            crate::dto::auth::UserResponse,
            crate::dto::auth::LogoutResponse,
            crate::dto::ws::ClientMessage,
            crate::dto::ws::ServerMessage,
            crate::dao::models::CheckinMode,
            crate::error::ErrorBody,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "feed", description = "Global check-in feed"),
        (name = "games", description = "Game catalog and per-game discussion"),
        (name = "checkins", description = "Check-in recording"),
        (name = "auth", description = "Session-based accounts"),
        (name = "push", description = "WebSocket push channel"),
    )
)]
pub struct ApiDoc;

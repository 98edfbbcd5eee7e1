use std::convert::Infallible;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    response::sse::{Event, Sse},
    routing::get,
};
use futures::Stream;
use tracing::info;

use crate::{
    dto::feed::{FeedEntry, FeedQuery},
    error::AppError,
    services::{snapshot_service, sse_service},
    state::SharedState,
};

/// Routes serving the global activity feed.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/feed", get(list_feed))
        .route("/api/feed/stream", get(feed_stream))
}

/// Most recent check-ins across all games, newest first.
#[utoipa::path(
    get,
    path = "/api/feed",
    tag = "feed",
    params(FeedQuery),
    responses((status = 200, description = "Latest check-ins", body = [FeedEntry]))
)]
pub async fn list_feed(
    State(state): State<SharedState>,
    query: Result<Query<FeedQuery>, QueryRejection>,
) -> Result<Json<Vec<FeedEntry>>, AppError> {
    let Query(query) = query?;
    Ok(Json(snapshot_service::list_feed(&state, query.limit).await?))
}

/// Stream `checkin:new` events for clients that cannot hold a WebSocket.
#[utoipa::path(
    get,
    path = "/api/feed/stream",
    tag = "feed",
    responses((status = 200, description = "Check-in SSE stream", content_type = "text/event-stream", body = String))
)]
pub async fn feed_stream(
    State(state): State<SharedState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = sse_service::subscribe_feed(&state);
    info!("new feed SSE connection");
    sse_service::to_sse_stream(receiver)
}

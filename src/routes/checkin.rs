use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};

use crate::{
    dto::checkin::{CheckinPayload, CreateCheckinRequest},
    error::{AppError, ErrorBody},
    services::write_service,
    state::SharedState,
};

/// Route recording check-ins.
pub fn router() -> Router<SharedState> {
    Router::new().route("/api/checkins", post(create_checkin))
}

/// Record a check-in; every live connection receives `checkin:new`.
#[utoipa::path(
    post,
    path = "/api/checkins",
    tag = "checkins",
    request_body = CreateCheckinRequest,
    responses(
        (status = 200, description = "Check-in stored and broadcast", body = CheckinPayload),
        (status = 400, description = "Missing field, invalid mode or rating out of range", body = ErrorBody),
        (status = 404, description = "Unknown game", body = ErrorBody)
    )
)]
pub async fn create_checkin(
    State(state): State<SharedState>,
    payload: Result<Json<CreateCheckinRequest>, JsonRejection>,
) -> Result<Json<CheckinPayload>, AppError> {
    let Json(request) = payload?;
    Ok(Json(write_service::record_checkin(&state, request).await?))
}

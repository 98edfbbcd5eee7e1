//! The only path that creates check-in and comment rows.
//!
//! Each write validates, resolves the author, then takes the write gate for the
//! timestamp, the insert and the fan-out so that broadcast order matches storage order.

use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::{
    dao::models::{CheckinEntity, CheckinMode, CheckinRecord, CommentEntity, CommentRecord},
    dto::{
        checkin::{CheckinPayload, CreateCheckinRequest},
        comment::{CommentPayload, CreateCommentRequest},
        format_timestamp,
        validation::normalize_display_name,
    },
    error::ServiceError,
    services::{broadcast_service, identity_service},
    state::SharedState,
};

const RATING_MIN: i64 = 1;
const RATING_MAX: i64 = 5;

/// Validate and store a check-in, then announce it to every live connection.
pub async fn record_checkin(
    state: &SharedState,
    request: CreateCheckinRequest,
) -> Result<CheckinPayload, ServiceError> {
    let mut missing = Vec::new();
    if request
        .username
        .as_deref()
        .and_then(normalize_display_name)
        .is_none()
    {
        missing.push("username");
    }
    let game_id = non_empty(request.game_id);
    if game_id.is_none() {
        missing.push("game_id");
    }
    let mode = non_empty(request.mode);
    if mode.is_none() {
        missing.push("mode");
    }
    let (Some(game_id), Some(mode), [], Some(username)) =
        (game_id, mode, missing.as_slice(), request.username)
    else {
        return Err(ServiceError::MissingField(missing.join(", ")));
    };

    let mode: CheckinMode = mode.parse().map_err(|_| ServiceError::InvalidEnum {
        field: "mode",
        value: mode.clone(),
    })?;

    let rating = match request.rating {
        Some(number) => Some(rating_value(&number).ok_or_else(|| ServiceError::OutOfRange {
            field: "rating",
            value: number.to_string(),
            min: RATING_MIN,
            max: RATING_MAX,
        })?),
        None => None,
    };

    ensure_game_exists(state, &game_id).await?;
    let user = identity_service::resolve(state.store(), &username).await?;

    let mut sequencer = state.write_gate().lock().await;
    let entity = CheckinEntity {
        id: Uuid::new_v4().to_string(),
        user_id: user.id,
        game_id,
        mode,
        rating,
        comment: request.comment,
        created_at: format_timestamp(sequencer.stamp(OffsetDateTime::now_utc())),
    };
    state.store().insert_checkin(entity.clone()).await?;

    let payload = CheckinPayload::from(CheckinRecord::from_entity(entity, user.username));
    broadcast_service::publish_checkin(state, &payload);
    drop(sequencer);

    info!(
        checkin_id = %payload.id,
        game_id = %payload.game_id,
        username = %payload.username,
        "recorded check-in"
    );
    Ok(payload)
}

/// Validate and store a comment on `game_id`, then announce it to that game's room.
pub async fn record_comment(
    state: &SharedState,
    game_id: String,
    request: CreateCommentRequest,
) -> Result<CommentPayload, ServiceError> {
    let mut missing = Vec::new();
    if request
        .username
        .as_deref()
        .and_then(normalize_display_name)
        .is_none()
    {
        missing.push("username");
    }
    let body = request.body.filter(|body| !body.is_empty());
    if body.is_none() {
        missing.push("body");
    }
    let (Some(body), [], Some(username)) = (body, missing.as_slice(), request.username) else {
        return Err(ServiceError::MissingField(missing.join(", ")));
    };

    ensure_game_exists(state, &game_id).await?;

    if body.trim().is_empty() {
        return Err(ServiceError::MissingField("body".into()));
    }

    let user = identity_service::resolve(state.store(), &username).await?;

    let mut sequencer = state.write_gate().lock().await;
    let entity = CommentEntity {
        id: Uuid::new_v4().to_string(),
        user_id: user.id,
        game_id,
        body,
        created_at: format_timestamp(sequencer.stamp(OffsetDateTime::now_utc())),
    };
    state.store().insert_comment(entity.clone()).await?;

    let payload = CommentPayload::from(CommentRecord::from_entity(entity, user.username));
    broadcast_service::publish_comment(state, &payload);
    drop(sequencer);

    info!(
        comment_id = %payload.id,
        game_id = %payload.game_id,
        username = %payload.username,
        "recorded comment"
    );
    Ok(payload)
}

async fn ensure_game_exists(state: &SharedState, game_id: &str) -> Result<(), ServiceError> {
    match state.store().find_game(game_id.to_string()).await? {
        Some(_) => Ok(()),
        None => Err(ServiceError::NotFound(format!("game `{game_id}` not found"))),
    }
}

/// A whole number within the rating bounds. `4.0` counts as 4.
fn rating_value(number: &serde_json::Number) -> Option<u8> {
    let value = number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|value| value.fract() == 0.0 && value.abs() <= RATING_MAX as f64)
            .map(|value| value as i64)
    })?;
    if !(RATING_MIN..=RATING_MAX).contains(&value) {
        return None;
    }
    u8::try_from(value).ok()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

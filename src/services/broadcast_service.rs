use axum::extract::ws::Message;
use tracing::{debug, warn};

use crate::{
    dto::{
        checkin::CheckinPayload,
        comment::CommentPayload,
        sse::FeedEvent,
        ws::ServerMessage,
    },
    state::SharedState,
};

/// Push a stored check-in to every live connection and to the feed SSE stream.
///
/// Returns the number of WebSocket connections that accepted the frame.
pub fn publish_checkin(state: &SharedState, payload: &CheckinPayload) -> usize {
    let message = ServerMessage::CheckinNew(payload.clone());
    let delivered = encode(&message).map_or(0, |frame| state.rooms().publish_global(&frame));

    let streamed = match FeedEvent::from_message(&message) {
        Ok(event) => state.feed().publish(event),
        Err(err) => {
            warn!(error = %err, "failed to serialize feed event");
            0
        }
    };

    debug!(checkin_id = %payload.id, delivered, streamed, "published check-in");
    delivered
}

/// Push a stored comment to the connections that joined its game's room.
pub fn publish_comment(state: &SharedState, payload: &CommentPayload) -> usize {
    let delivered = encode(&ServerMessage::CommentNew(payload.clone()))
        .map_or(0, |frame| state.rooms().publish_to_room(&payload.game_id, &frame));

    debug!(
        comment_id = %payload.id,
        game_id = %payload.game_id,
        delivered,
        "published comment"
    );
    delivered
}

/// Serialize a push message into a text frame. Serialization failures are logged and
/// the message dropped; they indicate a bug rather than a delivery problem.
fn encode(message: &ServerMessage) -> Option<Message> {
    match serde_json::to_string(message) {
        Ok(text) => Some(Message::Text(text.into())),
        Err(err) => {
            warn!(event = message.event_name(), error = %err, "failed to serialize push message");
            None
        }
    }
}

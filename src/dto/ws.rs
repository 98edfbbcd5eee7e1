use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::dto::{checkin::CheckinPayload, comment::CommentPayload};

/// Name of the event pushed to every connection when a check-in lands.
pub const EVENT_CHECKIN_NEW: &str = "checkin:new";
/// Name of the event pushed to a game's room when a comment lands.
pub const EVENT_COMMENT_NEW: &str = "comment:new";

#[derive(Debug, Deserialize, Serialize, ToSchema)]
/// Messages accepted from push-channel clients.
#[serde(tag = "event", content = "data")]
pub enum ClientMessage {
    /// Subscribe to the discussion room of the given game.
    #[serde(rename = "room:join")]
    RoomJoin(String),
}

impl ClientMessage {
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
/// Messages pushed to push-channel clients.
#[serde(tag = "event", content = "data")]
pub enum ServerMessage {
    #[serde(rename = "checkin:new")]
    CheckinNew(CheckinPayload),
    #[serde(rename = "comment:new")]
    CommentNew(CommentPayload),
}

impl ServerMessage {
    pub fn event_name(&self) -> &'static str {
        match self {
            ServerMessage::CheckinNew(_) => EVENT_CHECKIN_NEW,
            ServerMessage::CommentNew(_) => EVENT_COMMENT_NEW,
        }
    }
}

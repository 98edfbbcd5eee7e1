use crate::dto::ws::ServerMessage;

#[derive(Clone, Debug)]
/// One frame of the global feed stream: the push event name and its JSON payload.
pub struct FeedEvent {
    pub name: &'static str,
    pub data: String,
}

impl FeedEvent {
    /// Mirror a push message onto the feed stream, carrying only its `data` part.
    pub fn from_message(message: &ServerMessage) -> serde_json::Result<Self> {
        let data = match message {
            ServerMessage::CheckinNew(payload) => serde_json::to_string(payload)?,
            ServerMessage::CommentNew(payload) => serde_json::to_string(payload)?,
        };
        Ok(Self {
            name: message.event_name(),
            data,
        })
    }
}

use axum::{
    Router,
    extract::{State, WebSocketUpgrade},
    response::Response,
    routing::get,
};
use tracing::debug;

use crate::{services::websocket_service, state::SharedState};

pub fn router() -> Router<SharedState> {
    Router::new().route("/ws", get(ws_handler))
}

/// Open a push session. Every session receives `checkin:new`; sending
/// `{"event":"room:join","data":"<game id>"}` adds that game's `comment:new` events.
#[utoipa::path(
    get,
    path = "/ws",
    tag = "push",
    responses((status = 101, description = "Switching protocols to WebSocket"))
)]
pub async fn ws_handler(State(state): State<SharedState>, ws: WebSocketUpgrade) -> Response {
    debug!(
        connections = state.rooms().connection_count(),
        "upgrading push connection"
    );
    ws.on_failed_upgrade(|err| debug!(error = %err, "push upgrade failed"))
        .on_upgrade(move |socket| websocket_service::handle_socket(state, socket))
}

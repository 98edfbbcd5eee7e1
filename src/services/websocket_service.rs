use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{
    dto::ws::ClientMessage,
    state::{RoomMembership, SharedState},
};

/// Handle the full lifecycle of one push connection.
///
/// The connection joins the global audience immediately and the registry entry is
/// torn down on every exit path when the membership guard drops.
pub async fn handle_socket(state: SharedState, socket: WebSocket) {
    let (mut sender, mut receiver) = socket.split();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Message>();

    // Dedicated writer task keeps outbound messages flowing even while we await inbound frames.
    let writer_task = tokio::spawn(async move {
        while let Some(message) = outbound_rx.recv().await {
            if sender.send(message).await.is_err() {
                break;
            }
        }
    });

    let membership = state.rooms().connect(outbound_tx.clone());
    let connection_id = membership.id();
    info!(
        connection_id = %connection_id,
        connections = state.rooms().connection_count(),
        "push connection opened"
    );

    while let Some(message) = receiver.next().await {
        match message {
            Ok(Message::Text(text)) => handle_text(&membership, text.as_str()),
            Ok(Message::Ping(payload)) => {
                let _ = outbound_tx.send(Message::Pong(payload));
            }
            Ok(Message::Close(frame)) => {
                info!(connection_id = %connection_id, "push connection closed by client");
                let _ = outbound_tx.send(Message::Close(frame));
                break;
            }
            Ok(Message::Binary(_)) => {
                debug!(connection_id = %connection_id, "ignoring binary frame");
            }
            Ok(Message::Pong(_)) => {}
            Err(err) => {
                warn!(connection_id = %connection_id, error = %err, "websocket error");
                break;
            }
        }
    }

    drop(membership);
    info!(connection_id = %connection_id, "push connection finished");

    finalize(writer_task, outbound_tx).await;
}

/// Apply one inbound text frame. Unknown or malformed frames are logged and ignored.
fn handle_text(membership: &RoomMembership, text: &str) {
    match ClientMessage::from_json_str(text) {
        Ok(ClientMessage::RoomJoin(game_id)) => {
            if membership.join(&game_id) {
                info!(connection_id = %membership.id(), game_id = %game_id, "joined game room");
            }
        }
        Err(err) => {
            warn!(
                connection_id = %membership.id(),
                error = %err,
                payload = %text,
                "ignoring unrecognised push message"
            );
        }
    }
}

/// Ensure the writer task winds down before we return from the socket handler.
async fn finalize(writer_task: JoinHandle<()>, outbound_tx: mpsc::UnboundedSender<Message>) {
    drop(outbound_tx);
    let _ = writer_task.await;
}

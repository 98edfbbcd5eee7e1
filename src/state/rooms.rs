use std::{collections::HashSet, sync::Arc};

use axum::extract::ws::Message;
use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

/// Identifier assigned to each live push connection.
pub type ConnectionId = Uuid;

/// A live connection and the game rooms it joined.
struct Member {
    tx: mpsc::UnboundedSender<Message>,
    rooms: HashSet<String>,
}

/// In-memory membership of live connections and per-game rooms.
///
/// Nothing here is persisted; a restart starts from an empty registry and clients
/// rejoin. Lock order is always `connections` before `rooms`.
#[derive(Default)]
pub struct RoomRegistry {
    connections: DashMap<ConnectionId, Member>,
    rooms: DashMap<String, HashSet<ConnectionId>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection in the global audience.
    ///
    /// The returned guard deregisters it, rooms included, when dropped.
    pub fn connect(self: &Arc<Self>, tx: mpsc::UnboundedSender<Message>) -> RoomMembership {
        let id = Uuid::new_v4();
        self.connections.insert(
            id,
            Member {
                tx,
                rooms: HashSet::new(),
            },
        );
        RoomMembership {
            registry: Arc::clone(self),
            id,
        }
    }

    /// Subscribe `id` to the room of `game_id`. Returns false for unknown connections.
    pub fn join(&self, id: ConnectionId, game_id: &str) -> bool {
        let Some(mut member) = self.connections.get_mut(&id) else {
            return false;
        };
        member.rooms.insert(game_id.to_string());
        self.rooms
            .entry(game_id.to_string())
            .or_default()
            .insert(id);
        true
    }

    /// Drop a connection and every room subscription it holds.
    pub fn leave(&self, id: ConnectionId) {
        let Some((_, member)) = self.connections.remove(&id) else {
            return;
        };

        for game_id in member.rooms {
            if let Some(mut members) = self.rooms.get_mut(&game_id) {
                members.remove(&id);
            }
            self.rooms.remove_if(&game_id, |_, members| members.is_empty());
        }
        debug!(connection_id = %id, "connection deregistered");
    }

    /// Send to every live connection. Returns how many accepted the message.
    pub fn publish_global(&self, message: &Message) -> usize {
        self.connections
            .iter()
            .filter(|member| member.tx.send(message.clone()).is_ok())
            .count()
    }

    /// Send to the connections that joined `game_id`. Returns how many accepted the message.
    pub fn publish_to_room(&self, game_id: &str, message: &Message) -> usize {
        let member_ids: Vec<ConnectionId> = match self.rooms.get(game_id) {
            Some(members) => members.iter().copied().collect(),
            None => return 0,
        };

        member_ids
            .into_iter()
            .filter(|id| {
                self.connections
                    .get(id)
                    .is_some_and(|member| member.tx.send(message.clone()).is_ok())
            })
            .count()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn room_size(&self, game_id: &str) -> usize {
        self.rooms.get(game_id).map_or(0, |members| members.len())
    }
}

/// Scoped registration of one connection; dropping it tears the connection down.
pub struct RoomMembership {
    registry: Arc<RoomRegistry>,
    id: ConnectionId,
}

impl RoomMembership {
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Join the room of `game_id`.
    pub fn join(&self, game_id: &str) -> bool {
        self.registry.join(self.id, game_id)
    }
}

impl Drop for RoomMembership {
    fn drop(&mut self) {
        self.registry.leave(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Message {
        Message::Text(value.to_string().into())
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<Message>) -> Vec<String> {
        let mut seen = Vec::new();
        while let Ok(Message::Text(body)) = rx.try_recv() {
            seen.push(body.to_string());
        }
        seen
    }

    #[test]
    fn global_publish_reaches_every_connection() {
        let registry = Arc::new(RoomRegistry::new());
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        let _a = registry.connect(tx_a);
        let b = registry.connect(tx_b);
        b.join("G1");

        assert_eq!(registry.publish_global(&text("hello")), 2);
        assert_eq!(drain(&mut rx_a), vec!["hello"]);
        assert_eq!(drain(&mut rx_b), vec!["hello"]);
    }

    #[test]
    fn room_publish_is_isolated() {
        let registry = Arc::new(RoomRegistry::new());
        let (tx_1, mut rx_1) = mpsc::unbounded_channel();
        let (tx_2, mut rx_2) = mpsc::unbounded_channel();
        let (tx_none, mut rx_none) = mpsc::unbounded_channel();
        let in_g1 = registry.connect(tx_1);
        let in_g2 = registry.connect(tx_2);
        let _lobby = registry.connect(tx_none);
        in_g1.join("G1");
        in_g2.join("G2");

        assert_eq!(registry.publish_to_room("G1", &text("for G1")), 1);
        assert_eq!(drain(&mut rx_1), vec!["for G1"]);
        assert!(drain(&mut rx_2).is_empty());
        assert!(drain(&mut rx_none).is_empty());
        assert_eq!(registry.publish_to_room("G3", &text("nobody")), 0);
    }

    #[test]
    fn dropping_membership_cleans_up_rooms() {
        let registry = Arc::new(RoomRegistry::new());
        let (tx, _rx) = mpsc::unbounded_channel();
        let membership = registry.connect(tx);
        membership.join("G1");
        membership.join("G2");
        assert_eq!(registry.room_size("G1"), 1);

        drop(membership);

        assert_eq!(registry.connection_count(), 0);
        assert_eq!(registry.room_size("G1"), 0);
        assert_eq!(registry.room_size("G2"), 0);
    }

    #[test]
    fn joining_twice_keeps_one_subscription() {
        let registry = Arc::new(RoomRegistry::new());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let membership = registry.connect(tx);
        membership.join("G1");
        membership.join("G1");

        assert_eq!(registry.publish_to_room("G1", &text("once")), 1);
        assert_eq!(drain(&mut rx), vec!["once"]);
    }

    #[test]
    fn join_after_leave_is_refused() {
        let registry = Arc::new(RoomRegistry::new());
        let (tx, _rx) = mpsc::unbounded_channel();
        let id = registry.connect(tx).id();

        assert!(!registry.join(id, "G1"));
        assert_eq!(registry.room_size("G1"), 0);
    }

    #[test]
    fn order_is_preserved_per_connection() {
        let registry = Arc::new(RoomRegistry::new());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _membership = registry.connect(tx);

        for n in 0..5 {
            registry.publish_global(&text(&n.to_string()));
        }
        assert_eq!(drain(&mut rx), vec!["0", "1", "2", "3", "4"]);
    }
}

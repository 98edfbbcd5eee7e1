pub mod rooms;
mod sequencer;
mod sse;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{config::AppConfig, dao::activity_store::ActivityStore};

pub use self::rooms::{ConnectionId, RoomMembership, RoomRegistry};
pub use self::sequencer::WriteSequencer;
pub use self::sse::FeedHub;

pub type SharedState = Arc<AppState>;

const FEED_HUB_CAPACITY: usize = 64;

/// Central application state: the store, live connections and the write gate.
pub struct AppState {
    store: Arc<dyn ActivityStore>,
    config: AppConfig,
    rooms: Arc<RoomRegistry>,
    feed: FeedHub,
    write_gate: Mutex<WriteSequencer>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(store: Arc<dyn ActivityStore>, config: AppConfig) -> SharedState {
        Arc::new(Self {
            store,
            config,
            rooms: Arc::new(RoomRegistry::new()),
            feed: FeedHub::new(FEED_HUB_CAPACITY),
            write_gate: Mutex::new(WriteSequencer::new()),
        })
    }

    pub fn store(&self) -> &dyn ActivityStore {
        self.store.as_ref()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Registry of live WebSocket connections and their game rooms.
    pub fn rooms(&self) -> &Arc<RoomRegistry> {
        &self.rooms
    }

    /// Broadcast hub used for the global feed SSE stream.
    pub fn feed(&self) -> &FeedHub {
        &self.feed
    }

    /// Serializes activity writes from timestamp through fan-out.
    pub fn write_gate(&self) -> &Mutex<WriteSequencer> {
        &self.write_gate
    }
}

#[cfg(test)]
pub(crate) async fn test_state() -> SharedState {
    use crate::dao::activity_store::sqlite::SqliteActivityStore;

    let store = SqliteActivityStore::in_memory()
        .await
        .expect("in-memory store");
    AppState::new(Arc::new(store), AppConfig::default())
}

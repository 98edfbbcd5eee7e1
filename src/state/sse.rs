use tokio::sync::broadcast;

use crate::dto::sse::FeedEvent;

/// Fan-out point for `/api/feed/stream` subscribers.
pub struct FeedHub {
    sender: broadcast::Sender<FeedEvent>,
}

impl FeedHub {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FeedEvent> {
        self.sender.subscribe()
    }

    /// Hand an event to the live subscribers and return how many there were.
    /// With nobody listening the event is dropped.
    pub fn publish(&self, event: FeedEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> FeedEvent {
        FeedEvent {
            name: "checkin:new",
            data: "{}".into(),
        }
    }

    #[test]
    fn publish_without_subscribers_is_dropped() {
        let hub = FeedHub::new(4);
        assert_eq!(hub.publish(event()), 0);
    }

    #[tokio::test]
    async fn subscribers_receive_later_events_only() {
        let hub = FeedHub::new(4);
        hub.publish(event());
        let mut receiver = hub.subscribe();
        assert_eq!(hub.subscriber_count(), 1);
        assert_eq!(hub.publish(event()), 1);
        assert_eq!(receiver.recv().await.unwrap().name, "checkin:new");
        assert!(receiver.try_recv().is_err());
    }
}

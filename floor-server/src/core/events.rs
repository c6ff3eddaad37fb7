//! Floor event bus
//!
//! Store mutations publish [`FloorEvent`]s here; the rendering layer (or any
//! other observer) subscribes instead of holding a reactive handle into the
//! store. Broadcast semantics: a lagging receiver misses events, it is never
//! able to block a publisher.

use shared::FloorEvent;
use tokio::sync::broadcast;

/// Event channel capacity - ample for a single-restaurant floor
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Broadcast bus for floor events
#[derive(Clone, Debug)]
pub struct FloorEvents {
    tx: broadcast::Sender<FloorEvent>,
}

impl FloorEvents {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Subscribe to floor events
    pub fn subscribe(&self) -> broadcast::Receiver<FloorEvent> {
        self.tx.subscribe()
    }

    /// Publish an event; a send without subscribers is not an error
    pub fn publish(&self, event: FloorEvent) {
        if let Err(e) = self.tx.send(event) {
            tracing::trace!("No subscribers for floor event: {}", e);
        }
    }

    /// Number of live subscribers
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for FloorEvents {
    fn default() -> Self {
        Self::new()
    }
}

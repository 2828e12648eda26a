//! In-process event bus backed by a tokio broadcast channel.

use std::future::Future;

use tokio::sync::broadcast;

use hestia_domain::error::HestiaError;
use hestia_domain::event::Event;

use crate::ports::EventPublisher;

/// Fans domain events out to every live subscriber.
///
/// Subscribers that fall more than the channel capacity behind start
/// losing the oldest events; delivery is best effort.
pub struct InProcessEventBus {
    sender: broadcast::Sender<Event>,
}

impl InProcessEventBus {
    /// Create a bus able to buffer `capacity` events per subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Open a receiver. It only sees events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }
}

impl EventPublisher for InProcessEventBus {
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), HestiaError>> + Send {
        // A send with zero receivers errors; the bus still counts it
        // as published.
        let _ = self.sender.send(event);
        async { Ok(()) }
    }
}

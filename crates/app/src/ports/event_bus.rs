//! Event bus port — publish/subscribe for domain events.

use std::future::Future;

use hestia_domain::error::HestiaError;
use hestia_domain::event::Event;

/// Publishes domain events to interested subscribers.
pub trait EventPublisher {
    /// Publish an event to all current subscribers.
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), HestiaError>> + Send;
}

impl<T: EventPublisher + Send + Sync> EventPublisher for std::sync::Arc<T> {
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), HestiaError>> + Send {
        (**self).publish(event)
    }
}

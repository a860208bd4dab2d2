use crate::domain::events::MessageEvent;

/// EventSink trait - where message events end up (logs, tests, ...)
pub trait EventSink: Send + Sync {
    fn publish(&self, event: &MessageEvent);
}

impl<T: EventSink + ?Sized> EventSink for std::sync::Arc<T> {
    fn publish(&self, event: &MessageEvent) {
        (**self).publish(event)
    }
}

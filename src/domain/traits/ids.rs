use crate::domain::entities::MessageId;

/// IdAllocator trait - source of message identifiers
///
/// Implementations must never hand out the same id twice for the lifetime of
/// the allocator, including under concurrent use.
pub trait IdAllocator: Send + Sync {
    /// Reserve the next identifier, or `None` once the id space is used up
    fn next_id(&self) -> Option<MessageId>;
}

impl<T: IdAllocator + ?Sized> IdAllocator for std::sync::Arc<T> {
    fn next_id(&self) -> Option<MessageId> {
        (**self).next_id()
    }
}

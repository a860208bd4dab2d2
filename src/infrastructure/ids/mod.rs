//! In-process identifier allocation

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::entities::MessageId;
use crate::domain::traits::IdAllocator;

/// Sequential counter starting at 1.
///
/// Ids are unique for the lifetime of the allocator only; a new process (or
/// a new allocator) starts over. The counter never wraps: `u64::MAX` is
/// never handed out and marks the allocator as exhausted.
#[derive(Debug)]
pub struct SequentialIdAllocator {
    next: AtomicU64,
}

impl SequentialIdAllocator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// The id the next call to `next_id` will return
    pub fn peek(&self) -> MessageId {
        MessageId::new(self.next.load(Ordering::Relaxed))
    }
}

impl Default for SequentialIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator for SequentialIdAllocator {
    fn next_id(&self) -> Option<MessageId> {
        // Relaxed is enough: only uniqueness matters, not ordering with
        // other memory.
        self.next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1))
            .ok()
            .map(MessageId::new)
    }
}

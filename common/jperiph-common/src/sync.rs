//! Synchronization primitive for values crossing between logically concurrent
//! timelines (e.g. a host bit-banging a line into a device that runs its own
//! polling loop).

use bincode::{Decode, Encode};
use std::collections::VecDeque;

/// Single-consumer FIFO of values submitted from a concurrent producer.
///
/// The producer calls [`push`](Self::push) at any point; the owning device drains
/// the queue only at its own synchronization points, so it never observes a
/// submitted value mid-operation or out of submission order.
#[derive(Debug, Clone, Default, Encode, Decode)]
pub struct EventQueue<T> {
    queue: VecDeque<T>,
}

impl<T> EventQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { queue: VecDeque::new() }
    }

    pub fn push(&mut self, value: T) {
        self.queue.push_back(value);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.queue.pop_front()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_submission_order() {
        let mut queue = EventQueue::new();
        queue.push(3_u8);
        queue.push(1);
        queue.push(2);

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop(), Some(3));
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.pop(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn clear_discards_pending_values() {
        let mut queue = EventQueue::new();
        queue.push(true);
        queue.push(false);

        queue.clear();

        assert!(queue.is_empty());
        assert_eq!(queue.pop(), None);
    }
}

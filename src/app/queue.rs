//! Bounded FIFO between the input task and the dispatch task.

use std::collections::VecDeque;

use tracing::warn;

use crate::input::Event;

#[derive(Debug)]
pub struct EventQueue {
    events: VecDeque<Event>,
    capacity: usize,
    dropped: u64,
}

impl EventQueue {
    /// A queue holding at most `capacity` events (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    /// Append `event`. A full queue rejects it and returns false.
    pub fn push(&mut self, event: Event) -> bool {
        if self.is_full() {
            self.dropped += 1;
            warn!(capacity = self.capacity, dropped = self.dropped, ?event, "event queue full, dropping event");
            return false;
        }
        self.events.push_back(event);
        true
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.events.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Events rejected since creation.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

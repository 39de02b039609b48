//! Service calls awaiting a result

use crate::ServiceCallback;
use cdk_protocol::{EventId, ServiceResult};
use std::collections::VecDeque;
use std::fmt;

struct PendingService {
    event_id: EventId,
    name: String,
    command: String,
    callback: ServiceCallback,
}

/// Bounded FIFO of service callbacks keyed by event id
pub(crate) struct PendingServices {
    entries: VecDeque<PendingService>,
    capacity: usize,
}

impl PendingServices {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    /// Records a callback, returning the id of the entry evicted to make
    /// room. With a capacity of zero the new entry itself is dropped.
    pub(crate) fn insert(
        &mut self,
        event_id: EventId,
        name: &str,
        command: &str,
        callback: ServiceCallback,
    ) -> Option<EventId> {
        if self.capacity == 0 {
            return Some(event_id);
        }

        let evicted = if self.entries.len() >= self.capacity {
            self.entries.pop_front().map(|entry| entry.event_id)
        } else {
            None
        };

        self.entries.push_back(PendingService {
            event_id,
            name: name.to_string(),
            command: command.to_string(),
            callback,
        });
        evicted
    }

    /// Removes and returns the callback a result belongs to.
    ///
    /// An exact event id match wins; otherwise the oldest entry with the same
    /// service name and command is taken.
    pub(crate) fn resolve(
        &mut self,
        event_id: Option<&EventId>,
        result: &ServiceResult,
    ) -> Option<ServiceCallback> {
        let by_id = event_id.and_then(|id| self.entries.iter().position(|e| &e.event_id == id));
        let index = by_id.or_else(|| {
            self.entries
                .iter()
                .position(|e| e.name == result.name && e.command == result.command)
        })?;

        self.entries.remove(index).map(|entry| entry.callback)
    }

    pub(crate) fn cancel(&mut self, event_id: &EventId) -> bool {
        match self.entries.iter().position(|e| &e.event_id == event_id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

impl fmt::Debug for PendingServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingServices")
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

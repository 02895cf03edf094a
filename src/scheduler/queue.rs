use std::collections::BTreeMap;

use tracing::trace;

use crate::scheduler::DecoEvent;

/// Event that reached its due time.
#[derive(Debug, Clone)]
pub struct DueEvent {
    pub due_ms: u64,
    pub event: DecoEvent,
}

/// Single time-ordered queue for every pending event of a chart.
///
/// Events are keyed by `(due time, insertion sequence)`, so equal due times
/// fire in insertion order. An event leaves the queue exactly once, either by
/// firing or by `cancel_all`.
#[derive(Debug, Default)]
pub struct EventScheduler {
    pending: BTreeMap<(u64, u64), DecoEvent>,
    next_seq: u64,
}

impl EventScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `event` to fire `delay_ms` after `now_ms` and returns its due time.
    pub fn schedule(&mut self, event: DecoEvent, now_ms: u64) -> u64 {
        let due_ms = now_ms.saturating_add(event.delay_ms());
        let seq = self.next_seq;
        self.next_seq += 1;
        trace!(due_ms, seq, kind = event.kind().name(), "event scheduled");
        self.pending.insert((due_ms, seq), event);
        due_ms
    }

    /// Removes and returns the earliest event due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<DueEvent> {
        let entry = self.pending.first_entry()?;
        let (due_ms, _) = *entry.key();
        if due_ms > now_ms {
            return None;
        }
        let event = entry.remove();
        Some(DueEvent { due_ms, event })
    }

    #[must_use]
    pub fn next_due_ms(&self) -> Option<u64> {
        self.pending.keys().next().map(|(due_ms, _)| *due_ms)
    }

    /// Drops every pending event and returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

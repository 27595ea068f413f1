//! Generation-guarded scheduled events
//!
//! The countdown tick and the beam shutoff are the only deferred effects in
//! the game. Instead of host timers they are queued here with the round
//! generation that scheduled them, and drained synchronously once per
//! simulated frame. A reset bumps the generation, so anything still queued
//! from the previous round is discarded on the next drain and can never
//! mutate a fresh round.

use serde::{Deserialize, Serialize};

/// Deferred effect kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// One-second countdown step
    TimerTick,
    /// Clear beam-active and beam-cooldown flags
    BeamOff,
}

/// An effect scheduled for a future point on the simulation clock
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScheduledEvent {
    /// Simulation time (ms) at which the event fires
    pub due_ms: f64,
    /// Round generation that scheduled the event
    pub generation: u32,
    pub kind: EventKind,
}

/// FIFO of scheduled effects, drained once per tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventQueue {
    events: Vec<ScheduledEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_ms: f64, generation: u32, kind: EventKind) {
        self.events.push(ScheduledEvent {
            due_ms,
            generation,
            kind,
        });
    }

    /// Pop every event due at `now_ms`, in due-time order.
    ///
    /// Events carrying a stale generation are dropped whether or not they are
    /// due yet; they belong to a round that no longer exists.
    pub fn drain_due(&mut self, now_ms: f64, generation: u32) -> Vec<ScheduledEvent> {
        let mut due: Vec<ScheduledEvent> = Vec::new();
        let mut pending: Vec<ScheduledEvent> = Vec::new();

        for ev in self.events.drain(..) {
            if ev.generation != generation {
                log::debug!("dropping stale {:?} from generation {}", ev.kind, ev.generation);
            } else if ev.due_ms <= now_ms {
                due.push(ev);
            } else {
                pending.push(ev);
            }
        }

        self.events = pending;
        due.sort_by(|a, b| a.due_ms.partial_cmp(&b.due_ms).unwrap_or(std::cmp::Ordering::Equal));
        due
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_returns_only_due_events() {
        let mut q = EventQueue::new();
        q.schedule(1000.0, 0, EventKind::TimerTick);
        q.schedule(2000.0, 0, EventKind::TimerTick);

        let fired = q.drain_due(1000.0, 0);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].kind, EventKind::TimerTick);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_drain_orders_by_due_time() {
        let mut q = EventQueue::new();
        q.schedule(900.0, 0, EventKind::BeamOff);
        q.schedule(500.0, 0, EventKind::TimerTick);

        let kinds: Vec<_> = q.drain_due(1000.0, 0).iter().map(|ev| ev.kind).collect();
        assert_eq!(kinds, vec![EventKind::TimerTick, EventKind::BeamOff]);
        assert!(q.is_empty());
    }

    #[test]
    fn test_stale_generation_discarded() {
        let mut q = EventQueue::new();
        q.schedule(500.0, 0, EventKind::BeamOff);
        q.schedule(9000.0, 0, EventKind::TimerTick);

        // Generation bumped by a reset: both events are gone, due or not
        let fired = q.drain_due(1000.0, 1);
        assert!(fired.is_empty());
        assert!(q.is_empty());
    }
}

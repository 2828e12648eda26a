//! Usage records — the power on/off history of one device.

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// What happened: power applied or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageEventKind {
    PowerOn,
    PowerOff,
}

/// One power transition, as reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageEvent {
    pub kind: UsageEventKind,
    pub at: Timestamp,
}

/// A half-open span `[start, end)` during which the device drew power.
///
/// Always non-empty: `end > start` holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageInterval {
    start: Timestamp,
    end: Timestamp,
}

impl UsageInterval {
    /// Build a span, or `None` unless `end > start`.
    #[must_use]
    pub fn new(start: Timestamp, end: Timestamp) -> Option<Self> {
        (end > start).then_some(Self { start, end })
    }

    /// Start of the span (inclusive).
    #[must_use]
    pub fn start(&self) -> Timestamp {
        self.start
    }

    /// End of the span (exclusive).
    #[must_use]
    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Length of the span.
    #[must_use]
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }

    /// The overlap of two spans, or `None` when they do not overlap.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        Self::new(self.start.max(other.start), self.end.min(other.end))
    }
}

/// Append-only power history of one device.
///
/// Events keep their insertion order; readers sort by timestamp at query
/// time, with ties resolved by insertion order. Completed spans are
/// committed by the owning device when power is removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageLedger {
    events: Vec<UsageEvent>,
    intervals: Vec<UsageInterval>,
}

impl UsageLedger {
    pub(crate) fn record(&mut self, kind: UsageEventKind, at: Timestamp) {
        self.events.push(UsageEvent { kind, at });
    }

    pub(crate) fn commit(&mut self, interval: UsageInterval) {
        self.intervals.push(interval);
    }

    /// Raw events in insertion order.
    #[must_use]
    pub fn events(&self) -> &[UsageEvent] {
        &self.events
    }

    /// Events sorted by timestamp; ties keep insertion order.
    #[must_use]
    pub fn events_by_time(&self) -> Vec<UsageEvent> {
        let mut sorted = self.events.clone();
        sorted.sort_by_key(|event| event.at);
        sorted
    }

    /// Completed power spans, oldest commit first.
    #[must_use]
    pub fn intervals(&self) -> &[UsageInterval] {
        &self.intervals
    }

    /// Whether any transition has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

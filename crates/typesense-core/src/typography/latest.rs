//! Latest-input-wins gate for delayed previews
//!
//! Previews may be computed behind an artificial delay (to show a loading
//! indicator). Each computation takes a ticket when it starts; only the most
//! recently started ticket may publish, regardless of completion order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Ticket handed to a computation when it starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PreviewTicket(u64);

impl PreviewTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Holds the value of the latest started computation
#[derive(Debug)]
pub struct LatestWins<T> {
    issued: AtomicU64,
    current: Mutex<Option<(PreviewTicket, T)>>,
}

impl<T: Clone> LatestWins<T> {
    pub fn new() -> Self {
        Self {
            issued: AtomicU64::new(0),
            current: Mutex::new(None),
        }
    }

    /// Start a computation; supersedes every earlier ticket
    pub fn begin(&self) -> PreviewTicket {
        PreviewTicket(self.issued.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether `ticket` is still the latest started computation
    pub fn is_current(&self, ticket: PreviewTicket) -> bool {
        self.issued.load(Ordering::Acquire) == ticket.0
    }

    /// Publish a finished value; returns false and drops it if superseded
    pub fn publish(&self, ticket: PreviewTicket, value: T) -> bool {
        let mut current = self
            .current
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if !self.is_current(ticket) {
            return false;
        }
        *current = Some((ticket, value));
        true
    }

    /// Value of the latest published computation
    pub fn latest(&self) -> Option<T> {
        self.current
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .as_ref()
            .map(|(_, value)| value.clone())
    }
}

impl<T: Clone> Default for LatestWins<T> {
    fn default() -> Self {
        Self::new()
    }
}

//! Host-side scheduling of analysis passes.
//!
//! A pass is triggered by every new frame or view change; triggers arriving
//! within the debounce window coalesce into one pass, and a result that
//! arrives after a newer trigger is discarded (last request wins). The
//! session never reads a clock: callers pass `now` in, which keeps it
//! deterministic under test.
//!
//! ```
//! use composition_coach::session::AnalysisSession;
//! use std::time::{Duration, Instant};
//!
//! let t0 = Instant::now();
//! let mut session: AnalysisSession<u32> = AnalysisSession::default();
//! session.request(t0);
//! assert!(session.due(t0 + Duration::from_millis(50)).is_none());
//! let ticket = session.due(t0 + Duration::from_millis(200)).expect("quiet long enough");
//! assert!(session.complete(ticket, 7).is_accepted());
//! assert_eq!(session.current(), Some(&7));
//! ```
use log::debug;
use std::time::{Duration, Instant};

/// Quiet period required after the last trigger before a pass starts.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(180);

/// Identifies one started pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// The result is now current.
    Accepted,
    /// A newer request superseded this pass; the result was dropped.
    Stale,
}

impl Completion {
    pub fn is_accepted(self) -> bool {
        self == Self::Accepted
    }
}

/// Debounce plus last-request-wins bookkeeping around a result of type `T`
/// (typically an [`AnalysisBundle`](crate::types::AnalysisBundle)).
#[derive(Debug)]
pub struct AnalysisSession<T> {
    debounce: Duration,
    generation: u64,
    pending_since: Option<Instant>,
    in_flight: Option<Ticket>,
    current: Option<T>,
}

impl<T> Default for AnalysisSession<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl<T> AnalysisSession<T> {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            generation: 0,
            pending_since: None,
            in_flight: None,
            current: None,
        }
    }

    /// Record a trigger. Restarts the debounce window and invalidates any
    /// pass already started.
    pub fn request(&mut self, now: Instant) {
        self.generation += 1;
        self.pending_since = Some(now);
    }

    /// Whether a trigger is waiting for its debounce window to elapse.
    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    /// Start a pass if the last trigger is at least `debounce` old.
    pub fn due(&mut self, now: Instant) -> Option<Ticket> {
        let since = self.pending_since?;
        if now.saturating_duration_since(since) < self.debounce {
            return None;
        }
        self.pending_since = None;
        let ticket = Ticket(self.generation);
        self.in_flight = Some(ticket);
        Some(ticket)
    }

    /// Deliver the result of the pass identified by `ticket`.
    pub fn complete(&mut self, ticket: Ticket, result: T) -> Completion {
        if self.take_in_flight(ticket) {
            self.current = Some(result);
            Completion::Accepted
        } else {
            debug!(
                "session: dropping stale result of pass {} (latest {})",
                ticket.0, self.generation
            );
            Completion::Stale
        }
    }

    /// Report that the pass identified by `ticket` failed. The previous
    /// result stays current; the next trigger starts a fresh pass.
    pub fn fail(&mut self, ticket: Ticket) -> Completion {
        if self.take_in_flight(ticket) {
            Completion::Accepted
        } else {
            Completion::Stale
        }
    }

    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    fn take_in_flight(&mut self, ticket: Ticket) -> bool {
        if ticket.0 != self.generation || self.in_flight != Some(ticket) {
            return false;
        }
        self.in_flight = None;
        true
    }
}

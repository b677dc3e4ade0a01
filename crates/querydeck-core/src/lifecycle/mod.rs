//! Request lifecycle shared by every builder.
//!
//! At most one request is in flight per tracker. A submission while
//! `Loading` is rejected, never queued, and there is no cancellation: the
//! only way out of `Loading` is the completion carrying the matching ticket.


use crate::error::BuilderError;
use derive_more::Display;
use std::time::{Duration, Instant};

///
/// Ticket
///
/// Identifies one submission; completions must present it back.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[display("#{_0}")]
pub struct Ticket(u64);

impl Ticket {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

///
/// RequestLifecycle
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum RequestLifecycle<T> {
    #[default]
    Idle,
    Loading(Ticket),
    Succeeded(T),
    Failed(String),
}

impl<T> RequestLifecycle<T> {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }

    /// Submit control state: enabled in every state except `Loading`.
    #[must_use]
    pub const fn can_submit(&self) -> bool {
        !self.is_loading()
    }

    #[must_use]
    pub const fn result(&self) -> Option<&T> {
        match self {
            Self::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

///
/// RequestTracker
///
/// Owns one lifecycle plus the ticket sequence for it, and times each
/// submission on the monotonic clock.
///

#[derive(Clone, Debug)]
pub struct RequestTracker<T> {
    state: RequestLifecycle<T>,
    issued: u64,
    started: Option<Instant>,
    elapsed: Option<Duration>,
}

impl<T> Default for RequestTracker<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RequestTracker<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: RequestLifecycle::Idle,
            issued: 0,
            started: None,
            elapsed: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &RequestLifecycle<T> {
        &self.state
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Wall-clock time between the last submission and its response.
    /// `None` until the response arrives.
    #[must_use]
    pub const fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    /// Transition to `Loading`, discarding any prior result or failure.
    pub fn begin(&mut self) -> Result<Ticket, BuilderError> {
        if self.state.is_loading() {
            return Err(BuilderError::Busy);
        }

        self.issued += 1;
        let ticket = Ticket(self.issued);
        self.state = RequestLifecycle::Loading(ticket);
        self.started = Some(Instant::now());
        self.elapsed = None;

        Ok(ticket)
    }

    /// Settle the in-flight request identified by `ticket`.
    pub fn finish(&mut self, ticket: Ticket, outcome: Result<T, String>) -> Result<(), BuilderError> {
        match self.state {
            RequestLifecycle::Loading(current) if current == ticket => {}
            _ => return Err(BuilderError::StaleTicket),
        }

        self.elapsed = self.started.take().map(|started| started.elapsed());
        self.state = match outcome {
            Ok(result) => RequestLifecycle::Succeeded(result),
            Err(message) => RequestLifecycle::Failed(message),
        };

        Ok(())
    }

    /// Drop any settled result. In-flight requests are left alone.
    pub fn clear(&mut self) {
        if !self.state.is_loading() {
            self.state = RequestLifecycle::Idle;
            self.elapsed = None;
        }
    }

    /// Return to `Idle` unconditionally. An in-flight ticket is orphaned,
    /// so its eventual `finish` is rejected as stale.
    pub fn abandon(&mut self) {
        self.state = RequestLifecycle::Idle;
        self.started = None;
        self.elapsed = None;
    }
}

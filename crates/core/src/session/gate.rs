//! Single-flight gate for access token renewal
//!
//! The gate is either idle or has exactly one renewal in flight. The first
//! caller to arrive while idle leads the renewal; everyone arriving while it
//! is in flight queues a `oneshot` receiver and gets the leader's outcome.
//! Queued callers are released in arrival order, all with the same outcome,
//! and the gate goes back to idle in the same critical section.
//!
//! ```text
//!   Idle ──first caller──► InFlight(waiters) ──settle(outcome)──► Idle
//!                              ▲      │
//!                              └──────┘ later callers enqueue
//! ```
//!
//! If the leader's future is dropped before it settles, the gate settles
//! with [`ApiError::Cancelled`] so queued callers never wait forever.

use std::future::Future;
use std::mem;

use moodlog_domain::{AccessToken, ApiError, Result};
use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::debug;

type Waiter = oneshot::Sender<Result<AccessToken>>;

#[derive(Debug)]
enum GateState {
    Idle,
    InFlight(Vec<Waiter>),
}

/// Ensures at most one renewal is outstanding at any time
#[derive(Debug)]
pub struct RenewalGate {
    state: Mutex<GateState>,
}

impl RenewalGate {
    pub fn new() -> Self {
        Self { state: Mutex::new(GateState::Idle) }
    }

    /// Run `renew` unless a renewal is already in flight, in which case wait
    /// for that one and return its outcome.
    ///
    /// # Errors
    /// Returns the renewal's error, shared by every caller of this cycle, or
    /// [`ApiError::Cancelled`] if the leading task was dropped.
    pub async fn run<F, Fut>(&self, renew: F) -> Result<AccessToken>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<AccessToken>>,
    {
        let waiting = {
            let mut state = self.state.lock();
            match &mut *state {
                GateState::InFlight(waiters) => {
                    let (tx, rx) = oneshot::channel();
                    waiters.push(tx);
                    debug!(queued = waiters.len(), "renewal in flight, queueing request");
                    Some(rx)
                }
                GateState::Idle => {
                    *state = GateState::InFlight(Vec::new());
                    None
                }
            }
        };

        if let Some(rx) = waiting {
            return rx.await.unwrap_or(Err(ApiError::Cancelled));
        }

        let guard = SettleOnDrop { gate: self, armed: true };
        let outcome = renew().await;
        guard.settle(&outcome);
        outcome
    }

    /// Whether a renewal is currently outstanding
    pub fn is_in_flight(&self) -> bool {
        matches!(*self.state.lock(), GateState::InFlight(_))
    }

    /// Number of callers queued behind the current renewal
    pub fn queued(&self) -> usize {
        match &*self.state.lock() {
            GateState::InFlight(waiters) => waiters.len(),
            GateState::Idle => 0,
        }
    }

    fn settle(&self, outcome: &Result<AccessToken>) {
        let mut state = self.state.lock();
        if let GateState::InFlight(waiters) = mem::replace(&mut *state, GateState::Idle) {
            debug!(released = waiters.len(), ok = outcome.is_ok(), "renewal settled");
            for waiter in waiters {
                // A receiver that is gone belonged to a dropped request.
                let _ = waiter.send(outcome.clone());
            }
        }
    }
}

impl Default for RenewalGate {
    fn default() -> Self {
        Self::new()
    }
}

struct SettleOnDrop<'a> {
    gate: &'a RenewalGate,
    armed: bool,
}

impl SettleOnDrop<'_> {
    fn settle(mut self, outcome: &Result<AccessToken>) {
        self.armed = false;
        self.gate.settle(outcome);
    }
}

impl Drop for SettleOnDrop<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.gate.settle(&Err(ApiError::Cancelled));
        }
    }
}

//! Access state machine shared by the guard and the requirement hook.
//!
//! DESIGN
//! ======
//! ```text
//!            loading clears, policy holds
//!   Pending ───────────────────────────────▶ Granted
//!      │  ▲                                    │ ▲
//!      │  └──────── loading again ─────────────┘ │
//!      │                                         │
//!      └── loading clears, policy fails ──▶ Denied
//! ```
//! A redirect is emitted only on the step *into* `Denied`. Observing the same
//! denial again is a no-op; leaving `Denied` (through `Pending` or `Granted`)
//! makes the next denial fire again.

#[cfg(test)]
#[path = "machine_test.rs"]
mod tests;

use crate::policy::{Decision, RedirectIntent};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccessState {
    #[default]
    Pending,
    Granted,
    Denied,
}

impl From<&Decision> for AccessState {
    fn from(decision: &Decision) -> Self {
        match decision {
            Decision::Wait => Self::Pending,
            Decision::Render => Self::Granted,
            Decision::Redirect(_) => Self::Denied,
        }
    }
}

/// Remembers the last state so redirects fire once per denial.
#[derive(Clone, Debug, Default)]
pub struct AccessTracker {
    state: AccessState,
}

impl AccessTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> AccessState {
        self.state
    }

    /// Advance with a fresh decision. Returns the redirect to perform, if this
    /// observation is a transition into `Denied`.
    pub fn observe(&mut self, decision: &Decision) -> Option<RedirectIntent> {
        let previous = self.state;
        self.state = AccessState::from(decision);
        match decision {
            Decision::Redirect(intent) if previous != AccessState::Denied => Some(intent.clone()),
            _ => None,
        }
    }
}

//! Adapter binding a policy and a tracker to the outside world.
//!
//! SYSTEM CONTEXT
//! ==============
//! UI code owns a `Navigator` (router hooks in the browser, a recorder in
//! tests) and an `AuthSource`. The controller asks the policy for a
//! `Decision`, feeds it through the `AccessTracker`, and performs the
//! navigation only on a transition into `Denied`.

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;

use crate::machine::{AccessState, AccessTracker};
use crate::policy::{AccessPolicy, Decision, RedirectIntent};
use crate::status::AuthStatus;

/// Navigation surface the controller drives.
pub trait Navigator {
    /// Path (plus query, if any) active at evaluation time.
    fn current_path(&self) -> String;

    /// Perform the redirect. Replacing vs pushing is given by `intent.mode`.
    fn navigate(&self, intent: &RedirectIntent);
}

/// Provider of the current authentication status.
pub trait AuthSource {
    type User;

    fn status(&self) -> AuthStatus<Self::User>;
}

pub struct AccessController<N> {
    policy: AccessPolicy,
    tracker: AccessTracker,
    navigator: N,
}

impl<N: Navigator> AccessController<N> {
    #[must_use]
    pub fn new(policy: AccessPolicy, navigator: N) -> Self {
        Self { policy, tracker: AccessTracker::new(), navigator }
    }

    #[must_use]
    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    /// Swap the policy; takes effect on the next evaluation.
    pub fn set_policy(&mut self, policy: AccessPolicy) {
        self.policy = policy;
    }

    #[must_use]
    pub fn state(&self) -> AccessState {
        self.tracker.state()
    }

    #[must_use]
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Pure decision for `status` at the navigator's current path.
    #[must_use]
    pub fn decide<U>(&self, status: &AuthStatus<U>) -> Decision {
        self.policy.evaluate(status, &self.navigator.current_path())
    }

    /// Apply an already computed decision, navigating at most once per denial.
    pub fn apply(&mut self, decision: &Decision) -> AccessState {
        if let Some(intent) = self.tracker.observe(decision) {
            log::debug!(
                "access denied, redirecting to {} (origin: {:?}, mode: {:?})",
                intent.target_path,
                intent.origin_path,
                intent.mode
            );
            self.navigator.navigate(&intent);
        }
        self.tracker.state()
    }

    /// Decide and apply in one step.
    pub fn evaluate<U>(&mut self, status: &AuthStatus<U>) -> AccessState {
        let decision = self.decide(status);
        self.apply(&decision)
    }

    /// Read the source and evaluate.
    pub fn evaluate_source<S: AuthSource>(&mut self, source: &S) -> AccessState {
        let status = source.status();
        self.evaluate(&status)
    }
}

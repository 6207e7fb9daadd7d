//! The requirement hook: enforce or invert the sign-in policy from inside a
//! screen.
//!
//! SYSTEM CONTEXT
//! ==============
//! Screens that need their own layout while loading (account settings, the
//! login form) call `use_require_auth` instead of wrapping themselves in
//! `RouteGuard`. Redirects push a history entry.
//!
//! Both the hook and the guard hand their policy to `watch_access`, which is
//! where evaluation meets navigation.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use access::{AccessController, AccessPolicy, Navigator, PolicyConfig};
use leptos::prelude::*;

use crate::state::auth::{AuthContext, AuthState, use_auth};
use crate::util::navigation::{PathSource, RouterNavigator};

/// Re-evaluates `policy` whenever the session, the path, or the policy
/// changes, and navigates through `navigator` once per entry into `Denied`.
pub fn watch_access<N>(policy: Signal<AccessPolicy>, auth: AuthContext, path: Signal<String>, navigator: N)
where
    N: Navigator + 'static,
{
    let mut controller = AccessController::new(policy.get_untracked(), navigator);
    Effect::new(move |_| {
        // The navigator reads the path untracked; subscribe here instead.
        path.track();
        controller.set_policy(policy.get());
        controller.evaluate_source(&auth);
    });
}

/// Requirement hook with explicit collaborators.
pub fn require_auth_with<N>(
    config: Signal<PolicyConfig>,
    auth: AuthContext,
    path: Signal<String>,
    navigator: N,
) -> Signal<AuthState>
where
    N: Navigator + 'static,
{
    let policy = Signal::derive(move || AccessPolicy::Requirement(config.get()));
    watch_access(policy, auth, path, navigator);
    auth.signal()
}

/// Returns the live `{ user, loading }` so the caller can render nothing
/// while a redirect is in flight. Must be called under a `<Router>`.
pub fn use_require_auth(config: impl Into<Signal<PolicyConfig>>) -> Signal<AuthState> {
    let path = PathSource::from_router();
    require_auth_with(config.into(), use_auth(), path.signal(), RouterNavigator::new(path))
}

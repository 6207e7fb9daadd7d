//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the auth source for the route guard and the requirement hook. The
//! provider starts in the loading state, asks the server who the visitor is,
//! and resolves; it asks again when the window regains focus. Guards only
//! ever read it.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use access::{AuthSource, AuthStatus};
use leptos::prelude::*;

use crate::net::types::User;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl Default for AuthState {
    /// Nothing is known until the session check answers.
    fn default() -> Self {
        Self { user: None, loading: true }
    }
}

impl AuthState {
    #[must_use]
    pub fn resolved(user: Option<User>) -> Self {
        Self { user, loading: false }
    }

    #[must_use]
    pub fn status(&self) -> AuthStatus<User> {
        AuthStatus { user: self.user.clone(), loading: self.loading }
    }
}

/// Copyable handle over the shared auth signal.
#[derive(Clone, Copy)]
pub struct AuthContext {
    state: RwSignal<AuthState>,
}

impl AuthContext {
    #[must_use]
    pub fn new(state: RwSignal<AuthState>) -> Self {
        Self { state }
    }

    /// Read-only view for screens that branch on `{ user, loading }`.
    #[must_use]
    pub fn signal(&self) -> Signal<AuthState> {
        self.state.into()
    }

    /// Resolve the session check.
    pub fn set_user(&self, user: Option<User>) {
        self.state.set(AuthState::resolved(user));
    }

    /// Drop the session after logout.
    pub fn clear(&self) {
        self.set_user(None);
    }
}

impl AuthSource for AuthContext {
    type User = User;

    /// Tracked read; calling this inside a memo or effect subscribes to it.
    fn status(&self) -> AuthStatus<User> {
        self.state.with(AuthState::status)
    }
}

/// Provides the auth context, resolves the session on mount, and re-checks it
/// whenever the window regains focus.
///
/// Re-checks do not re-enter the loading state, so a signed-in screen stays
/// on screen while the answer is in flight. A session that expired in the
/// meantime resolves to anonymous and the guards redirect.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let auth = AuthContext::new(RwSignal::new(AuthState::default()));
    provide_context(auth);

    #[cfg(feature = "hydrate")]
    {
        resolve_session(auth);
        // App-lifetime listener, never removed.
        let _ = window_event_listener(leptos::ev::focus, move |_| resolve_session(auth));
    }

    children()
}

#[cfg(feature = "hydrate")]
fn resolve_session(auth: AuthContext) {
    leptos::task::spawn_local(async move {
        let user = crate::net::api::fetch_current_user().await;
        log::debug!("session check resolved: signed_in={}", user.is_some());
        auth.set_user(user);
    });
}

/// Returns the current auth context, or a resolved anonymous one when no
/// provider is mounted.
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| AuthContext::new(RwSignal::new(AuthState::resolved(None))))
}

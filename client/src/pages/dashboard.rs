//! Account dashboard, reachable only when signed in.
//!
//! SYSTEM CONTEXT
//! ==============
//! The whole page sits inside `RouteGuard`; anonymous visitors are replaced
//! onto `/login?from=/dashboard`.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::components::route_guard::RouteGuard;
use crate::net::types::User;
use crate::state::auth::{AuthContext, use_auth};

/// Heading text for the signed-in user.
#[must_use]
pub fn greeting(user: Option<&User>) -> String {
    user.map_or_else(|| "Welcome".to_owned(), |user| format!("Welcome back, {}", user.name))
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <RouteGuard>
            <AccountSummary/>
        </RouteGuard>
    }
}

#[component]
fn AccountSummary() -> impl IntoView {
    let auth = use_auth();
    let state = auth.signal();

    view! {
        <main class="account">
            <h1>{move || state.with(|s| greeting(s.user.as_ref()))}</h1>
            <nav class="account__links">
                <a href="/settings">"Settings"</a>
                <a href="/">"Shop"</a>
            </nav>
            <button class="account__sign-out" on:click=move |_| sign_out(auth)>
                "Sign out"
            </button>
        </main>
    }
}

/// End the session server-side, clear local state, and leave the account area.
pub(crate) fn sign_out(auth: AuthContext) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        crate::net::api::logout().await;
        auth.clear();
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href("/");
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = auth;
    }
}

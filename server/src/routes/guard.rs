//! Server-side page guards.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser guards only run after hydration. This middleware applies the
//! same `access` policies while the page is being requested, so an anonymous
//! visitor to `/dashboard` gets a redirect to `/login?from=%2Fdashboard`
//! instead of an SSR spinner. On the server the session is always resolved,
//! so a policy never answers `Wait` here.
//!
//! `/settings` gets the replacing `RouteGuard` here, while the client page
//! uses the pushing requirement hook; both send an anonymous visitor to the
//! same `/login?from=` target.

use access::{AccessPolicy, AuthStatus, Decision, PolicyConfig};
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use crate::routes::auth::MaybeUser;
use crate::state::AppState;

const SIGNED_IN_PAGES: &[&str] = &["/dashboard", "/settings"];
const GUEST_PAGES: &[&str] = &["/login"];

fn matches_page(path: &str, page: &str) -> bool {
    path == page || path.strip_prefix(page).is_some_and(|rest| rest.starts_with('/'))
}

/// Policy guarding `path`, or `None` for public pages.
#[must_use]
pub fn policy_for_path(path: &str) -> Option<AccessPolicy> {
    if SIGNED_IN_PAGES.iter().any(|page| matches_page(path, page)) {
        return Some(AccessPolicy::RouteGuard);
    }
    if GUEST_PAGES.iter().any(|page| matches_page(path, page)) {
        return Some(AccessPolicy::Requirement(PolicyConfig::guest_only()));
    }
    None
}

/// Evaluate the page policy and redirect on denial.
pub async fn page_guard(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let uri = request.uri();
    let Some(policy) = policy_for_path(uri.path()) else {
        return next.run(request).await;
    };
    let current_path = uri.path_and_query().map_or_else(|| uri.path().to_owned(), |pq| pq.as_str().to_owned());

    let MaybeUser(user) = MaybeUser::resolve(&state.pool, request.headers()).await;

    match policy.evaluate(&AuthStatus::resolved(user), &current_path) {
        Decision::Redirect(intent) => {
            let href = intent.href();
            tracing::debug!(from = %current_path, to = %href, "page guard redirect");
            Redirect::temporary(&href).into_response()
        }
        Decision::Render | Decision::Wait => next.run(request).await,
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;

//! Declarative guard for signed-in-only subtrees.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps account routes. While the session check is in flight it shows the
//! spinner; once resolved it renders the children or replaces the current
//! history entry with `/login?from=<path>` so Back does not return to the
//! blocked page.
//!
//! This is UX only. The server re-checks every protected request.

#[cfg(test)]
#[path = "route_guard_test.rs"]
mod route_guard_test;

use access::{AccessPolicy, AuthSource, Decision, Navigator};
use leptos::prelude::*;

use crate::components::spinner::Spinner;
use crate::state::auth::{AuthContext, use_auth};
use crate::util::auth::watch_access;
use crate::util::navigation::{PathSource, RouterNavigator};

/// What the guard shows for a decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardView {
    Loading,
    Content,
    Nothing,
}

impl From<&Decision> for GuardView {
    fn from(decision: &Decision) -> Self {
        match decision {
            Decision::Wait => Self::Loading,
            Decision::Render => Self::Content,
            Decision::Redirect(_) => Self::Nothing,
        }
    }
}

/// Guard decision for rendering, with redirects performed through `navigator`.
pub fn guard_decision<N>(auth: AuthContext, path: Signal<String>, navigator: N) -> Memo<Decision>
where
    N: Navigator + 'static,
{
    watch_access(Signal::stored(AccessPolicy::RouteGuard), auth, path, navigator);
    Memo::new(move |_| AccessPolicy::RouteGuard.evaluate(&auth.status(), &path.get()))
}

#[component]
pub fn RouteGuard(children: ChildrenFn) -> impl IntoView {
    let path = PathSource::from_router();
    let decision = guard_decision(use_auth(), path.signal(), RouterNavigator::new(path));

    move || match decision.with(|d| GuardView::from(d)) {
        GuardView::Loading => view! { <Spinner/> }.into_any(),
        GuardView::Content => children().into_any(),
        GuardView::Nothing => ().into_any(),
    }
}

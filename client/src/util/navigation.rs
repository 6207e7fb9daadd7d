//! Router-backed `Navigator` for the access controller.
//!
//! The origin travels twice: as a `from` query parameter, which the login
//! screen can read during SSR as well as after hydration, and as
//! `{"from": origin}` history state for client-side consumers.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

use std::rc::Rc;

use access::{Navigator, RedirectIntent};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::location::State;
use leptos_router::hooks::{use_location, use_navigate};

/// Path plus query, as reported to policies.
#[must_use]
pub fn location_path(pathname: &str, search: &str) -> String {
    let search = search.trim_start_matches('?');
    if search.is_empty() {
        pathname.to_owned()
    } else {
        format!("{pathname}?{search}")
    }
}

/// History state for a redirect, serialized as `{"from": origin}`.
#[must_use]
pub fn history_state(intent: &RedirectIntent) -> Option<String> {
    intent.state().and_then(|state| serde_json::to_string(&state).ok())
}

/// Router options for a redirect: replacing for the guard, pushing otherwise.
/// In the browser the origin also rides along as history state.
#[must_use]
pub fn navigate_options(intent: &RedirectIntent) -> NavigateOptions {
    NavigateOptions { replace: intent.is_replace(), state: router_state(intent), ..NavigateOptions::default() }
}

#[cfg(feature = "hydrate")]
fn router_state(intent: &RedirectIntent) -> State {
    State::new(history_state(intent).map(|json| wasm_bindgen::JsValue::from_str(&json)))
}

#[cfg(not(feature = "hydrate"))]
fn router_state(_intent: &RedirectIntent) -> State {
    State::default()
}

/// Reactive path source. Copyable, so it can move into memos.
#[derive(Clone, Copy)]
pub struct PathSource {
    pathname: Memo<String>,
    search: Memo<String>,
}

impl PathSource {
    /// Must be called under a `<Router>`.
    pub fn from_router() -> Self {
        let location = use_location();
        Self { pathname: location.pathname, search: location.search }
    }

    /// Tracked read, for use inside memos.
    pub fn get(&self) -> String {
        location_path(&self.pathname.get(), &self.search.get())
    }

    /// Derived signal over the full path.
    pub fn signal(self) -> Signal<String> {
        Signal::derive(move || self.get())
    }

    pub fn get_untracked(&self) -> String {
        location_path(&self.pathname.get_untracked(), &self.search.get_untracked())
    }
}

/// Drives `leptos_router` navigation. Must be created under a `<Router>`.
pub struct RouterNavigator {
    navigate: Rc<dyn Fn(&str, NavigateOptions)>,
    path: PathSource,
}

impl RouterNavigator {
    pub fn new(path: PathSource) -> Self {
        Self { navigate: Rc::new(use_navigate()), path }
    }
}

impl Navigator for RouterNavigator {
    fn current_path(&self) -> String {
        self.path.get_untracked()
    }

    fn navigate(&self, intent: &RedirectIntent) {
        (self.navigate)(&intent.href(), navigate_options(intent));
    }
}

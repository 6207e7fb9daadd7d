//! Shared fixtures for reactive tests.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use access::{Navigator, RedirectIntent};
use any_spawner::Executor;
use leptos::prelude::*;
use tokio::task::LocalSet;

use crate::net::types::User;
use crate::state::auth::{AuthContext, AuthState};

/// Records navigations instead of performing them. Clones share the log.
#[derive(Clone)]
pub struct RecordingNavigator {
    path: String,
    calls: Rc<RefCell<Vec<RedirectIntent>>>,
}

impl RecordingNavigator {
    pub fn at(path: &str) -> Self {
        Self { path: path.to_owned(), calls: Rc::default() }
    }

    pub fn calls(&self) -> Vec<RedirectIntent> {
        self.calls.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.path.clone()
    }

    fn navigate(&self, intent: &RedirectIntent) {
        self.calls.borrow_mut().push(intent.clone());
    }
}

pub fn user() -> User {
    User { id: "u1".to_owned(), name: "Ada".to_owned(), email: None }
}

/// Auth context still waiting on the session check.
pub fn pending_auth() -> AuthContext {
    AuthContext::new(RwSignal::new(AuthState::default()))
}

/// Run `test` under a fresh owner on a local executor so effects fire.
pub async fn reactive<Fut>(test: impl FnOnce() -> Fut)
where
    Fut: Future<Output = ()>,
{
    let _ = Executor::init_tokio();
    let owner = Owner::new();
    owner.set();
    LocalSet::new().run_until(test()).await;
}

/// Let pending effects run.
pub async fn settle() {
    for _ in 0..4 {
        Executor::tick().await;
    }
}

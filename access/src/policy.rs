//! Access policies and the decisions they produce.
//!
//! DESIGN
//! ======
//! Both policies are pure functions of `(AuthStatus, config, current_path)`.
//! They never navigate; they return a `Decision` and the caller performs it.
//!
//! The route guard redirects with a *replacing* navigation so the blocked
//! route does not stay in history. The requirement hook pushes a new entry.
//! The two styles are kept as separate named policies.

#[cfg(test)]
#[path = "policy_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

use crate::error::AccessError;
use crate::return_path::is_safe_return_path;
use crate::status::AuthStatus;

/// Where unauthenticated visitors are sent by default.
pub const DEFAULT_LOGIN_PATH: &str = "/login";
/// Where authenticated visitors are sent by guest-only screens.
pub const ROOT_PATH: &str = "/";

/// Options accepted by the requirement hook.
///
/// `redirect_to` is only ever a same-origin absolute path: both the builder
/// and deserialization reject anything else.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPolicyConfig")]
pub struct PolicyConfig {
    redirect_to: String,
    /// Invert the policy: send *authenticated* visitors to `/`.
    pub redirect_if_found: bool,
}

/// Unchecked wire shape, validated into [`PolicyConfig`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawPolicyConfig {
    redirect_to: String,
    redirect_if_found: bool,
}

impl Default for RawPolicyConfig {
    fn default() -> Self {
        let PolicyConfig { redirect_to, redirect_if_found } = PolicyConfig::default();
        Self { redirect_to, redirect_if_found }
    }
}

impl TryFrom<RawPolicyConfig> for PolicyConfig {
    type Error = AccessError;

    fn try_from(raw: RawPolicyConfig) -> Result<Self, Self::Error> {
        Self::default()
            .with_redirect_to(raw.redirect_to)
            .map(|config| config.with_redirect_if_found(raw.redirect_if_found))
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self { redirect_to: DEFAULT_LOGIN_PATH.to_owned(), redirect_if_found: false }
    }
}

impl PolicyConfig {
    /// Inverted policy for screens such as login and sign-up.
    #[must_use]
    pub fn guest_only() -> Self {
        Self::default().with_redirect_if_found(true)
    }

    /// Target for unauthenticated visitors.
    #[must_use]
    pub fn redirect_to(&self) -> &str {
        &self.redirect_to
    }

    /// Override the redirect target.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::InvalidRedirectTarget`] unless `path` is a
    /// same-origin absolute path.
    pub fn with_redirect_to(mut self, path: impl Into<String>) -> Result<Self, AccessError> {
        let path = path.into();
        if !is_safe_return_path(&path) {
            return Err(AccessError::InvalidRedirectTarget(path));
        }
        self.redirect_to = path;
        Ok(self)
    }

    #[must_use]
    pub fn with_redirect_if_found(mut self, redirect_if_found: bool) -> Self {
        self.redirect_if_found = redirect_if_found;
        self
    }
}

/// How a redirect interacts with navigation history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationMode {
    /// Replace the current history entry.
    Replace,
    /// Push a new history entry.
    Push,
}

/// State attached to a redirect so the destination can send the visitor back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    pub from: String,
}

/// A redirect the caller must perform.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectIntent {
    pub target_path: String,
    /// Path the visitor was trying to reach, if it should be carried along.
    pub origin_path: Option<String>,
    pub mode: NavigationMode,
}

impl RedirectIntent {
    #[must_use]
    pub fn is_replace(&self) -> bool {
        self.mode == NavigationMode::Replace
    }

    /// Navigation state for the destination, `{"from": origin}`.
    #[must_use]
    pub fn state(&self) -> Option<NavigationState> {
        self.origin_path.as_ref().map(|from| NavigationState { from: from.clone() })
    }

    /// Target path with the origin appended as a `from` query parameter.
    #[must_use]
    pub fn href(&self) -> String {
        let Some(origin) = &self.origin_path else {
            return self.target_path.clone();
        };
        let encoded: String = url::form_urlencoded::byte_serialize(origin.as_bytes()).collect();
        let separator = if self.target_path.contains('?') { '&' } else { '?' };
        format!("{}{separator}from={encoded}", self.target_path)
    }
}

/// Outcome of evaluating a policy once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Auth is still resolving; do nothing yet.
    Wait,
    /// Access holds; render or continue.
    Render,
    /// Access fails; perform this redirect.
    Redirect(RedirectIntent),
}

impl Decision {
    #[must_use]
    pub fn redirect(&self) -> Option<&RedirectIntent> {
        match self {
            Self::Redirect(intent) => Some(intent),
            Self::Wait | Self::Render => None,
        }
    }
}

/// The two named policies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Declarative wrapper: signed-in only, replacing redirect to `/login`.
    RouteGuard,
    /// Imperative hook: configurable, pushing redirect.
    Requirement(PolicyConfig),
}

impl AccessPolicy {
    #[must_use]
    pub fn evaluate<U>(&self, status: &AuthStatus<U>, current_path: &str) -> Decision {
        match self {
            Self::RouteGuard => evaluate_route_guard(status, current_path),
            Self::Requirement(config) => evaluate_requirement(status, config, current_path),
        }
    }
}

/// Route-guard policy.
#[must_use]
pub fn evaluate_route_guard<U>(status: &AuthStatus<U>, current_path: &str) -> Decision {
    if status.loading {
        return Decision::Wait;
    }
    if status.user.is_none() {
        return Decision::Redirect(RedirectIntent {
            target_path: DEFAULT_LOGIN_PATH.to_owned(),
            origin_path: Some(current_path.to_owned()),
            mode: NavigationMode::Replace,
        });
    }
    Decision::Render
}

/// Requirement-hook policy.
#[must_use]
pub fn evaluate_requirement<U>(status: &AuthStatus<U>, config: &PolicyConfig, current_path: &str) -> Decision {
    if status.loading {
        return Decision::Wait;
    }
    match (config.redirect_if_found, status.user.is_some()) {
        (true, true) => Decision::Redirect(RedirectIntent {
            target_path: ROOT_PATH.to_owned(),
            origin_path: None,
            mode: NavigationMode::Push,
        }),
        (false, false) => Decision::Redirect(RedirectIntent {
            target_path: config.redirect_to.clone(),
            origin_path: Some(current_path.to_owned()),
            mode: NavigationMode::Push,
        }),
        _ => Decision::Render,
    }
}

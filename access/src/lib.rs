//! # access
//!
//! Route access-control core shared by the Leptos client and the Axum server.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected screens ask one question: given what the auth source currently
//! knows, should this route wait, render, or send the visitor elsewhere? This
//! crate answers it with pure functions over `AuthStatus` so the answer can be
//! unit-tested without a UI runtime. UI and HTTP layers own the side effects.
//!
//! ARCHITECTURE
//! ============
//! - `status`: what the auth source reports (`{ user, loading }`).
//! - `policy`: the two named policies and the `Decision` they produce.
//! - `machine`: `Pending`/`Granted`/`Denied` tracking so a redirect fires once
//!   per transition into `Denied`.
//! - `controller`: the thin adapter binding a policy and tracker to a
//!   `Navigator`.
//! - `return_path`: validation of the `from` origin carried back to login.

pub mod controller;
pub mod error;
pub mod machine;
pub mod policy;
pub mod return_path;
pub mod status;

pub use controller::{AccessController, AuthSource, Navigator};
pub use error::AccessError;
pub use machine::{AccessState, AccessTracker};
pub use policy::{
    AccessPolicy, DEFAULT_LOGIN_PATH, Decision, NavigationMode, NavigationState, PolicyConfig, ROOT_PATH,
    RedirectIntent, evaluate_requirement, evaluate_route_guard,
};
pub use return_path::{is_safe_return_path, origin_from_query, return_path};
pub use status::AuthStatus;

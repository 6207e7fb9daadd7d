//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read shared state from Leptos context providers; pages compose
//! them.

pub mod route_guard;
pub mod spinner;

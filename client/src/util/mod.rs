//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate router and browser concerns from page and component
//! logic to improve reuse and testability.

pub mod auth;
pub mod navigation;

#[cfg(test)]
pub(crate) mod test_helpers;

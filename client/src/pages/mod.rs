//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Marketing pages (`home`, `our_story`) are public. Account pages either sit
//! behind `RouteGuard` (`dashboard`) or call `use_require_auth` themselves
//! (`settings`, and `login` with the inverted policy).

pub mod dashboard;
pub mod home;
pub mod login;
pub mod not_found;
pub mod our_story;
pub mod settings;

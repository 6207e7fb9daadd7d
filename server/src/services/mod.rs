//! Domain services used by HTTP routes and page middleware.
//!
//! ARCHITECTURE
//! ============
//! Service modules own business logic and persistence concerns so route
//! handlers can stay focused on protocol translation and auth plumbing.

pub mod email_auth;
pub mod session;

//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! The storefront only shares one piece of global state: the session. Screens
//! read it through `auth::use_auth` and never mutate it directly.

pub mod auth;

//! Wire DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! These types mirror the server's JSON payloads field for field so serde
//! round-trips stay lossless.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// The signed-in principal as returned by `/api/auth/me`.
///
/// Guards never look inside; only screens that greet the user do.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier (UUID string).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Verified email address, if the account has one.
    #[serde(default)]
    pub email: Option<String>,
}

/// Response of `POST /api/auth/email/request-code`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestCodeResponse {
    pub ok: bool,
    /// Echoed code, only when the server runs with `EMAIL_CODE_ECHO`.
    #[serde(default)]
    pub code: Option<String>,
}

/// Response of `POST /api/auth/email/verify-code`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyCodeResponse {
    pub ok: bool,
}

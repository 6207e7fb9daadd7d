//! Session management.
//!
//! ARCHITECTURE
//! ============
//! Redeeming a sign-in code creates a random opaque token stored in
//! `sessions` and handed to the browser as an `HttpOnly` cookie living
//! `SESSION_TTL_DAYS`. Expiry is enforced in SQL so a stale row simply stops
//! validating; a user's expired rows are purged the next time they sign in.
//! Only accounts with a verified address can hold a valid session.

use std::fmt::Write;

use rand::Rng;
use sqlx::{PgPool, Row};
use uuid::Uuid;

pub const SESSION_TTL_DAYS: i32 = 30;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// User row returned from session validation. This is the body of
/// `GET /api/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
}

/// Start a session for `user_id`, returning the token.
///
/// # Errors
///
/// Database errors.
pub async fn create_session(pool: &PgPool, user_id: Uuid) -> Result<String, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let purged = sqlx::query("DELETE FROM sessions WHERE user_id = $1 AND expires_at <= now()")
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    if purged > 0 {
        tracing::debug!(%user_id, purged, "purged expired sessions");
    }

    let token = generate_token();
    sqlx::query(
        r"INSERT INTO sessions (token, user_id, expires_at)
          VALUES ($1, $2, now() + make_interval(days => $3))",
    )
    .bind(&token)
    .bind(user_id)
    .bind(SESSION_TTL_DAYS)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(token)
}

/// Resolve a live session token to its verified user.
///
/// # Errors
///
/// Database errors. An unknown or expired token is `Ok(None)`.
pub async fn validate_session(pool: &PgPool, token: &str) -> Result<Option<SessionUser>, sqlx::Error> {
    let row = sqlx::query(
        r"SELECT u.id, u.name, u.email
          FROM sessions s
          JOIN users u ON u.id = s.user_id
          WHERE s.token = $1
            AND s.expires_at > now()
            AND u.verified_at IS NOT NULL",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| SessionUser { id: r.get("id"), name: r.get("name"), email: r.get("email") }))
}

/// End a session. Unknown tokens are ignored.
///
/// # Errors
///
/// Database errors.
pub async fn delete_session(pool: &PgPool, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

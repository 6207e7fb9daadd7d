//! Email access-code sign-in.
//!
//! ACCOUNT LIFECYCLE
//! =================
//! An address becomes an account the first time a code is requested for it.
//! The account stays unverified (`users.verified_at IS NULL`) until a code
//! sent to it is redeemed; that first redemption stamps `verified_at`, and
//! later sign-ins leave it alone.
//!
//! CODES
//! =====
//! Six characters from an alphabet without look-alikes, stored as a SHA-256
//! of the address and code. Only the newest code per address is live. A new
//! one may be requested once the previous one is `RESEND_COOLDOWN_SECS` old.
//! Wrong guesses count against the live code and burn it at
//! `MAX_FAILED_ATTEMPTS`.

use rand::Rng;
use resend_rs::Resend;
use resend_rs::types::CreateEmailBaseOptions;
use sha2::{Digest, Sha256};
use sqlx::{PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

use crate::config::EmailConfig;

const CODE_LEN: usize = 6;
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const MAX_FAILED_ATTEMPTS: i32 = 5;
pub const RESEND_COOLDOWN_SECS: i64 = 60;
const EMAIL_SUBJECT: &str = "Your Storefront sign-in code";

#[derive(Debug, thiserror::Error)]
pub enum EmailAuthError {
    #[error("invalid email")]
    InvalidEmail,
    #[error("invalid code")]
    InvalidCode,
    #[error("expired or incorrect code")]
    VerificationFailed,
    #[error("a code was sent recently; retry in {retry_after_secs}s")]
    TooSoon { retry_after_secs: i64 },
    #[error("email sign-in is not configured")]
    DeliveryUnavailable,
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("email delivery failed: {0}")]
    EmailDelivery(String),
}

/// A freshly issued code, ready to be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCode {
    pub email: String,
    pub code: String,
    /// The address has never redeemed a code.
    pub unverified: bool,
}

/// Outcome of a redeemed code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedUser {
    pub user_id: Uuid,
    /// This redemption verified the address.
    pub first_verification: bool,
}

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }
    Some(normalized)
}

#[must_use]
pub fn normalize_code(code: &str) -> Option<String> {
    let normalized = code.trim().to_ascii_uppercase();
    if normalized.len() != CODE_LEN || !normalized.bytes().all(|c| CODE_ALPHABET.contains(&c)) {
        return None;
    }
    Some(normalized)
}

#[must_use]
pub fn generate_access_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[idx] as char
        })
        .collect()
}

/// Digest of `code` bound to the address it was issued for.
#[must_use]
pub fn hash_access_code(email: &str, code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.as_bytes());
    hasher.update(b":");
    hasher.update(code.as_bytes());
    crate::services::session::bytes_to_hex(&hasher.finalize())
}

fn name_from_email(email: &str) -> String {
    email
        .split('@')
        .next()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or("customer")
        .to_owned()
}

/// Seconds left before another code may be sent, given the age of the live one.
#[must_use]
pub fn resend_wait(live_code_age_secs: Option<i64>) -> Option<i64> {
    live_code_age_secs
        .map(|age| RESEND_COOLDOWN_SECS - age.max(0))
        .filter(|wait| *wait > 0)
}

#[must_use]
pub fn burns_code(failed_attempts: i32) -> bool {
    failed_attempts >= MAX_FAILED_ATTEMPTS
}

/// Create the account for `email` unless it exists. True while the address
/// is still unverified.
async fn provision_account(tx: &mut Transaction<'_, Postgres>, email: &str) -> Result<bool, sqlx::Error> {
    sqlx::query(
        r"INSERT INTO users (email, name)
          VALUES ($1, $2)
          ON CONFLICT (email) DO NOTHING",
    )
    .bind(email)
    .bind(name_from_email(email))
    .execute(&mut **tx)
    .await?;

    let row = sqlx::query("SELECT verified_at IS NULL AS unverified FROM users WHERE email = $1")
        .bind(email)
        .fetch_one(&mut **tx)
        .await?;
    Ok(row.get("unverified"))
}

async fn live_code_age(tx: &mut Transaction<'_, Postgres>, email: &str) -> Result<Option<i64>, sqlx::Error> {
    let row = sqlx::query(
        r"SELECT EXTRACT(EPOCH FROM now() - created_at)::BIGINT AS age
          FROM email_login_codes
          WHERE email = $1 AND consumed_at IS NULL AND expires_at > now()
          ORDER BY created_at DESC
          LIMIT 1",
    )
    .bind(email)
    .fetch_optional(&mut **tx)
    .await?;
    Ok(row.map(|r| r.get("age")))
}

/// Issue a code for `email`.
///
/// Provisions the account on first request, refuses to resend within the
/// cooldown, and replaces any older live code.
///
/// # Errors
///
/// [`EmailAuthError::InvalidEmail`] for a malformed address,
/// [`EmailAuthError::TooSoon`] inside the cooldown, or a database error.
pub async fn request_access_code(pool: &PgPool, email: &str) -> Result<IssuedCode, EmailAuthError> {
    let email = normalize_email(email).ok_or(EmailAuthError::InvalidEmail)?;
    let mut tx = pool.begin().await?;

    let unverified = provision_account(&mut tx, &email).await?;
    if let Some(retry_after_secs) = resend_wait(live_code_age(&mut tx, &email).await?) {
        return Err(EmailAuthError::TooSoon { retry_after_secs });
    }

    sqlx::query("DELETE FROM email_login_codes WHERE email = $1 AND consumed_at IS NULL")
        .bind(&email)
        .execute(&mut *tx)
        .await?;

    let code = generate_access_code();
    sqlx::query("INSERT INTO email_login_codes (email, code_hash) VALUES ($1, $2)")
        .bind(&email)
        .bind(hash_access_code(&email, &code))
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(IssuedCode { email, code, unverified })
}

/// Redeem `code` against the newest live code for `email`.
///
/// # Errors
///
/// [`EmailAuthError::VerificationFailed`] when there is no live code or it
/// does not match; malformed input is rejected before the database is read.
pub async fn verify_access_code(pool: &PgPool, email: &str, code: &str) -> Result<VerifiedUser, EmailAuthError> {
    let email = normalize_email(email).ok_or(EmailAuthError::InvalidEmail)?;
    let code = normalize_code(code).ok_or(EmailAuthError::InvalidCode)?;
    let mut tx = pool.begin().await?;

    let live = sqlx::query(
        r"SELECT id, code_hash, attempts
          FROM email_login_codes
          WHERE email = $1 AND consumed_at IS NULL AND expires_at > now()
          ORDER BY created_at DESC
          LIMIT 1
          FOR UPDATE",
    )
    .bind(&email)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(EmailAuthError::VerificationFailed)?;

    let code_id: Uuid = live.get("id");
    if live.get::<String, _>("code_hash") != hash_access_code(&email, &code) {
        let attempts = live.get::<i32, _>("attempts") + 1;
        sqlx::query(
            r"UPDATE email_login_codes
              SET attempts = $2,
                  consumed_at = CASE WHEN $3 THEN now() ELSE NULL END
              WHERE id = $1",
        )
        .bind(code_id)
        .bind(attempts)
        .bind(burns_code(attempts))
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        return Err(EmailAuthError::VerificationFailed);
    }

    sqlx::query("UPDATE email_login_codes SET consumed_at = now() WHERE id = $1")
        .bind(code_id)
        .execute(&mut *tx)
        .await?;

    let user = sqlx::query("SELECT id, verified_at IS NULL AS unverified FROM users WHERE email = $1 FOR UPDATE")
        .bind(&email)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(EmailAuthError::VerificationFailed)?;
    let user_id: Uuid = user.get("id");
    let first_verification: bool = user.get("unverified");
    if first_verification {
        sqlx::query("UPDATE users SET verified_at = now() WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(VerifiedUser { user_id, first_verification })
}

/// Plain-text body of the code email. Unverified addresses are asked to
/// verify; verified ones just to sign in.
#[must_use]
pub fn verification_email_body(issued: &IssuedCode) -> String {
    let IssuedCode { email, code, unverified } = issued;
    let purpose = if *unverified {
        format!("verify {email} and finish creating your Storefront account")
    } else {
        format!("sign in to Storefront as {email}")
    };
    format!(
        "Hi,\n\n\
         Use this code to {purpose}:\n\n\
         {code}\n\n\
         The code expires in 10 minutes. If you did not ask for it, you can ignore this email.\n"
    )
}

/// Deliver an issued code through Resend.
///
/// # Errors
///
/// [`EmailAuthError::EmailDelivery`] when Resend rejects the message.
pub async fn send_verification_email(config: &EmailConfig, issued: &IssuedCode) -> Result<(), EmailAuthError> {
    let resend = Resend::new(&config.api_key);
    let body = verification_email_body(issued);

    let email = CreateEmailBaseOptions::new(&config.from, [issued.email.as_str()], EMAIL_SUBJECT).with_text(&body);
    resend
        .emails
        .send(email)
        .await
        .map_err(|e| EmailAuthError::EmailDelivery(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
#[path = "email_auth_test.rs"]
mod tests;

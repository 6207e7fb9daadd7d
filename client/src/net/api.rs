//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option`/`Result` outputs instead of panics so a failed session
//! check degrades to "signed out" rather than crashing hydration. Sign-in
//! failures come back as sentences fit for the login form, chosen by
//! `sign_in_failure` from the step and the HTTP status.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::User;
#[cfg(feature = "hydrate")]
use super::types::{RequestCodeResponse, VerifyCodeResponse};

pub const ME_ENDPOINT: &str = "/api/auth/me";
pub const LOGOUT_ENDPOINT: &str = "/api/auth/logout";
pub const REQUEST_CODE_ENDPOINT: &str = "/api/auth/email/request-code";
pub const VERIFY_CODE_ENDPOINT: &str = "/api/auth/email/verify-code";

/// Which half of the email sign-in failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignInStep {
    RequestCode,
    VerifyCode,
}

/// Message shown on the login form for a failed sign-in call.
#[must_use]
pub fn sign_in_failure(step: SignInStep, status: u16) -> String {
    match (step, status) {
        (_, 400) => "That email or code doesn't look right.".to_owned(),
        (SignInStep::RequestCode, 429) => "A code was just sent. Wait a minute before asking for another.".to_owned(),
        (SignInStep::RequestCode, 503) => "Email sign-in is unavailable right now.".to_owned(),
        (SignInStep::RequestCode, 502) => "We couldn't send the email. Try again shortly.".to_owned(),
        (SignInStep::VerifyCode, 401) => "That code is incorrect or has expired. Request a new one.".to_owned(),
        (SignInStep::RequestCode, _) => format!("Code request failed ({status})."),
        (SignInStep::VerifyCode, _) => format!("Verification failed ({status})."),
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn request_code_payload(email: &str) -> serde_json::Value {
    serde_json::json!({ "email": email })
}

#[cfg(any(test, feature = "hydrate"))]
fn verify_code_payload(email: &str, code: &str) -> serde_json::Value {
    serde_json::json!({ "email": email, "code": code })
}

/// POST `body` to `endpoint` and decode the JSON answer.
#[cfg(feature = "hydrate")]
async fn post_json<T: serde::de::DeserializeOwned>(
    step: SignInStep,
    endpoint: &str,
    body: &serde_json::Value,
) -> Result<T, String> {
    let resp = gloo_net::http::Request::post(endpoint)
        .json(body)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| {
            log::warn!("{endpoint} unreachable: {e}");
            "Can't reach the server. Check your connection.".to_owned()
        })?;
    if !resp.ok() {
        log::debug!("{endpoint} answered {}", resp.status());
        return Err(sign_in_failure(step, resp.status()));
    }
    resp.json().await.map_err(|e| e.to_string())
}

/// Fetch the currently authenticated user from `/api/auth/me`.
/// Returns `None` if not authenticated or on the server.
pub async fn fetch_current_user() -> Option<User> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(ME_ENDPOINT).send().await.ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<User>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Log out the current user by calling `POST /api/auth/logout`.
pub async fn logout() {
    #[cfg(feature = "hydrate")]
    {
        if let Err(e) = gloo_net::http::Request::post(LOGOUT_ENDPOINT).send().await {
            log::warn!("logout request failed: {e}");
        }
    }
}

/// Request a 6-character sign-in code via `POST /api/auth/email/request-code`.
///
/// The server emails the code as the account verification step. Returns the
/// code itself only when the server is configured to echo it.
///
/// # Errors
///
/// A message for the login form, see [`sign_in_failure`].
pub async fn request_email_login_code(email: &str) -> Result<Option<String>, String> {
    #[cfg(feature = "hydrate")]
    {
        let body: RequestCodeResponse =
            post_json(SignInStep::RequestCode, REQUEST_CODE_ENDPOINT, &request_code_payload(email)).await?;
        if !body.ok {
            return Err(sign_in_failure(SignInStep::RequestCode, 200));
        }
        Ok(body.code)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = email;
        Err("not available on server".to_owned())
    }
}

/// Verify a sign-in code via `POST /api/auth/email/verify-code`.
///
/// On success the server has set the session cookie.
///
/// # Errors
///
/// A message for the login form, see [`sign_in_failure`].
pub async fn verify_email_login_code(email: &str, code: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let body: VerifyCodeResponse =
            post_json(SignInStep::VerifyCode, VERIFY_CODE_ENDPOINT, &verify_code_payload(email, code)).await?;
        if !body.ok {
            return Err(sign_in_failure(SignInStep::VerifyCode, 200));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, code);
        Err("not available on server".to_owned())
    }
}

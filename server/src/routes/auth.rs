//! Auth routes: session lookup, logout, and email access-code sign-in.

use axum::extract::{FromRef, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use time::Duration;

use crate::services::email_auth::{self, EmailAuthError};
use crate::services::session::{self, SessionUser};
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";

fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::days(session::SESSION_TTL_DAYS.into()))
        .build()
}

fn cleared_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

pub(crate) fn session_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    jar.get(COOKIE_NAME)
        .map(Cookie::value)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
}

/// Resolve the session cookie in `headers` to a user, if any.
pub(crate) async fn session_user(pool: &PgPool, headers: &HeaderMap) -> Result<Option<SessionUser>, sqlx::Error> {
    match session_token(headers) {
        Some(token) => session::validate_session(pool, &token).await,
        None => Ok(None),
    }
}

pub(crate) fn email_error_status(err: &EmailAuthError) -> StatusCode {
    match err {
        EmailAuthError::InvalidEmail | EmailAuthError::InvalidCode => StatusCode::BAD_REQUEST,
        EmailAuthError::VerificationFailed => StatusCode::UNAUTHORIZED,
        EmailAuthError::TooSoon { .. } => StatusCode::TOO_MANY_REQUESTS,
        EmailAuthError::DeliveryUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        EmailAuthError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EmailAuthError::EmailDelivery(_) => StatusCode::BAD_GATEWAY,
    }
}

// =============================================================================
// AUTH EXTRACTORS
// =============================================================================

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: SessionUser,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers).ok_or(StatusCode::UNAUTHORIZED)?;

        let app_state = AppState::from_ref(state);
        let user = session::validate_session(&app_state.pool, &token)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(Self { user, token })
    }
}

/// Optional user. Never rejects: a missing, expired, or unverifiable session
/// reads as anonymous.
pub struct MaybeUser(pub Option<SessionUser>);

impl<S> axum::extract::FromRequestParts<S> for MaybeUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        Ok(Self::resolve(&app_state.pool, &parts.headers).await)
    }
}

impl MaybeUser {
    pub async fn resolve(pool: &PgPool, headers: &HeaderMap) -> Self {
        match session_user(pool, headers).await {
            Ok(user) => Self(user),
            Err(e) => {
                tracing::warn!(error = %e, "session lookup failed; treating request as anonymous");
                Self(None)
            }
        }
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /api/auth/me`: return current user.
pub async fn me(auth: AuthUser) -> Json<SessionUser> {
    Json(auth.user)
}

/// `POST /api/auth/logout`: delete session, clear cookie.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    if let Err(e) = session::delete_session(&state.pool, &auth.token).await {
        tracing::warn!(error = %e, user_id = %auth.user.id, "session delete failed");
    }

    let jar = CookieJar::new().add(cleared_session_cookie(state.config.cookie_secure));
    (jar, StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct RequestCodeBody {
    email: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RequestCodeResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

fn email_error_response(err: &EmailAuthError) -> Response {
    (email_error_status(err), err.to_string()).into_response()
}

/// `POST /api/auth/email/request-code`: issue a code and email it.
///
/// Answers 503 without issuing anything when the code could reach nobody:
/// no Resend credentials and echo disabled.
pub async fn request_email_code(State(state): State<AppState>, Json(body): Json<RequestCodeBody>) -> Response {
    if email_auth::normalize_email(&body.email).is_none() {
        return email_error_response(&EmailAuthError::InvalidEmail);
    }
    if state.config.email.is_none() && !state.config.echo_codes {
        tracing::warn!("code requested but email delivery is not configured and echo is disabled");
        return email_error_response(&EmailAuthError::DeliveryUnavailable);
    }

    let issued = match email_auth::request_access_code(&state.pool, &body.email).await {
        Ok(issued) => issued,
        Err(e) => {
            tracing::warn!(error = %e, "access code request rejected");
            return email_error_response(&e);
        }
    };

    if let Some(email_config) = &state.config.email {
        if let Err(e) = email_auth::send_verification_email(email_config, &issued).await {
            tracing::error!(error = %e, "verification email failed");
            return (email_error_status(&e), "failed to send verification email").into_response();
        }
        tracing::info!(email = %issued.email, unverified = issued.unverified, "sign-in code emailed");
    } else {
        tracing::info!(email = %issued.email, "email delivery not configured; echoing code");
    }

    let code = state.config.echo_codes.then_some(issued.code);
    Json(RequestCodeResponse { ok: true, code }).into_response()
}

#[derive(Deserialize)]
pub struct VerifyCodeBody {
    email: String,
    code: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct VerifyCodeResponse {
    pub ok: bool,
}

/// `POST /api/auth/email/verify-code`: consume the code, start a session.
pub async fn verify_email_code(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<VerifyCodeBody>,
) -> Response {
    let verified = match email_auth::verify_access_code(&state.pool, &body.email, &body.code).await {
        Ok(verified) => verified,
        Err(e) => {
            tracing::info!(error = %e, "access code verification failed");
            return email_error_response(&e);
        }
    };
    let user_id = verified.user_id;

    let token = match session::create_session(&state.pool, user_id).await {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "session creation failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to create session").into_response();
        }
    };

    if verified.first_verification {
        tracing::info!(%user_id, "email address verified");
    }
    tracing::info!(%user_id, "signed in with email code");
    let jar = jar.add(session_cookie(token, state.config.cookie_secure));
    (jar, Json(VerifyCodeResponse { ok: true })).into_response()
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

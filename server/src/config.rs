//! Server configuration parsed from environment variables.
//!
//! Required:
//! - `DATABASE_URL`
//!
//! Optional:
//! - `PORT`: default 3000
//! - `DB_MAX_CONNECTIONS`: default 5
//! - `RESEND_API_KEY` + `RESEND_FROM`: verification email delivery; set both or neither
//! - `EMAIL_CODE_ECHO`: return the sign-in code in the API response (local development)
//! - `COOKIE_SECURE`: mark the session cookie `Secure`

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    Missing(&'static str),
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
    #[error("RESEND_API_KEY and RESEND_FROM must be set together")]
    IncompleteEmail,
}

/// Credentials for the Resend verification email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailConfig {
    pub api_key: String,
    pub from: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    /// `None` disables delivery; codes are then only logged or echoed.
    pub email: Option<EmailConfig>,
    pub echo_codes: bool,
    pub cookie_secure: bool,
}

impl ServerConfig {
    /// Build config from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a value
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = non_empty(lookup("DATABASE_URL")).ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT)?;
        let db_max_connections = parse_or("DB_MAX_CONNECTIONS", lookup("DB_MAX_CONNECTIONS"), DEFAULT_DB_MAX_CONNECTIONS)?;

        let email = match (non_empty(lookup("RESEND_API_KEY")), non_empty(lookup("RESEND_FROM"))) {
            (Some(api_key), Some(from)) => Some(EmailConfig { api_key, from }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteEmail),
        };

        let echo_codes = bool_or("EMAIL_CODE_ECHO", lookup("EMAIL_CODE_ECHO"), false)?;
        let cookie_secure = bool_or("COOKIE_SECURE", lookup("COOKIE_SECURE"), false)?;

        Ok(Self { database_url, port, db_max_connections, email, echo_codes, cookie_secure })
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

fn parse_or<T: std::str::FromStr>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match non_empty(raw) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { var, value }),
    }
}

fn bool_or(var: &'static str, raw: Option<String>, default: bool) -> Result<bool, ConfigError> {
    match non_empty(raw) {
        None => Ok(default),
        Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid { var, value }),
    }
}

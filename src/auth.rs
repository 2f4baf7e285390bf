//! Demo Login
//!
//! TigerStyle: Demo-only credential check. NOT real authentication.
//!
//! A single configured username/password pair is compared in memory and a
//! successful login returns an opaque token (base64 of `user:timestamp`).
//! Tokens are never stored or verified; nothing in the API is protected by
//! them. Do not reuse this for anything beyond a demo.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// TigerStyle Constants
// =============================================================================

/// Default demo username
pub const DEMO_USERNAME_DEFAULT: &str = "demo";

/// Default demo password
pub const DEMO_PASSWORD_DEFAULT: &str = "demo123";

// =============================================================================
// Types
// =============================================================================

/// The one accepted credential pair
#[derive(Clone, PartialEq, Eq)]
pub struct DemoCredentials {
    username: String,
    password: String,
}

impl std::fmt::Debug for DemoCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DemoCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Default for DemoCredentials {
    fn default() -> Self {
        Self::new(DEMO_USERNAME_DEFAULT, DEMO_PASSWORD_DEFAULT)
    }
}

/// Login request body
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Login response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub username: String,
    pub token: String,
}

impl DemoCredentials {
    /// Create a credential pair
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Configured username
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Check a login attempt at the given instant.
    ///
    /// Username: trimmed, case-insensitive. Password: exact.
    pub fn login(&self, request: &LoginRequest, now: DateTime<Utc>) -> Result<LoginResponse, AuthError> {
        let username = request.username.trim();
        if username.is_empty() || request.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let user_ok = username.eq_ignore_ascii_case(&self.username);
        let password_ok = request.password == self.password;
        if !(user_ok && password_ok) {
            tracing::warn!("Rejected demo login");
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(username = username, "Demo login succeeded");
        Ok(LoginResponse {
            username: username.to_string(),
            token: issue_token(username, now),
        })
    }
}

/// Opaque token: base64("{username}:{rfc3339 timestamp}")
pub fn issue_token(username: &str, now: DateTime<Utc>) -> String {
    let raw = format!(
        "{}:{}",
        username,
        now.to_rfc3339_opts(SecondsFormat::Micros, true)
    );
    BASE64.encode(raw.as_bytes())
}

// =============================================================================
// Errors
// =============================================================================

/// Login errors. Messages never say which field was wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("username and password are required")]
    MissingCredentials,

    #[error("Invalid credentials")]
    InvalidCredentials,
}

// =============================================================================
// Tests
// =============================================================================

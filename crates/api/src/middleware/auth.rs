//! HTTP Basic authentication extractor for mutating handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use breaktime_core::error::CoreError;
use breaktime_core::schedule::ACTOR_UNKNOWN;
use sha2::{Digest, Sha256};

use crate::config::AdminCredentials;
use crate::error::AppError;
use crate::state::AppState;

/// The identity recorded as `changed_by` on revisions.
///
/// Add it as an extractor parameter to any handler that mutates state:
///
/// ```ignore
/// async fn my_handler(actor: Actor) -> AppResult<StatusCode> {
///     tracing::info!(changed_by = %actor.name, "handling request");
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
///
/// With no admin credentials configured every request is accepted and the
/// actor is `"unknown"`.
#[derive(Debug, Clone)]
pub struct Actor {
    pub name: String,
}

impl FromRequestParts<AppState> for Actor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(admin) = state.config.admin.as_ref() else {
            return Ok(Actor {
                name: ACTOR_UNKNOWN.to_string(),
            });
        };

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;

        let credentials = BasicCredentials::parse(auth_header).ok_or_else(|| {
            unauthorized("Invalid Authorization format. Expected: Basic <credentials>")
        })?;

        if !credentials.matches(admin) {
            tracing::warn!(username = %credentials.username, "Rejected admin credentials");
            return Err(unauthorized("Invalid username or password"));
        }

        Ok(Actor {
            name: credentials.username,
        })
    }
}

/// Decoded `Authorization: Basic` credentials.
#[derive(Debug, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    /// Parse a raw header value. The scheme is case-insensitive; the
    /// password may itself contain `:`.
    pub fn parse(header: &str) -> Option<Self> {
        let (scheme, encoded) = header.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }
        let decoded = STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;
        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Both fields are always compared, via their SHA-256 digests.
    pub fn matches(&self, expected: &AdminCredentials) -> bool {
        let user_ok = digest(&self.username) == digest(&expected.username);
        let pass_ok = digest(&self.password) == digest(&expected.password);
        user_ok & pass_ok
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.to_string()))
}

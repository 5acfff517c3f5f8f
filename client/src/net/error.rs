//! Failure taxonomy shared by every session operation.
//!
//! ERROR HANDLING
//! ==============
//! Backend responses are normalized here so pages only ever see one
//! human-readable string in `SessionState::error`. Client-side field
//! validation never produces an `AuthError`; see `util::validate`.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde::de::DeserializeOwned;

use super::types::ErrorBody;

const NETWORK_MESSAGE: &str = "Unable to reach the server. Please try again.";
const VALIDATION_FALLBACK: &str = "The server rejected the request.";
const AUTH_FALLBACK: &str = "Invalid credentials or expired link.";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The request never produced a usable response.
    #[error("network failure: {0}")]
    Network(String),
    /// The backend rejected the payload; the text is shown verbatim.
    #[error("{0}")]
    Validation(String),
    /// Wrong credentials, or an expired or tampered reset token.
    #[error("{0}")]
    Auth(String),
}

impl AuthError {
    /// The string placed into the session store's `error` field.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => NETWORK_MESSAGE.to_owned(),
            Self::Validation(msg) | Self::Auth(msg) => msg.clone(),
        }
    }
}

/// Map a non-2xx response onto the failure taxonomy.
///
/// Status `0` is what the fetch layer reports when no response arrived.
pub fn classify_failure(status: u16, body: &str) -> AuthError {
    let text = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.text().map(str::to_owned));
    match status {
        0 => AuthError::Network("no response".to_owned()),
        400 | 409 | 422 => AuthError::Validation(text.unwrap_or_else(|| VALIDATION_FALLBACK.to_owned())),
        401 | 403 | 410 => AuthError::Auth(text.unwrap_or_else(|| AUTH_FALLBACK.to_owned())),
        other => AuthError::Network(format!("request failed: {other}")),
    }
}

/// Decode a 2xx body, treating an embedded `error` field as a rejection.
///
/// # Errors
///
/// Returns `Validation` when the body carries an `error` field and `Network`
/// when the body does not match the expected shape.
pub fn decode_success<T: DeserializeOwned>(body: &str) -> Result<T, AuthError> {
    if let Ok(ErrorBody { error: Some(error), .. }) = serde_json::from_str::<ErrorBody>(body) {
        if !error.trim().is_empty() {
            return Err(AuthError::Validation(error.trim().to_owned()));
        }
    }
    let body = if body.trim().is_empty() { "{}" } else { body };
    serde_json::from_str(body).map_err(|e| AuthError::Network(format!("unexpected response: {e}")))
}

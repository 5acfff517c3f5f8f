//! REST client for the auth backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, always with
//! credentials included so the backend's session cookie travels along.
//! Server-side (SSR) and native tests: every call fails with
//! `AuthError::Network`, since these endpoints are only meaningful in the
//! browser.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses go through `classify_failure`; 2xx bodies through
//! `decode_success`. Nothing here retries: each call is one user submit.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::config::ApiConfig;
use super::error::AuthError;
#[cfg(feature = "hydrate")]
use super::types::PingResponse;
use super::types::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse, ResetPasswordRequest, ResetToken,
    SignupRequest,
};

pub const LOGIN_PATH: &str = "auth/login";
pub const SIGNUP_PATH: &str = "auth/signup";
pub const FORGOT_PASSWORD_PATH: &str = "auth/forgot-password";
pub const RESET_PASSWORD_PATH: &str = "auth/reset-password";
pub const RESET_PASSWORD_PING_PATH: &str = "auth/reset-password/ping";
pub const LOGOUT_PATH: &str = "auth/logout";

#[cfg(not(feature = "hydrate"))]
const NOT_AVAILABLE: &str = "not available on server";

/// One network round trip per session operation.
#[allow(async_fn_in_trait)]
pub trait AuthBackend {
    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, AuthError>;
    async fn signup(&self, req: &SignupRequest) -> Result<MessageResponse, AuthError>;
    async fn forgot_password(&self, req: &ForgotPasswordRequest) -> Result<MessageResponse, AuthError>;
    async fn reset_password(&self, req: &ResetPasswordRequest) -> Result<MessageResponse, AuthError>;
    /// Resolves `Ok(true)` only when the backend accepts the reset link.
    async fn reset_password_ping(&self, link: &ResetToken) -> Result<bool, AuthError>;
    async fn logout(&self) -> Result<(), AuthError>;
}

/// `AuthBackend` over HTTP against the configured API base.
#[derive(Clone, Debug, Default)]
pub struct HttpBackend {
    config: ApiConfig,
}

impl HttpBackend {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::post(&self.config.endpoint(path))
                .credentials(web_sys::RequestCredentials::Include)
                .json(body)
                .map_err(|e| AuthError::Network(e.to_string()))?
                .send()
                .await
                .map_err(|e| AuthError::Network(e.to_string()))?;
            read_response(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (path, body);
            Err(AuthError::Network(NOT_AVAILABLE.to_owned()))
        }
    }
}

#[cfg(feature = "hydrate")]
async fn read_response<T: DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, AuthError> {
    let status = resp.status();
    let ok = resp.ok();
    let text = resp.text().await.map_err(|e| AuthError::Network(e.to_string()))?;
    if !ok {
        return Err(super::error::classify_failure(status, &text));
    }
    super::error::decode_success(&text)
}

/// Query pairs for the ping endpoint, in the order the backend documents.
fn ping_query(link: &ResetToken) -> [(&'static str, &str); 3] {
    [("token", link.token.as_str()), ("email", link.email.as_str()), ("time", link.time.as_str())]
}

impl AuthBackend for HttpBackend {
    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, AuthError> {
        self.post_json(LOGIN_PATH, req).await
    }

    async fn signup(&self, req: &SignupRequest) -> Result<MessageResponse, AuthError> {
        self.post_json(SIGNUP_PATH, req).await
    }

    async fn forgot_password(&self, req: &ForgotPasswordRequest) -> Result<MessageResponse, AuthError> {
        self.post_json(FORGOT_PASSWORD_PATH, req).await
    }

    async fn reset_password(&self, req: &ResetPasswordRequest) -> Result<MessageResponse, AuthError> {
        self.post_json(RESET_PASSWORD_PATH, req).await
    }

    async fn reset_password_ping(&self, link: &ResetToken) -> Result<bool, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(&self.config.endpoint(RESET_PASSWORD_PING_PATH))
                .query(ping_query(link))
                .credentials(web_sys::RequestCredentials::Include)
                .send()
                .await
                .map_err(|e| AuthError::Network(e.to_string()))?;
            let body: PingResponse = read_response(resp).await?;
            Ok(body.ok)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = ping_query(link);
            Err(AuthError::Network(NOT_AVAILABLE.to_owned()))
        }
    }

    async fn logout(&self) -> Result<(), AuthError> {
        let _: MessageResponse = self.post_json(LOGOUT_PATH, &serde_json::json!({})).await?;
        Ok(())
    }
}

//! Async session operations.
//!
//! ARCHITECTURE
//! ============
//! Each operation is one user-triggered round trip. All but the ping share the
//! same contract: `begin_operation` before the request, then exactly one of
//! `succeed`/`fail` when it settles. Store writes are skipped once the
//! originating page's `PageScope` has closed. The outcome is also returned so
//! the page can navigate or notify.

#[cfg(test)]
#[path = "session_ops_test.rs"]
mod session_ops_test;

use crate::net::api::{AuthBackend, HttpBackend};
use crate::net::error::AuthError;
use crate::net::types::{ForgotPasswordRequest, LoginRequest, ResetPasswordRequest, ResetToken, SignupRequest, UserInfo};
use crate::state::session::{SessionState, SessionWriter};
use crate::util::lifecycle::PageScope;
use crate::util::session_storage::{BrowserStorage, SessionPersistence};

pub const SIGNUP_DEFAULT_MESSAGE: &str = "Account created. You can now sign in.";
pub const FORGOT_DEFAULT_MESSAGE: &str = "If that email is registered, a reset link is on its way.";
pub const RESET_DEFAULT_MESSAGE: &str = "Password updated. Please sign in.";

/// The operations the console's pages use.
pub type ConsoleOps = SessionOps<HttpBackend, BrowserStorage>;

#[derive(Clone, Debug, Default)]
pub struct SessionOps<B, P> {
    backend: B,
    persistence: P,
}

/// Mark the operation in flight and return its generation.
///
/// `None` means the page had already closed and nothing was written.
fn begin(session: &impl SessionWriter, scope: &PageScope, op: &str) -> Option<u64> {
    let mut seq = None;
    settle(session, scope, op, None, |s| {
        s.begin_operation();
        seq = Some(s.op_seq);
    });
    seq
}

/// Apply `f` if the page that started the operation is still mounted.
///
/// A late response only releases `loading`, and only while its operation is
/// still the newest, so the next page's submit controls are neither left
/// disabled nor re-enabled mid-flight.
fn settle(
    session: &impl SessionWriter,
    scope: &PageScope,
    op: &str,
    seq: Option<u64>,
    f: impl FnOnce(&mut SessionState),
) {
    if !scope.is_alive() {
        leptos::logging::log!("{op}: page closed, dropping late response");
        if let Some(seq) = seq {
            session.write(|s| s.release_if_current(seq));
        }
        return;
    }
    if !session.write(f) {
        leptos::logging::log!("{op}: session store gone, dropping late response");
    }
}

fn settle_message(
    session: &impl SessionWriter,
    scope: &PageScope,
    op: &str,
    seq: Option<u64>,
    result: &Result<String, AuthError>,
) {
    match result {
        Ok(message) => settle(session, scope, op, seq, |s| s.succeed(None, Some(message.clone()))),
        Err(e) => {
            leptos::logging::warn!("{op} failed: {e}");
            settle(session, scope, op, seq, |s| s.fail(e.user_message()));
        }
    }
}

fn message_or(message: Option<String>, fallback: &str) -> String {
    message.filter(|m| !m.trim().is_empty()).unwrap_or_else(|| fallback.to_owned())
}

impl<B: AuthBackend, P: SessionPersistence> SessionOps<B, P> {
    pub fn new(backend: B, persistence: P) -> Self {
        Self { backend, persistence }
    }

    /// Sign in and make the returned user the session's user.
    ///
    /// # Errors
    ///
    /// Returns the backend failure after recording it in the store.
    pub async fn login(
        &self,
        session: &impl SessionWriter,
        scope: &PageScope,
        req: &LoginRequest,
    ) -> Result<UserInfo, AuthError> {
        let seq = begin(session, scope, "login");
        match self.backend.login(req).await {
            Ok(resp) => {
                if scope.is_alive() {
                    self.persistence.save_user(&resp.user);
                }
                let user = resp.user.clone();
                settle(session, scope, "login", seq, move |s| s.succeed(Some(resp.user), resp.message));
                Ok(user)
            }
            Err(e) => {
                leptos::logging::warn!("login failed: {e}");
                settle(session, scope, "login", seq, |s| s.fail(e.user_message()));
                Err(e)
            }
        }
    }

    /// Create an account. The new user is not signed in.
    ///
    /// # Errors
    ///
    /// Returns the backend failure after recording it in the store.
    pub async fn signup(
        &self,
        session: &impl SessionWriter,
        scope: &PageScope,
        req: &SignupRequest,
    ) -> Result<String, AuthError> {
        let seq = begin(session, scope, "signup");
        let result = self.backend.signup(req).await.map(|r| message_or(r.message, SIGNUP_DEFAULT_MESSAGE));
        settle_message(session, scope, "signup", seq, &result);
        result
    }

    /// # Errors
    ///
    /// Returns the backend failure after recording it in the store.
    pub async fn forgot_password(
        &self,
        session: &impl SessionWriter,
        scope: &PageScope,
        req: &ForgotPasswordRequest,
    ) -> Result<String, AuthError> {
        let seq = begin(session, scope, "forgot-password");
        let result = self
            .backend
            .forgot_password(req)
            .await
            .map(|r| message_or(r.message, FORGOT_DEFAULT_MESSAGE));
        settle_message(session, scope, "forgot-password", seq, &result);
        result
    }

    /// # Errors
    ///
    /// Returns the backend failure after recording it in the store.
    pub async fn reset_password(
        &self,
        session: &impl SessionWriter,
        scope: &PageScope,
        req: &ResetPasswordRequest,
    ) -> Result<String, AuthError> {
        let seq = begin(session, scope, "reset-password");
        let result = self
            .backend
            .reset_password(req)
            .await
            .map(|r| message_or(r.message, RESET_DEFAULT_MESSAGE));
        settle_message(session, scope, "reset-password", seq, &result);
        result
    }

    /// Check a reset link without touching the session store.
    ///
    /// Any failure counts as a rejected link.
    pub async fn reset_password_ping(&self, link: &ResetToken) -> bool {
        match self.backend.reset_password_ping(link).await {
            Ok(accepted) => accepted,
            Err(e) => {
                leptos::logging::warn!("reset-password ping failed: {e}");
                false
            }
        }
    }

    /// Clear the session locally, then tell the backend.
    ///
    /// The local purge happens first and regardless of the backend's answer.
    pub async fn logout(&self, session: &impl SessionWriter) {
        self.persistence.purge();
        session.write(SessionState::logout);
        if let Err(e) = self.backend.logout().await {
            leptos::logging::warn!("logout request failed: {e}");
        }
    }

    /// Adopt a user persisted by an earlier visit, if there is one.
    pub fn restore(&self, session: &impl SessionWriter) -> bool {
        let Some(user) = self.persistence.load_user() else {
            return false;
        };
        session.write(|s| s.restore(user))
    }
}

//! Navigation policy for the auth pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages never decide redirects on their own. They report what happened as a
//! `GuardEvent` and act on the `GuardAction` that `decide` returns, so the
//! whole redirect table lives in one match.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::components::notification::NotificationKind;
use crate::net::types::ResetToken;
use crate::state::session::{AuthPhase, SessionState};

pub const HOME_ROUTE: &str = "/";
pub const LOGIN_ROUTE: &str = "/login";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardEvent {
    /// Login, signup or forgot-password page mounted.
    AuthPageEntered,
    /// A page that needs a signed-in user mounted.
    ProtectedPageEntered,
    LoginSettled { ok: bool },
    /// Reset page mounted; `None` when the link lacked `token` or `email`.
    ResetPageEntered(Option<ResetToken>),
    PingSettled { accepted: bool },
    ResetSettled { ok: bool },
    LoggedOut,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardAction {
    Stay,
    Redirect(&'static str),
    /// Validate the reset link before showing the form.
    Ping(ResetToken),
    ShowResetForm,
    Notify(NotificationKind),
}

pub fn decide(event: &GuardEvent, state: &SessionState) -> GuardAction {
    match event {
        GuardEvent::AuthPageEntered => {
            if state.is_authenticated {
                GuardAction::Redirect(HOME_ROUTE)
            } else {
                GuardAction::Stay
            }
        }
        GuardEvent::ProtectedPageEntered => match state.phase() {
            AuthPhase::Anonymous => GuardAction::Redirect(LOGIN_ROUTE),
            AuthPhase::Authenticating | AuthPhase::Authenticated => GuardAction::Stay,
        },
        GuardEvent::LoginSettled { ok: true }
        | GuardEvent::PingSettled { accepted: false }
        | GuardEvent::ResetSettled { ok: true }
        | GuardEvent::LoggedOut => GuardAction::Redirect(HOME_ROUTE),
        GuardEvent::LoginSettled { ok: false } | GuardEvent::ResetSettled { ok: false } => {
            GuardAction::Notify(NotificationKind::Error)
        }
        GuardEvent::ResetPageEntered(link) => match link {
            _ if state.is_authenticated => GuardAction::Redirect(HOME_ROUTE),
            Some(link) => GuardAction::Ping(link.clone()),
            None => GuardAction::Redirect(HOME_ROUTE),
        },
        GuardEvent::PingSettled { accepted: true } => GuardAction::ShowResetForm,
    }
}

impl ResetToken {
    /// Extract the reset link from query parameters.
    ///
    /// `token`, `email` and `time` must all be present and non-blank.
    pub fn from_query(param: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let present = |key: &str| param(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        Some(Self {
            token: present("token")?,
            email: present("email")?,
            time: present("time")?,
        })
    }
}

/// Redirect away from an auth page whenever the session becomes authenticated.
pub fn install_auth_page_redirect<F>(session: RwSignal<SessionState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let GuardAction::Redirect(path) = decide(&GuardEvent::AuthPageEntered, &session.get()) {
            navigate(path, NavigateOptions::default());
        }
    });
}

/// Redirect to `/login` whenever the session settles without a user.
pub fn install_protected_redirect<F>(session: RwSignal<SessionState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let GuardAction::Redirect(path) = decide(&GuardEvent::ProtectedPageEntered, &session.get()) {
            navigate(path, NavigateOptions::default());
        }
    });
}

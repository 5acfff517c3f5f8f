//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its form fields and its `PageScope`, reports lifecycle
//! events to `util::guard`, and delegates rendering of notices to
//! `components::notification`.

pub mod forgot_password;
pub mod home;
pub mod login;
pub mod reset_password;
pub mod signup;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::notification::{NotificationKind, notice_from_session};
use crate::state::session::SessionState;
use crate::util::validate::{Field, FieldErrors};

/// Signals driving a page's `Notification` from the session's error/message.
#[derive(Clone, Copy)]
pub(crate) struct SessionNotice {
    pub visible: RwSignal<bool>,
    pub message: Signal<String>,
    pub kind: Signal<NotificationKind>,
}

/// Raise the page's notice whenever the session gains an error or message.
pub(crate) fn watch_session_notice(session: RwSignal<SessionState>) -> SessionNotice {
    let notice = Memo::new(move |_| notice_from_session(&session.get()));
    let visible = RwSignal::new(false);
    Effect::new(move || visible.set(notice.get().is_some()));
    SessionNotice {
        visible,
        message: Signal::derive(move || notice.get().map(|(_, text)| text).unwrap_or_default()),
        kind: Signal::derive(move || notice.get().map(|(kind, _)| kind).unwrap_or_default()),
    }
}

/// Navigate whenever `target` is set, then reset it.
///
/// Async tasks request redirects through this signal instead of holding the
/// router's navigate handle.
pub(crate) fn install_redirect(target: RwSignal<Option<&'static str>>) {
    let navigate = use_navigate();
    Effect::new(move || {
        if let Some(path) = target.get() {
            target.set(None);
            navigate(path, NavigateOptions::default());
        }
    });
}

/// Inline message for one form field.
#[component]
pub(crate) fn FieldError(errors: RwSignal<FieldErrors>, field: Field) -> impl IntoView {
    view! {
        {move || errors.get().get(field).map(|msg| view! { <p class="field-error">{msg}</p> })}
    }
}

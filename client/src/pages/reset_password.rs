//! Reset-password page, reached from the emailed link.
//!
//! SYSTEM CONTEXT
//! ==============
//! The link's `token`/`email`/`time` query parameters are pinged once on entry.
//! The form renders only after the backend accepts them; any rejection sends
//! the visitor home.

#[cfg(test)]
#[path = "reset_password_test.rs"]
mod reset_password_test;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use super::{FieldError, install_redirect, watch_session_notice};
use crate::components::notification::Notification;
use crate::net::types::ResetToken;
use crate::state::session::SessionState;
use crate::state::session_ops::ConsoleOps;
use crate::util::guard::{GuardAction, GuardEvent, decide};
use crate::util::lifecycle::PageScope;
use crate::util::validate::{Field, FieldErrors, validate_reset};

/// What the page shows while its link is being checked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LinkStatus {
    #[default]
    Checking,
    Accepted,
    Rejected,
}

impl LinkStatus {
    /// Status after the guard's verdict on a ping.
    pub fn from_action(action: &GuardAction) -> Self {
        match action {
            GuardAction::ShowResetForm => Self::Accepted,
            GuardAction::Redirect(_) => Self::Rejected,
            _ => Self::Checking,
        }
    }
}

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let ops = expect_context::<ConsoleOps>();
    let query = use_query_map();
    let scope = PageScope::install(session);
    let redirect = RwSignal::new(None::<&'static str>);
    install_redirect(redirect);
    let notice = watch_session_notice(session);

    let link = StoredValue::new(ResetToken::from_query(|key| query.with_untracked(|q| q.get(key))));
    let status = RwSignal::new(LinkStatus::Checking);

    // Entry: reads are untracked, so this runs exactly once per mount.
    {
        let ops = ops.clone();
        let scope = scope.clone();
        Effect::new(move || {
            let entered = GuardEvent::ResetPageEntered(link.get_value());
            match decide(&entered, &session.get_untracked()) {
                GuardAction::Ping(token) => {
                    let ops = ops.clone();
                    let scope = scope.clone();
                    leptos::task::spawn_local(async move {
                        let accepted = ops.reset_password_ping(&token).await;
                        if !scope.is_alive() {
                            return;
                        }
                        let verdict = decide(&GuardEvent::PingSettled { accepted }, &session.get_untracked());
                        status.set(LinkStatus::from_action(&verdict));
                        if let GuardAction::Redirect(path) = verdict {
                            redirect.set(Some(path));
                        }
                    });
                }
                GuardAction::Redirect(path) => {
                    status.set(LinkStatus::Rejected);
                    redirect.set(Some(path));
                }
                _ => {}
            }
        });
    }

    let new_password = RwSignal::new(String::new());
    let re_password = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if session.get_untracked().loading {
            return;
        }
        let Some(link) = link.get_value() else {
            return;
        };
        let req = match validate_reset(&new_password.get_untracked(), &re_password.get_untracked(), &link) {
            Ok(req) => req,
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };
        errors.set(FieldErrors::default());

        let ops = ops.clone();
        let scope = scope.clone();
        leptos::task::spawn_local(async move {
            let ok = ops.reset_password(&session, &scope, &req).await.is_ok();
            if !scope.is_alive() {
                return;
            }
            match decide(&GuardEvent::ResetSettled { ok }, &session.get_untracked()) {
                GuardAction::Redirect(path) => redirect.set(Some(path)),
                GuardAction::Notify(_) => notice.visible.set(true),
                _ => {}
            }
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Choose a new password"</h1>
                <Show
                    when=move || status.get() == LinkStatus::Accepted
                    fallback=|| view! { <p class="auth-card__subtitle">"Checking your reset link..."</p> }
                >
                    <form class="auth-form" on:submit=on_submit.clone()>
                        <input
                            class="auth-input"
                            type="password"
                            placeholder="New password"
                            prop:value=move || new_password.get()
                            on:input=move |ev| new_password.set(event_target_value(&ev))
                        />
                        <FieldError errors=errors field=Field::NewPassword/>
                        <input
                            class="auth-input"
                            type="password"
                            placeholder="Confirm new password"
                            prop:value=move || re_password.get()
                            on:input=move |ev| re_password.set(event_target_value(&ev))
                        />
                        <FieldError errors=errors field=Field::RePassword/>
                        <button class="auth-button" type="submit" disabled=move || session.get().loading>
                            "Update password"
                        </button>
                    </form>
                </Show>
            </div>
            <Notification message=notice.message kind=notice.kind visible=notice.visible/>
        </div>
    }
}

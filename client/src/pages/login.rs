//! Login page: email + password sign-in.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use super::{FieldError, install_redirect, watch_session_notice};
use crate::components::notification::Notification;
use crate::state::session::SessionState;
use crate::state::session_ops::ConsoleOps;
use crate::util::guard::{GuardAction, GuardEvent, decide, install_auth_page_redirect};
use crate::util::lifecycle::PageScope;
use crate::util::validate::{Field, FieldErrors, validate_login};

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let ops = expect_context::<ConsoleOps>();
    let scope = PageScope::install(session);
    install_auth_page_redirect(session, use_navigate());
    let redirect = RwSignal::new(None::<&'static str>);
    install_redirect(redirect);
    let notice = watch_session_notice(session);

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if session.get_untracked().loading {
            return;
        }
        let req = match validate_login(&email.get_untracked(), &password.get_untracked()) {
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
            let ok = ops.login(&session, &scope, &req).await.is_ok();
            if !scope.is_alive() {
                return;
            }
            match decide(&GuardEvent::LoginSettled { ok }, &session.get_untracked()) {
                GuardAction::Redirect(path) => redirect.set(Some(path)),
                GuardAction::Notify(_) => notice.visible.set(true),
                _ => {}
            }
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Sign in"</h1>
                <p class="auth-card__subtitle">"Manage your home from anywhere"</p>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <FieldError errors=errors field=Field::Email/>
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <FieldError errors=errors field=Field::Password/>
                    <button class="auth-button" type="submit" disabled=move || session.get().loading>
                        {move || if session.get().loading { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <div class="auth-links">
                    <A href="/forgot-password">"Forgot password?"</A>
                    <A href="/signup">"Create an account"</A>
                </div>
            </div>
            <Notification message=notice.message kind=notice.kind visible=notice.visible/>
        </div>
    }
}

//! Forgot-password page: request a reset link by email.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use super::{FieldError, watch_session_notice};
use crate::components::notification::Notification;
use crate::state::session::SessionState;
use crate::state::session_ops::ConsoleOps;
use crate::util::guard::install_auth_page_redirect;
use crate::util::lifecycle::PageScope;
use crate::util::validate::{Field, FieldErrors, validate_forgot};

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let ops = expect_context::<ConsoleOps>();
    let scope = PageScope::install(session);
    install_auth_page_redirect(session, use_navigate());
    let notice = watch_session_notice(session);

    let email = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if session.get_untracked().loading {
            return;
        }
        let req = match validate_forgot(&email.get_untracked()) {
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
            let _ = ops.forgot_password(&session, &scope, &req).await;
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Reset your password"</h1>
                <p class="auth-card__subtitle">"We'll email you a link to choose a new one."</p>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <FieldError errors=errors field=Field::Email/>
                    <button class="auth-button" type="submit" disabled=move || session.get().loading>
                        "Send reset link"
                    </button>
                </form>
                <div class="auth-links">
                    <A href="/login">"Back to sign in"</A>
                </div>
            </div>
            <Notification message=notice.message kind=notice.kind visible=notice.visible/>
        </div>
    }
}

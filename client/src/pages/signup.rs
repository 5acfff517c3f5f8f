//! Signup page. A new account is not signed in automatically.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use super::{FieldError, watch_session_notice};
use crate::components::notification::Notification;
use crate::state::session::SessionState;
use crate::state::session_ops::ConsoleOps;
use crate::util::guard::install_auth_page_redirect;
use crate::util::lifecycle::PageScope;
use crate::util::validate::{Field, FieldErrors, validate_signup};

/// Raw signup form input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupFields {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignupFields {
    /// Fields to show once a submit settles: cleared on success, kept otherwise.
    pub fn after_submit(self, ok: bool) -> Self {
        if ok { Self::default() } else { self }
    }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let ops = expect_context::<ConsoleOps>();
    let scope = PageScope::install(session);
    install_auth_page_redirect(session, use_navigate());
    let notice = watch_session_notice(session);

    let fields = RwSignal::new(SignupFields::default());
    let errors = RwSignal::new(FieldErrors::default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if session.get_untracked().loading {
            return;
        }
        let input = fields.get_untracked();
        let req = match validate_signup(&input.name, &input.email, &input.password) {
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
            let ok = ops.signup(&session, &scope, &req).await.is_ok();
            if scope.is_alive() {
                fields.update(|f| *f = std::mem::take(f).after_submit(ok));
            }
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Create your account"</h1>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="text"
                        placeholder="Full name"
                        prop:value=move || fields.get().name
                        on:input=move |ev| fields.update(|f| f.name = event_target_value(&ev))
                    />
                    <FieldError errors=errors field=Field::Name/>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || fields.get().email
                        on:input=move |ev| fields.update(|f| f.email = event_target_value(&ev))
                    />
                    <FieldError errors=errors field=Field::Email/>
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Password (6+ characters)"
                        prop:value=move || fields.get().password
                        on:input=move |ev| fields.update(|f| f.password = event_target_value(&ev))
                    />
                    <FieldError errors=errors field=Field::Password/>
                    <button class="auth-button" type="submit" disabled=move || session.get().loading>
                        "Sign up"
                    </button>
                </form>
                <div class="auth-links">
                    <A href="/login">"Already have an account? Sign in"</A>
                </div>
            </div>
            <Notification message=notice.message kind=notice.kind visible=notice.visible/>
        </div>
    }
}

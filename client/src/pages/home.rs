//! Home route: the signed-in landing page.
//!
//! Only a thin consumer of the session: it greets the user and offers logout.
//! Device and organization screens hang off this page elsewhere.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::install_redirect;
use crate::state::session::SessionState;
use crate::state::session_ops::ConsoleOps;
use crate::util::guard::{GuardAction, GuardEvent, decide, install_protected_redirect};

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let ops = expect_context::<ConsoleOps>();
    install_protected_redirect(session, use_navigate());
    let redirect = RwSignal::new(None::<&'static str>);
    install_redirect(redirect);

    let on_logout = move |_| {
        let ops = ops.clone();
        leptos::task::spawn_local(async move {
            ops.logout(&session).await;
            if let GuardAction::Redirect(path) = decide(&GuardEvent::LoggedOut, &session.get_untracked()) {
                redirect.set(Some(path));
            }
        });
    };

    let user = move || session.get().user_info;

    view! {
        <div class="home-page">
            <header class="home-header">
                <h1>"HomeDeck"</h1>
                <button class="auth-button auth-button--ghost" type="button" on:click=on_logout>
                    "Log out"
                </button>
            </header>
            {move || {
                user()
                    .map(|u| {
                        view! {
                            <section class="home-profile">
                                <h2>{format!("Welcome, {}", u.name)}</h2>
                                <p class="home-profile__email">{u.email}</p>
                                <p class="home-profile__role">{u.role}</p>
                                {u.organization.map(|org| view! { <p class="home-profile__org">{org}</p> })}
                            </section>
                        }
                    })
            }}
        </div>
    }
}

//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::net::api::HttpBackend;
use crate::net::config::ApiConfig;
use crate::pages::{
    forgot_password::ForgotPasswordPage, home::HomePage, login::LoginPage, reset_password::ResetPasswordPage,
    signup::SignupPage,
};
use crate::state::session::SessionState;
use crate::state::session_ops::ConsoleOps;
use crate::util::session_storage::BrowserStorage;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session store and the operations that drive it, then sets up
/// client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(SessionState::default());
    let ops = ConsoleOps::new(HttpBackend::new(ApiConfig::from_build_env()), BrowserStorage);

    // Effects only run in the browser, so SSR output stays anonymous and the
    // persisted user is adopted right after hydration.
    {
        let ops = ops.clone();
        Effect::new(move || {
            ops.restore(&session);
        });
    }

    provide_context(session);
    provide_context(ops);

    view! {
        <Title text="HomeDeck"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("signup") view=SignupPage/>
                <Route path=StaticSegment("forgot-password") view=ForgotPasswordPage/>
                <Route path=StaticSegment("reset-password") view=ResetPasswordPage/>
            </Routes>
        </Router>
    }
}

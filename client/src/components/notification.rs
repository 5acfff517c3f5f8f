//! Transient notification banner.
//!
//! The banner owns no state of its own: visibility is a signal handed in by the
//! parent page, which decides when to raise it. The banner only lowers it,
//! either when the dismiss timer fires or when the close button is pressed.

#[cfg(test)]
#[path = "notification_test.rs"]
mod notification_test;

use leptos::prelude::*;

use crate::state::session::SessionState;

pub const DEFAULT_DISMISS_MS: u32 = 5_000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    #[default]
    Info,
    Warning,
}

impl NotificationKind {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "notification--success",
            Self::Error => "notification--error",
            Self::Info => "notification--info",
            Self::Warning => "notification--warning",
        }
    }
}

/// The notice a page should display for the current session state, if any.
pub fn notice_from_session(state: &SessionState) -> Option<(NotificationKind, String)> {
    if let Some(error) = &state.error {
        return Some((NotificationKind::Error, error.clone()));
    }
    state.message.as_ref().map(|message| (NotificationKind::Success, message.clone()))
}

#[component]
pub fn Notification(
    #[prop(into)] message: Signal<String>,
    #[prop(into)] kind: Signal<NotificationKind>,
    visible: RwSignal<bool>,
    #[prop(optional)] dismiss_ms: Option<u32>,
) -> impl IntoView {
    // Each raise bumps the generation so an older timer cannot hide a newer notice.
    let generation = StoredValue::new(0_u64);

    Effect::new(move || {
        if !visible.get() {
            return;
        }
        generation.update_value(|g| *g += 1);
        let raised = generation.get_value();

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(dismiss_ms.unwrap_or(DEFAULT_DISMISS_MS)).await;
            if generation.try_get_value() == Some(raised) {
                visible.try_set(false);
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (raised, dismiss_ms);
    });

    view! {
        <Show when=move || visible.get()>
            <div class=move || format!("notification {}", kind.get().css_class()) role="status">
                <span class="notification__message">{move || message.get()}</span>
                <button
                    class="notification__close"
                    type="button"
                    aria-label="Close"
                    on:click=move |_| visible.set(false)
                >
                    "\u{00d7}"
                </button>
            </div>
        </Show>
    }
}

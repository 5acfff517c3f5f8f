//! Page lifetime tracking.
//!
//! SYSTEM CONTEXT
//! ==============
//! Requests are never aborted on navigation. Every page that dispatches a
//! session operation holds a `PageScope`; responses that settle after the page
//! is torn down see a closed scope and skip their store writes.

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod lifecycle_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;

use crate::state::session::{SessionState, SessionWriter};

/// Liveness token shared between a page and the tasks it spawned.
#[derive(Clone, Debug)]
pub struct PageScope {
    alive: Arc<AtomicBool>,
}

impl Default for PageScope {
    fn default() -> Self {
        Self::new()
    }
}

impl PageScope {
    pub fn new() -> Self {
        Self { alive: Arc::new(AtomicBool::new(true)) }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Relaxed)
    }

    pub fn close(&self) {
        self.alive.store(false, Ordering::Relaxed);
    }

    /// Open a scope for the current page and tie its release to page cleanup.
    ///
    /// On cleanup the scope closes and the session's transient `error` and
    /// `message` are cleared so they never leak into the next page.
    pub fn install(session: RwSignal<SessionState>) -> Self {
        let scope = Self::new();
        let on_exit = scope.clone();
        on_cleanup(move || leave_page(&on_exit, &session));
        scope
    }
}

/// Exit action for a page: close its scope, then drop transient messaging.
pub fn leave_page(scope: &PageScope, session: &impl SessionWriter) {
    scope.close();
    session.write(|s| {
        s.clear_error();
        s.clear_success();
    });
}

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;

use leptos::prelude::{RwSignal, Update};

pub use crate::net::types::UserInfo;

/// Authentication state shared by every page.
///
/// Provided once as `RwSignal<SessionState>` context; the methods below are the
/// only mutations pages and operations perform on it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub user_info: Option<UserInfo>,
    pub is_authenticated: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub message: Option<String>,
    /// Generation of the most recent `begin_operation`.
    pub op_seq: u64,
}

/// Coarse auth status the route guard reasons over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthPhase {
    Anonymous,
    Authenticating,
    Authenticated,
}

impl SessionState {
    pub fn phase(&self) -> AuthPhase {
        if self.is_authenticated {
            AuthPhase::Authenticated
        } else if self.loading {
            AuthPhase::Authenticating
        } else {
            AuthPhase::Anonymous
        }
    }

    pub fn begin_operation(&mut self) {
        self.op_seq = self.op_seq.wrapping_add(1);
        self.loading = true;
        self.error = None;
        self.message = None;
    }

    /// Settle the in-flight operation successfully.
    pub fn succeed(&mut self, user_info: Option<UserInfo>, message: Option<String>) {
        self.loading = false;
        if let Some(user) = user_info {
            self.user_info = Some(user);
            self.is_authenticated = true;
        }
        if let Some(message) = message {
            self.message = Some(message);
            self.error = None;
        }
    }

    pub fn fail(&mut self, error: String) {
        self.loading = false;
        self.error = Some(error);
        self.message = None;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn clear_success(&mut self) {
        self.message = None;
    }

    /// Adopt a user record persisted by an earlier visit.
    pub fn restore(&mut self, user_info: UserInfo) {
        self.user_info = Some(user_info);
        self.is_authenticated = true;
    }

    /// Reset to anonymous. The operation generation keeps counting so an
    /// operation begun before the logout never matches one begun after it.
    pub fn logout(&mut self) {
        *self = Self { op_seq: self.op_seq, ..Self::default() };
    }

    /// Release `loading` for an operation whose page has gone, unless a newer
    /// operation has begun since.
    pub fn release_if_current(&mut self, op_seq: u64) {
        if self.op_seq == op_seq {
            self.loading = false;
        }
    }
}

/// Write access to a session store that may already be gone.
///
/// `write` returns `false` when the store was disposed, in which case `f` never
/// ran. Late responses rely on this to become no-ops.
pub trait SessionWriter {
    fn write(&self, f: impl FnOnce(&mut SessionState)) -> bool;
}

impl SessionWriter for RwSignal<SessionState> {
    fn write(&self, f: impl FnOnce(&mut SessionState)) -> bool {
        self.try_update(f).is_some()
    }
}

impl SessionWriter for RefCell<SessionState> {
    fn write(&self, f: impl FnOnce(&mut SessionState)) -> bool {
        match self.try_borrow_mut() {
            Ok(mut state) => {
                f(&mut state);
                true
            }
            Err(_) => false,
        }
    }
}

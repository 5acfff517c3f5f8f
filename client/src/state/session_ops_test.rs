use std::cell::{Cell, RefCell};

use futures::executor::block_on;

use super::*;
use crate::net::types::{LoginResponse, MessageResponse};
use crate::util::session_storage::MemoryStorage;
use crate::util::validate::validate_reset;

fn user() -> UserInfo {
    UserInfo {
        id: "u1".to_owned(),
        name: "Jo".to_owned(),
        email: "jo@x.com".to_owned(),
        role: "owner".to_owned(),
        organization: Some("Acme Homes".to_owned()),
        phone: None,
        avatar_url: None,
    }
}

/// Scripted backend: every call returns the configured outcome.
#[derive(Default)]
struct FakeBackend {
    login: Option<Result<LoginResponse, AuthError>>,
    message: Option<Result<MessageResponse, AuthError>>,
    ping: Option<Result<bool, AuthError>>,
    logout_fails: bool,
    calls: Cell<usize>,
    /// Session observed mid-request, to check `loading` during the round trip.
    loading_seen: Cell<bool>,
    probe: Option<&'static RefCell<SessionState>>,
    /// Closed while the request is in flight, simulating navigation away.
    close_during_call: Option<PageScope>,
    /// Another page begins its own operation on `probe` while this one waits.
    begin_during_call: bool,
}

impl FakeBackend {
    fn enter(&self) {
        self.calls.set(self.calls.get() + 1);
        if let Some(probe) = self.probe {
            self.loading_seen.set(probe.borrow().loading);
        }
        if let Some(scope) = &self.close_during_call {
            scope.close();
        }
        if let (true, Some(probe)) = (self.begin_during_call, self.probe) {
            probe.borrow_mut().begin_operation();
        }
    }

    fn message_result(&self) -> Result<MessageResponse, AuthError> {
        self.enter();
        self.message.clone().unwrap_or_else(|| Ok(MessageResponse::default()))
    }
}

impl AuthBackend for FakeBackend {
    async fn login(&self, _req: &LoginRequest) -> Result<LoginResponse, AuthError> {
        self.enter();
        self.login
            .clone()
            .unwrap_or_else(|| Err(AuthError::Auth("Wrong email or password".to_owned())))
    }

    async fn signup(&self, _req: &SignupRequest) -> Result<MessageResponse, AuthError> {
        self.message_result()
    }

    async fn forgot_password(&self, _req: &ForgotPasswordRequest) -> Result<MessageResponse, AuthError> {
        self.message_result()
    }

    async fn reset_password(&self, _req: &ResetPasswordRequest) -> Result<MessageResponse, AuthError> {
        self.message_result()
    }

    async fn reset_password_ping(&self, _link: &ResetToken) -> Result<bool, AuthError> {
        self.enter();
        self.ping.clone().unwrap_or(Ok(false))
    }

    async fn logout(&self) -> Result<(), AuthError> {
        self.enter();
        if self.logout_fails { Err(AuthError::Network("offline".to_owned())) } else { Ok(()) }
    }
}

fn ops(backend: FakeBackend) -> SessionOps<FakeBackend, MemoryStorage> {
    SessionOps::new(backend, MemoryStorage::default())
}

fn login_req() -> LoginRequest {
    LoginRequest { email: "jo@x.com".to_owned(), password: "abcdef".to_owned() }
}

fn link() -> ResetToken {
    ResetToken { token: "abc".to_owned(), email: "a@b.com".to_owned(), time: "1700000000".to_owned() }
}

// =============================================================
// login
// =============================================================

#[test]
fn login_success_authenticates_and_persists() {
    let ops = ops(FakeBackend {
        login: Some(Ok(LoginResponse { user: user(), message: None })),
        ..FakeBackend::default()
    });
    let session = RefCell::new(SessionState::default());
    let result = block_on(ops.login(&session, &PageScope::new(), &login_req()));

    assert_eq!(result, Ok(user()));
    let state = session.borrow();
    assert!(state.is_authenticated);
    assert_eq!(state.user_info, Some(user()));
    assert!(!state.loading);
    assert_eq!(ops.persistence.load_user(), Some(user()));
}

#[test]
fn login_is_loading_during_round_trip() {
    let session: &'static RefCell<SessionState> = Box::leak(Box::new(RefCell::new(SessionState::default())));
    let backend = FakeBackend {
        login: Some(Ok(LoginResponse { user: user(), message: None })),
        probe: Some(session),
        ..FakeBackend::default()
    };
    let ops = ops(backend);
    block_on(ops.login(session, &PageScope::new(), &login_req())).unwrap();
    assert!(ops.backend.loading_seen.get());
    assert!(!session.borrow().loading);
}

#[test]
fn login_failure_records_error_only() {
    let ops = ops(FakeBackend::default());
    let session = RefCell::new(SessionState { message: Some("old".to_owned()), ..SessionState::default() });
    let err = block_on(ops.login(&session, &PageScope::new(), &login_req())).unwrap_err();

    assert_eq!(err, AuthError::Auth("Wrong email or password".to_owned()));
    let state = session.borrow();
    assert!(!state.is_authenticated);
    assert!(state.user_info.is_none());
    assert_eq!(state.error.as_deref(), Some("Wrong email or password"));
    assert!(state.message.is_none());
    assert!(!state.loading);
    assert!(ops.persistence.load_user().is_none());
}

#[test]
fn login_network_failure_uses_generic_message() {
    let ops = ops(FakeBackend {
        login: Some(Err(AuthError::Network("no response".to_owned()))),
        ..FakeBackend::default()
    });
    let session = RefCell::new(SessionState::default());
    let _ = block_on(ops.login(&session, &PageScope::new(), &login_req()));
    assert_eq!(
        session.borrow().error.as_deref(),
        Some(AuthError::Network(String::new()).user_message().as_str())
    );
}

#[test]
fn login_response_after_page_closed_is_ignored() {
    let scope = PageScope::new();
    let ops = ops(FakeBackend {
        login: Some(Ok(LoginResponse { user: user(), message: None })),
        close_during_call: Some(scope.clone()),
        ..FakeBackend::default()
    });
    let session = RefCell::new(SessionState::default());
    let result = block_on(ops.login(&session, &scope, &login_req()));

    assert!(result.is_ok());
    let state = session.borrow();
    // Only the in-flight flag is released; the late user is not adopted.
    assert!(!state.loading);
    assert!(!state.is_authenticated);
    assert!(ops.persistence.load_user().is_none());
}

#[test]
fn late_response_leaves_newer_operation_loading() {
    let session: &'static RefCell<SessionState> = Box::leak(Box::new(RefCell::new(SessionState::default())));
    let scope = PageScope::new();
    let ops = ops(FakeBackend {
        login: Some(Ok(LoginResponse { user: user(), message: None })),
        probe: Some(session),
        close_during_call: Some(scope.clone()),
        begin_during_call: true,
        ..FakeBackend::default()
    });
    block_on(ops.login(session, &scope, &login_req())).unwrap();

    let state = session.borrow();
    assert!(state.loading);
    assert_eq!(state.op_seq, 2);
    assert!(!state.is_authenticated);
}

// =============================================================
// signup / forgot-password
// =============================================================

#[test]
fn signup_success_sets_message_without_login() {
    let ops = ops(FakeBackend {
        message: Some(Ok(MessageResponse { message: Some("Welcome aboard".to_owned()) })),
        ..FakeBackend::default()
    });
    let session = RefCell::new(SessionState::default());
    let req = SignupRequest { name: "Jo".to_owned(), email: "jo@x.com".to_owned(), password: "abcdef".to_owned() };
    let message = block_on(ops.signup(&session, &PageScope::new(), &req)).unwrap();

    assert_eq!(message, "Welcome aboard");
    let state = session.borrow();
    assert!(!state.is_authenticated);
    assert_eq!(state.message.as_deref(), Some("Welcome aboard"));
    assert!(state.error.is_none());
}

#[test]
fn signup_failure_after_page_closed_leaves_no_error() {
    let scope = PageScope::new();
    let ops = ops(FakeBackend {
        message: Some(Err(AuthError::Validation("Email already registered".to_owned()))),
        close_during_call: Some(scope.clone()),
        ..FakeBackend::default()
    });
    let session = RefCell::new(SessionState::default());
    let req = SignupRequest { name: "Jo".to_owned(), email: "jo@x.com".to_owned(), password: "abcdef".to_owned() };
    assert!(block_on(ops.signup(&session, &scope, &req)).is_err());
    assert!(session.borrow().error.is_none());
    assert!(!session.borrow().loading);
}

#[test]
fn signup_duplicate_email_surfaces_backend_text() {
    let ops = ops(FakeBackend {
        message: Some(Err(AuthError::Validation("Email already registered".to_owned()))),
        ..FakeBackend::default()
    });
    let session = RefCell::new(SessionState::default());
    let req = SignupRequest { name: "Jo".to_owned(), email: "jo@x.com".to_owned(), password: "abcdef".to_owned() };
    assert!(block_on(ops.signup(&session, &PageScope::new(), &req)).is_err());
    assert_eq!(session.borrow().error.as_deref(), Some("Email already registered"));
    assert!(session.borrow().message.is_none());
}

#[test]
fn forgot_password_without_backend_message_uses_default() {
    let ops = ops(FakeBackend::default());
    let session = RefCell::new(SessionState::default());
    let req = ForgotPasswordRequest { email: "jo@x.com".to_owned() };
    block_on(ops.forgot_password(&session, &PageScope::new(), &req)).unwrap();
    assert_eq!(session.borrow().message.as_deref(), Some(FORGOT_DEFAULT_MESSAGE));
}

// =============================================================
// reset-password and ping
// =============================================================

#[test]
fn ping_accepted_resolves_true() {
    let ops = ops(FakeBackend { ping: Some(Ok(true)), ..FakeBackend::default() });
    assert!(block_on(ops.reset_password_ping(&link())));
    assert_eq!(ops.backend.calls.get(), 1);
}

#[test]
fn ping_failure_counts_as_rejection() {
    let ops = ops(FakeBackend { ping: Some(Err(AuthError::Auth("expired".to_owned()))), ..FakeBackend::default() });
    assert!(!block_on(ops.reset_password_ping(&link())));
}

#[test]
fn reset_success_sets_default_message() {
    let ops = ops(FakeBackend::default());
    let session = RefCell::new(SessionState::default());
    let req = validate_reset("secret1", "secret1", &link()).unwrap();
    let message = block_on(ops.reset_password(&session, &PageScope::new(), &req)).unwrap();
    assert_eq!(message, RESET_DEFAULT_MESSAGE);
    assert_eq!(session.borrow().message.as_deref(), Some(RESET_DEFAULT_MESSAGE));
}

#[test]
fn reset_rejected_token_records_auth_error() {
    let ops = ops(FakeBackend {
        message: Some(Err(AuthError::Auth("Reset link expired".to_owned()))),
        ..FakeBackend::default()
    });
    let session = RefCell::new(SessionState::default());
    let req = validate_reset("secret1", "secret1", &link()).unwrap();
    assert!(block_on(ops.reset_password(&session, &PageScope::new(), &req)).is_err());
    assert_eq!(session.borrow().error.as_deref(), Some("Reset link expired"));
}

// =============================================================
// logout / restore
// =============================================================

#[test]
fn logout_clears_session_even_when_backend_fails() {
    let ops = ops(FakeBackend { logout_fails: true, ..FakeBackend::default() });
    ops.persistence.save_user(&user());
    let session = RefCell::new(SessionState::default());
    session.borrow_mut().restore(user());

    block_on(ops.logout(&session));
    assert_eq!(*session.borrow(), SessionState::default());
    assert!(ops.persistence.load_user().is_none());
    assert_eq!(ops.backend.calls.get(), 1);
}

#[test]
fn restore_adopts_persisted_user() {
    let ops = ops(FakeBackend::default());
    let session = RefCell::new(SessionState::default());
    assert!(!ops.restore(&session));
    ops.persistence.save_user(&user());
    assert!(ops.restore(&session));
    assert!(session.borrow().is_authenticated);
}

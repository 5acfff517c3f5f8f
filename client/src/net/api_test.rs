use super::*;

#[test]
fn endpoints_resolve_against_api_base() {
    let backend = HttpBackend::new(ApiConfig::new("https://api.homedeck.io"));
    assert_eq!(backend.config.endpoint(LOGIN_PATH), "https://api.homedeck.io/auth/login");
    assert_eq!(
        backend.config.endpoint(RESET_PASSWORD_PING_PATH),
        "https://api.homedeck.io/auth/reset-password/ping"
    );
}

#[test]
fn ping_query_carries_all_link_parameters() {
    let link = ResetToken { token: "abc".to_owned(), email: "a@b.com".to_owned(), time: "42".to_owned() };
    assert_eq!(ping_query(&link), [("token", "abc"), ("email", "a@b.com"), ("time", "42")]);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn http_backend_is_unavailable_outside_browser() {
    let backend = HttpBackend::default();
    let req = LoginRequest { email: "a@b.com".to_owned(), password: "secret1".to_owned() };
    let err = futures::executor::block_on(backend.login(&req)).unwrap_err();
    assert_eq!(err, AuthError::Network(NOT_AVAILABLE.to_owned()));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn http_backend_ping_is_unavailable_outside_browser() {
    let backend = HttpBackend::default();
    let result = futures::executor::block_on(backend.reset_password_ping(&ResetToken::default()));
    assert!(result.is_err());
}

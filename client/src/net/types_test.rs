use super::*;

// =============================================================
// UserInfo
// =============================================================

#[test]
fn user_info_reads_camel_case_profile_fields() {
    let raw = r#"{
        "id": "u1",
        "name": "Jo",
        "email": "jo@x.com",
        "role": "owner",
        "organization": "Acme Homes",
        "avatarUrl": "https://cdn.example.com/jo.png"
    }"#;
    let user: UserInfo = serde_json::from_str(raw).unwrap();
    assert_eq!(user.role, "owner");
    assert_eq!(user.organization.as_deref(), Some("Acme Homes"));
    assert_eq!(user.avatar_url.as_deref(), Some("https://cdn.example.com/jo.png"));
    assert!(user.phone.is_none());
}

#[test]
fn user_info_role_defaults_to_empty() {
    let user: UserInfo = serde_json::from_str(r#"{"id":"u1","name":"Jo","email":"jo@x.com"}"#).unwrap();
    assert!(user.role.is_empty());
}

// =============================================================
// Requests
// =============================================================

#[test]
fn reset_password_request_serializes_camel_case() {
    let req = ResetPasswordRequest {
        new_password: "secret1".to_owned(),
        re_password: "secret1".to_owned(),
        token: "abc".to_owned(),
        email: "a@b.com".to_owned(),
        time: "1700000000".to_owned(),
    };
    let value = serde_json::to_value(&req).unwrap();
    assert_eq!(value["newPassword"], "secret1");
    assert_eq!(value["rePassword"], "secret1");
    assert_eq!(value["token"], "abc");
}

// =============================================================
// Responses
// =============================================================

#[test]
fn login_response_message_is_optional() {
    let raw = r#"{"user":{"id":"u1","name":"Jo","email":"jo@x.com"}}"#;
    let resp: LoginResponse = serde_json::from_str(raw).unwrap();
    assert_eq!(resp.user.id, "u1");
    assert!(resp.message.is_none());
}

#[test]
fn ping_response_missing_ok_is_rejection() {
    let resp: PingResponse = serde_json::from_str("{}").unwrap();
    assert!(!resp.ok);
}

#[test]
fn error_body_prefers_error_over_message() {
    let body: ErrorBody = serde_json::from_str(r#"{"error":"Email already in use","message":"nope"}"#).unwrap();
    assert_eq!(body.text(), Some("Email already in use"));
}

#[test]
fn error_body_skips_blank_error() {
    let body: ErrorBody = serde_json::from_str(r#"{"error":"  ","message":"Token expired"}"#).unwrap();
    assert_eq!(body.text(), Some("Token expired"));
}

#[test]
fn error_body_without_text_is_none() {
    assert_eq!(ErrorBody::default().text(), None);
}

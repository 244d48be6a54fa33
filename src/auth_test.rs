use super::*;

// =============================================================================
// Request body shapes
// =============================================================================

#[test]
fn credentials_serialize_as_backend_expects() {
    let body = serde_json::to_value(Credentials {
        email: "a@b.com".into(),
        password: "secret1".into(),
    })
    .unwrap();
    assert_eq!(body, serde_json::json!({"email": "a@b.com", "password": "secret1"}));
}

#[test]
fn new_user_serializes_role_lowercase() {
    let body = serde_json::to_value(NewUser {
        email: "p@taskhub.dev".into(),
        password: "hunter22".into(),
        name: "Pat".into(),
        role: Role::Poster,
    })
    .unwrap();
    assert_eq!(body["role"], "poster");
}

// =============================================================================
// Response shapes
// =============================================================================

#[test]
fn auth_response_parses_user_and_token() {
    let response: AuthResponse = serde_json::from_str(
        r#"{"user":{"id":1,"email":"a@b.com","role":"tasker"},"csrfToken":"abc123"}"#,
    )
    .unwrap();
    assert_eq!(response.user.id, 1);
    assert_eq!(response.csrf_token.as_deref(), Some("abc123"));
}

#[test]
fn auth_response_token_is_optional() {
    let response: AuthResponse =
        serde_json::from_str(r#"{"user":{"id":2,"email":"b@c.com","role":"poster"}}"#).unwrap();
    assert!(response.csrf_token.is_none());
}

#[test]
fn csrf_token_response_parses() {
    let response: CsrfTokenResponse = serde_json::from_str(r#"{"csrfToken":"deadbeef"}"#).unwrap();
    assert_eq!(response.csrf_token, "deadbeef");
}

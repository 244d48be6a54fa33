use std::sync::Arc;

use super::*;
use crate::storage::MemoryStorage;

fn sample_user() -> SessionUser {
    SessionUser {
        id: 1,
        email: "a@b.com".into(),
        name: "Alice".into(),
        role: Role::Tasker,
        avatar: None,
        created_at: Some("2026-08-01T12:00:00Z".into()),
    }
}

// =============================================================================
// SessionUser serde
// =============================================================================

#[test]
fn user_deserializes_from_backend_json() {
    let user: SessionUser =
        serde_json::from_str(r#"{"id":1,"email":"a@b.com","role":"tasker"}"#).unwrap();
    assert_eq!(user.id, 1);
    assert_eq!(user.email, "a@b.com");
    assert_eq!(user.role, Role::Tasker);
    assert_eq!(user.name, "");
    assert!(user.avatar.is_none());
    assert!(user.created_at.is_none());
}

#[test]
fn user_serializes_camel_case() {
    let json = serde_json::to_value(sample_user()).unwrap();
    assert_eq!(json["role"], "tasker");
    assert_eq!(json["createdAt"], "2026-08-01T12:00:00Z");
}

#[test]
fn role_poster_round_trips() {
    let role: Role = serde_json::from_str(r#""poster""#).unwrap();
    assert_eq!(role, Role::Poster);
    assert_eq!(serde_json::to_string(&role).unwrap(), r#""poster""#);
}

// =============================================================================
// SessionStore
// =============================================================================

#[test]
fn load_with_empty_storage_returns_none() {
    let store = SessionStore::new(Arc::new(MemoryStorage::new()));
    assert!(store.load().is_none());
}

#[test]
fn mirror_then_load_round_trips() {
    let store = SessionStore::new(Arc::new(MemoryStorage::new()));
    let user = sample_user();
    store.mirror(&user);
    assert_eq!(store.load(), Some(user));
}

#[test]
fn load_discards_malformed_values_and_removes_key() {
    for malformed in [
        "not json",
        "42",
        r#""just a string""#,
        "[]",
        "{}",
        r#"{"id":"not-a-number","email":"a@b.com","role":"tasker"}"#,
        r#"{"id":1,"email":"a@b.com","role":"landlord"}"#,
        r#"{"id":1,"email":"a@b.com","role":"tasker""#,
    ] {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::new(storage.clone());
        storage.set(USER_KEY, malformed);
        assert!(store.load().is_none(), "value should be discarded: {malformed}");
        assert!(storage.get(USER_KEY).is_none(), "key should be removed: {malformed}");
    }
}

#[test]
fn clear_removes_mirror() {
    let store = SessionStore::new(Arc::new(MemoryStorage::new()));
    store.mirror(&sample_user());
    store.clear();
    assert!(store.load().is_none());
}

// =============================================================================
// Session phase machine
// =============================================================================

#[test]
fn session_starts_loading_with_no_user() {
    let session = Session::in_memory();
    assert_eq!(session.phase(), AuthPhase::Loading);
    assert!(session.user().is_none());
}

#[test]
fn bootstrap_with_empty_storage_ends_anonymous() {
    let session = Session::in_memory();
    assert!(session.bootstrap().is_none());
    assert_eq!(session.phase(), AuthPhase::Anonymous);
}

#[test]
fn bootstrap_with_mirror_ends_authenticated() {
    let persistent = Arc::new(MemoryStorage::new());
    SessionStore::new(persistent.clone()).mirror(&sample_user());

    let session = Session::new(persistent, Arc::new(MemoryStorage::new()));
    assert_eq!(session.bootstrap(), Some(sample_user()));
    assert_eq!(session.phase(), AuthPhase::Authenticated);
    assert_eq!(session.user(), Some(sample_user()));
}

#[test]
fn bootstrap_with_malformed_mirror_ends_anonymous() {
    let persistent = Arc::new(MemoryStorage::new());
    persistent.set(USER_KEY, "{{{");

    let session = Session::new(persistent.clone(), Arc::new(MemoryStorage::new()));
    assert!(session.bootstrap().is_none());
    assert_eq!(session.phase(), AuthPhase::Anonymous);
    assert!(persistent.get(USER_KEY).is_none());
}

#[test]
fn set_authenticated_mirrors_user() {
    let persistent = Arc::new(MemoryStorage::new());
    let session = Session::new(persistent.clone(), Arc::new(MemoryStorage::new()));

    session.set_authenticated(sample_user());
    assert_eq!(session.phase(), AuthPhase::Authenticated);
    assert_eq!(session.user(), Some(sample_user()));

    let mirrored: SessionUser = serde_json::from_str(&persistent.get(USER_KEY).unwrap()).unwrap();
    assert_eq!(mirrored, sample_user());
}

#[test]
fn invalidate_clears_user_mirror_and_token() {
    let persistent = Arc::new(MemoryStorage::new());
    let session = Session::new(persistent.clone(), Arc::new(MemoryStorage::new()));
    session.set_authenticated(sample_user());
    session.tokens().set(Some("abc123"));

    session.invalidate();
    assert!(session.user().is_none());
    assert_eq!(session.phase(), AuthPhase::Anonymous);
    assert!(persistent.get(USER_KEY).is_none());
    assert!(session.tokens().get().is_none());
}

#[test]
fn invalidate_is_idempotent() {
    let session = Session::in_memory();
    session.set_authenticated(sample_user());
    session.invalidate();
    session.invalidate();
    assert_eq!(session.phase(), AuthPhase::Anonymous);
}

// =============================================================================
// update_user
// =============================================================================

#[test]
fn update_user_merges_fields_and_remirrors() {
    let persistent = Arc::new(MemoryStorage::new());
    let session = Session::new(persistent.clone(), Arc::new(MemoryStorage::new()));
    session.set_authenticated(sample_user());

    let patch = UserPatch {
        name: Some("Alice B".into()),
        avatar: Some("https://cdn.taskhub.dev/a.png".into()),
        ..UserPatch::default()
    };
    let updated = session.update_user(&patch).unwrap();
    assert_eq!(updated.name, "Alice B");
    assert_eq!(updated.avatar.as_deref(), Some("https://cdn.taskhub.dev/a.png"));
    assert_eq!(updated.email, "a@b.com");
    assert_eq!(updated.role, Role::Tasker);

    let mirrored: SessionUser = serde_json::from_str(&persistent.get(USER_KEY).unwrap()).unwrap();
    assert_eq!(mirrored.name, "Alice B");
}

#[test]
fn update_user_without_session_returns_none() {
    let session = Session::in_memory();
    let patch = UserPatch { name: Some("nobody".into()), ..UserPatch::default() };
    assert!(session.update_user(&patch).is_none());
}

#[test]
fn empty_patch_leaves_user_unchanged() {
    let session = Session::in_memory();
    session.set_authenticated(sample_user());
    let updated = session.update_user(&UserPatch::default()).unwrap();
    assert_eq!(updated, sample_user());
}

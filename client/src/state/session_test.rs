use super::*;
use crate::util::storage::MemoryStorage;

fn store() -> SessionStore<MemoryStorage> {
    SessionStore::new(MemoryStorage::new())
}

// =============================================================
// Role
// =============================================================

#[test]
fn role_parses_wire_names() {
    assert_eq!("hospital".parse::<Role>(), Ok(Role::Hospital));
    assert_eq!("researcher".parse::<Role>(), Ok(Role::Researcher));
}

#[test]
fn role_rejects_unknown_names() {
    assert_eq!("admin".parse::<Role>(), Err(SessionError::UnknownRole("admin".to_owned())));
    assert!("Hospital".parse::<Role>().is_err());
}

#[test]
fn role_serde_uses_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Researcher).unwrap(), "\"researcher\"");
    let role: Role = serde_json::from_str("\"hospital\"").unwrap();
    assert_eq!(role, Role::Hospital);
}

#[test]
fn role_home_paths() {
    assert_eq!(Role::Hospital.home_path(), "/patients");
    assert_eq!(Role::Researcher.home_path(), "/research");
}

// =============================================================
// SessionStore
// =============================================================

#[test]
fn fresh_store_is_anonymous() {
    let store = store();
    assert_eq!(store.current(), Session::Anonymous);
    assert!(!store.current().is_authenticated());
    assert_eq!(store.current().role(), None);
}

#[test]
fn login_persists_flag_and_role() {
    let store = store();
    assert_eq!(store.login(Role::Hospital), Session::Authenticated(Role::Hospital));
    assert_eq!(store.storage().get(AUTHENTICATED_KEY).as_deref(), Some("true"));
    assert_eq!(store.storage().get(ROLE_KEY).as_deref(), Some("hospital"));
    assert_eq!(store.current(), Session::Authenticated(Role::Hospital));
}

#[test]
fn login_as_rejects_unknown_role_and_keeps_session() {
    let store = store();
    store.login(Role::Researcher);
    assert!(matches!(store.login_as("admin"), Err(SessionError::UnknownRole(_))));
    assert_eq!(store.current(), Session::Authenticated(Role::Researcher));
}

#[test]
fn login_as_accepts_known_role() {
    let store = store();
    assert_eq!(store.login_as("researcher"), Ok(Session::Authenticated(Role::Researcher)));
}

#[test]
fn logout_clears_every_key() {
    let store = store();
    store.login(Role::Hospital);
    store.attach_token("abc");
    assert_eq!(store.logout(), Session::Anonymous);
    assert!(store.storage().is_empty());
    assert_eq!(store.token(), None);
}

#[test]
fn logout_twice_matches_logout_once() {
    let once = store();
    once.login(Role::Hospital);
    once.logout();

    let twice = store();
    twice.login(Role::Hospital);
    twice.logout();
    twice.logout();

    assert_eq!(once.current(), twice.current());
    assert_eq!(once.storage().len(), twice.storage().len());
}

#[test]
fn missing_role_reads_anonymous() {
    let store = store();
    store.storage().set(AUTHENTICATED_KEY, "true");
    assert_eq!(store.current(), Session::Anonymous);
}

#[test]
fn missing_flag_reads_anonymous() {
    let store = store();
    store.storage().set(ROLE_KEY, "hospital");
    assert_eq!(store.current(), Session::Anonymous);
}

#[test]
fn non_true_flag_reads_anonymous() {
    let store = store();
    store.storage().set(AUTHENTICATED_KEY, "false");
    store.storage().set(ROLE_KEY, "hospital");
    assert_eq!(store.current(), Session::Anonymous);
}

#[test]
fn unknown_persisted_role_reads_anonymous() {
    let store = store();
    store.storage().set(AUTHENTICATED_KEY, "true");
    store.storage().set(ROLE_KEY, "admin");
    assert_eq!(store.current(), Session::Anonymous);
}

#[test]
fn empty_token_reads_as_missing() {
    let store = store();
    store.attach_token("");
    assert_eq!(store.token(), None);
    store.attach_token("t-1");
    assert_eq!(store.token().as_deref(), Some("t-1"));
}

#[test]
fn stores_with_separate_storage_do_not_interfere() {
    let hospital = store();
    let researcher = store();
    hospital.login(Role::Hospital);
    researcher.login(Role::Researcher);
    assert_eq!(hospital.current().role(), Some(Role::Hospital));
    assert_eq!(researcher.current().role(), Some(Role::Researcher));
}

use super::*;

#[test]
fn default_is_pending() {
    let status = AuthStatus::<String>::default();
    assert!(status.loading);
    assert!(status.user.is_none());
    assert!(status.is_pending());
}

#[test]
fn resolved_without_user_is_not_authenticated() {
    let status = AuthStatus::<String>::resolved(None);
    assert!(!status.is_pending());
    assert!(!status.is_authenticated());
}

#[test]
fn resolved_with_user_is_authenticated() {
    let status = AuthStatus::resolved(Some("u1".to_owned()));
    assert!(status.is_authenticated());
}

#[test]
fn loading_with_stale_user_is_not_authenticated() {
    let status = AuthStatus { user: Some("u1"), loading: true };
    assert!(!status.is_authenticated());
}

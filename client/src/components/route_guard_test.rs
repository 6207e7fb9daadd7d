use access::{AuthStatus, NavigationMode, evaluate_route_guard};

use super::*;
use crate::util::test_helpers::{RecordingNavigator, pending_auth, reactive, settle, user};

#[test]
fn loading_shows_spinner_only() {
    let decision = evaluate_route_guard(&AuthStatus::<String>::pending(), "/dashboard");
    assert_eq!(GuardView::from(&decision), GuardView::Loading);
}

#[test]
fn anonymous_visitor_sees_nothing_while_redirecting() {
    let decision = evaluate_route_guard(&AuthStatus::<String>::resolved(None), "/dashboard");
    assert_eq!(GuardView::from(&decision), GuardView::Nothing);
    assert_eq!(decision.redirect().unwrap().href(), "/login?from=%2Fdashboard");
}

#[test]
fn signed_in_user_sees_children() {
    let decision = evaluate_route_guard(&AuthStatus::resolved(Some("u1".to_owned())), "/dashboard");
    assert_eq!(GuardView::from(&decision), GuardView::Content);
}

#[tokio::test]
async fn guard_replaces_once_per_denial() {
    reactive(|| async {
        let auth = pending_auth();
        let navigator = RecordingNavigator::at("/dashboard");
        let decision = guard_decision(auth, Signal::stored("/dashboard".to_owned()), navigator.clone());
        settle().await;
        assert_eq!(decision.with_untracked(|d| GuardView::from(d)), GuardView::Loading);
        assert!(navigator.calls().is_empty());

        auth.set_user(None);
        settle().await;
        assert_eq!(decision.with_untracked(|d| GuardView::from(d)), GuardView::Nothing);
        let calls = navigator.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].href(), "/login?from=%2Fdashboard");
        assert_eq!(calls[0].mode, NavigationMode::Replace);

        auth.set_user(None);
        settle().await;
        assert_eq!(navigator.calls().len(), 1);
    })
    .await;
}

#[tokio::test]
async fn guard_renders_for_user_and_redirects_after_logout() {
    reactive(|| async {
        let auth = pending_auth();
        let navigator = RecordingNavigator::at("/dashboard");
        let decision = guard_decision(auth, Signal::stored("/dashboard".to_owned()), navigator.clone());
        auth.set_user(Some(user()));
        settle().await;
        assert_eq!(decision.with_untracked(|d| GuardView::from(d)), GuardView::Content);
        assert!(navigator.calls().is_empty());

        auth.clear();
        settle().await;
        assert_eq!(navigator.calls().len(), 1);
        assert_eq!(navigator.calls()[0].mode, NavigationMode::Replace);
    })
    .await;
}

use super::*;
use crate::policy::NavigationMode;

fn denied(target: &str) -> Decision {
    Decision::Redirect(RedirectIntent {
        target_path: target.to_owned(),
        origin_path: Some("/dashboard".to_owned()),
        mode: NavigationMode::Replace,
    })
}

#[test]
fn tracker_starts_pending() {
    assert_eq!(AccessTracker::new().state(), AccessState::Pending);
}

#[test]
fn wait_keeps_pending_without_redirect() {
    let mut tracker = AccessTracker::new();
    assert_eq!(tracker.observe(&Decision::Wait), None);
    assert_eq!(tracker.state(), AccessState::Pending);
}

#[test]
fn pending_to_granted() {
    let mut tracker = AccessTracker::new();
    assert_eq!(tracker.observe(&Decision::Render), None);
    assert_eq!(tracker.state(), AccessState::Granted);
}

#[test]
fn pending_to_denied_emits_redirect_once() {
    let mut tracker = AccessTracker::new();
    let first = tracker.observe(&denied("/login"));
    assert_eq!(first.map(|i| i.target_path), Some("/login".to_owned()));
    assert_eq!(tracker.state(), AccessState::Denied);

    assert_eq!(tracker.observe(&denied("/login")), None);
    assert_eq!(tracker.observe(&denied("/login")), None);
    assert_eq!(tracker.state(), AccessState::Denied);
}

#[test]
fn reentering_pending_resets_eligibility() {
    let mut tracker = AccessTracker::new();
    assert!(tracker.observe(&denied("/login")).is_some());
    assert_eq!(tracker.observe(&Decision::Wait), None);
    assert_eq!(tracker.state(), AccessState::Pending);
    assert!(tracker.observe(&denied("/login")).is_some());
}

#[test]
fn granted_then_denied_fires_again() {
    let mut tracker = AccessTracker::new();
    assert!(tracker.observe(&denied("/login")).is_some());
    assert_eq!(tracker.observe(&Decision::Render), None);
    assert!(tracker.observe(&denied("/login")).is_some());
}

#[test]
fn state_from_decision() {
    assert_eq!(AccessState::from(&Decision::Wait), AccessState::Pending);
    assert_eq!(AccessState::from(&Decision::Render), AccessState::Granted);
    assert_eq!(AccessState::from(&denied("/")), AccessState::Denied);
}

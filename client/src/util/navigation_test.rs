use access::NavigationMode;

use super::*;

fn intent(mode: NavigationMode) -> RedirectIntent {
    RedirectIntent { target_path: "/login".to_owned(), origin_path: Some("/dashboard".to_owned()), mode }
}

#[test]
fn location_path_without_query() {
    assert_eq!(location_path("/dashboard", ""), "/dashboard");
}

#[test]
fn location_path_with_query_with_or_without_marker() {
    assert_eq!(location_path("/orders", "page=2"), "/orders?page=2");
    assert_eq!(location_path("/orders", "?page=2"), "/orders?page=2");
}

#[test]
fn guard_redirect_replaces_history() {
    assert!(navigate_options(&intent(NavigationMode::Replace)).replace);
}

#[test]
fn requirement_redirect_pushes_history() {
    assert!(!navigate_options(&intent(NavigationMode::Push)).replace);
}

#[test]
fn redirect_carries_origin_in_query_and_history_state() {
    let intent = intent(NavigationMode::Replace);
    assert_eq!(intent.href(), "/login?from=%2Fdashboard");
    assert_eq!(history_state(&intent).as_deref(), Some(r#"{"from":"/dashboard"}"#));
}

#[test]
fn redirect_without_origin_has_no_history_state() {
    let intent = RedirectIntent { target_path: "/".to_owned(), origin_path: None, mode: NavigationMode::Push };
    assert_eq!(history_state(&intent), None);
    assert!(!navigate_options(&intent).replace);
}

use super::*;

#[test]
fn unconfigured_email_sign_in_is_reported_as_unavailable() {
    assert_eq!(sign_in_failure(SignInStep::RequestCode, 503), "Email sign-in is unavailable right now.");
}

#[test]
fn resend_cooldown_asks_visitor_to_wait() {
    assert!(sign_in_failure(SignInStep::RequestCode, 429).starts_with("A code was just sent"));
}

#[test]
fn rejected_code_suggests_a_new_one() {
    assert_eq!(
        sign_in_failure(SignInStep::VerifyCode, 401),
        "That code is incorrect or has expired. Request a new one."
    );
}

#[test]
fn malformed_input_is_the_same_message_for_both_steps() {
    assert_eq!(
        sign_in_failure(SignInStep::RequestCode, 400),
        sign_in_failure(SignInStep::VerifyCode, 400)
    );
}

#[test]
fn unexpected_status_is_shown_with_its_code() {
    assert_eq!(sign_in_failure(SignInStep::RequestCode, 500), "Code request failed (500).");
    assert_eq!(sign_in_failure(SignInStep::VerifyCode, 503), "Verification failed (503).");
}

#[test]
fn request_code_payload_shape() {
    assert_eq!(request_code_payload("a@b.com"), serde_json::json!({ "email": "a@b.com" }));
}

#[test]
fn verify_code_payload_shape() {
    assert_eq!(
        verify_code_payload("a@b.com", "ABC234"),
        serde_json::json!({ "email": "a@b.com", "code": "ABC234" })
    );
}


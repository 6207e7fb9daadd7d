use super::*;

#[test]
fn normalize_email_accepts_basic_address() {
    assert_eq!(normalize_email("  USER@Example.com "), Some("user@example.com".to_owned()));
}

#[test]
fn normalize_email_rejects_invalid_values() {
    assert_eq!(normalize_email(""), None);
    assert_eq!(normalize_email("user"), None);
    assert_eq!(normalize_email("@example.com"), None);
    assert_eq!(normalize_email("user@"), None);
    assert_eq!(normalize_email("a@b@c"), None);
}

#[test]
fn normalize_code_accepts_upper_and_normalizes() {
    let code = generate_access_code();
    assert_eq!(normalize_code(&code), Some(code.clone()));
    assert_eq!(normalize_code(" abc234 "), Some("ABC234".to_owned()));
}

#[test]
fn normalize_code_rejects_bad_shapes() {
    assert_eq!(normalize_code("abc23"), None);
    assert_eq!(normalize_code("abc2345"), None);
    assert_eq!(normalize_code("ABC1I0"), None);
    assert_eq!(normalize_code("ABC23!"), None);
}

#[test]
fn generate_access_code_shape() {
    let code = generate_access_code();
    assert_eq!(code.len(), 6);
    assert!(code.bytes().all(|c| CODE_ALPHABET.contains(&c)));
}

#[test]
fn hash_access_code_is_stable_hex() {
    let a = hash_access_code("user@example.com", "ABC234");
    assert_eq!(a, hash_access_code("user@example.com", "ABC234"));
    assert_ne!(a, hash_access_code("user@example.com", "ABC235"));
    assert_eq!(a.len(), 64);
}

#[test]
fn hash_access_code_is_bound_to_address() {
    assert_ne!(
        hash_access_code("user@example.com", "ABC234"),
        hash_access_code("other@example.com", "ABC234")
    );
}

#[test]
fn name_from_email_uses_local_part() {
    assert_eq!(name_from_email("ada@example.com"), "ada");
}

// =============================================================================
// resend + attempt policy
// =============================================================================

#[test]
fn resend_allowed_without_live_code() {
    assert_eq!(resend_wait(None), None);
}

#[test]
fn resend_blocked_inside_cooldown() {
    assert_eq!(resend_wait(Some(0)), Some(RESEND_COOLDOWN_SECS));
    assert_eq!(resend_wait(Some(45)), Some(RESEND_COOLDOWN_SECS - 45));
}

#[test]
fn resend_allowed_once_cooldown_elapses() {
    assert_eq!(resend_wait(Some(RESEND_COOLDOWN_SECS)), None);
    assert_eq!(resend_wait(Some(600)), None);
}

#[test]
fn resend_treats_clock_skew_as_fresh() {
    assert_eq!(resend_wait(Some(-5)), Some(RESEND_COOLDOWN_SECS));
}

#[test]
fn code_burns_on_fifth_failure() {
    assert!(!burns_code(1));
    assert!(!burns_code(MAX_FAILED_ATTEMPTS - 1));
    assert!(burns_code(MAX_FAILED_ATTEMPTS));
}

// =============================================================================
// email body + errors
// =============================================================================

fn issued(unverified: bool) -> IssuedCode {
    IssuedCode { email: "user@example.com".to_owned(), code: "ABC234".to_owned(), unverified }
}

#[test]
fn unverified_address_is_asked_to_verify() {
    let body = verification_email_body(&issued(true));
    assert!(body.contains("verify user@example.com"));
    assert!(body.contains("ABC234"));
    assert!(body.contains("10 minutes"));
}

#[test]
fn verified_address_is_asked_to_sign_in() {
    let body = verification_email_body(&issued(false));
    assert!(body.contains("sign in to Storefront as user@example.com"));
    assert!(!body.contains("verify"));
}

#[test]
fn error_messages_are_stable() {
    assert_eq!(EmailAuthError::InvalidEmail.to_string(), "invalid email");
    assert_eq!(EmailAuthError::VerificationFailed.to_string(), "expired or incorrect code");
    assert_eq!(EmailAuthError::DeliveryUnavailable.to_string(), "email sign-in is not configured");
    assert_eq!(
        EmailAuthError::TooSoon { retry_after_secs: 12 }.to_string(),
        "a code was sent recently; retry in 12s"
    );
}

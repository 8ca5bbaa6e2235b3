use super::*;
use crate::error::ApiError;

fn message(result: Result<(), ApiError>) -> String {
    match result {
        Err(ApiError::Validation(message)) => message,
        other => panic!("expected validation error, got {other:?}"),
    }
}

// =============================================================================
// registration rules
// =============================================================================

#[test]
fn valid_registration_passes() {
    let values = [
        ("name", Some("Alice")),
        ("email", Some("alice@example.com")),
        ("password", Some("hunter22")),
        ("confirmPassword", Some("hunter22")),
    ];
    assert!(check(&REGISTRATION_RULES, &values).is_ok());
}

#[test]
fn blank_name_is_required() {
    let values = [("name", Some("  ")), ("email", Some("a@b.co")), ("password", Some("hunter22"))];
    assert_eq!(message(check(&REGISTRATION_RULES, &values)), "Name is required");
}

#[test]
fn short_name_fails_min_length() {
    let values = [("name", Some("Al")), ("email", Some("a@b.co")), ("password", Some("hunter22"))];
    assert_eq!(
        message(check(&REGISTRATION_RULES, &values)),
        "Name must be at least 3 characters long"
    );
}

#[test]
fn bad_email_fails_pattern() {
    let values =
        [("name", Some("Alice")), ("email", Some("not-an-email")), ("password", Some("hunter22"))];
    assert_eq!(
        message(check(&REGISTRATION_RULES, &values)),
        "Please enter a valid email address"
    );
}

#[test]
fn email_with_spaces_fails_pattern() {
    let values =
        [("name", Some("Alice")), ("email", Some("a b@c.com")), ("password", Some("hunter22"))];
    assert_eq!(
        message(check(&REGISTRATION_RULES, &values)),
        "Please enter a valid email address"
    );
}

#[test]
fn short_password_fails_min_length() {
    let values = [("name", Some("Alice")), ("email", Some("a@b.co")), ("password", Some("12345"))];
    assert_eq!(
        message(check(&REGISTRATION_RULES, &values)),
        "Password must be at least 6 characters long"
    );
}

#[test]
fn mismatched_confirmation_fails_cross_field_check() {
    let values = [
        ("name", Some("Alice")),
        ("email", Some("a@b.co")),
        ("password", Some("hunter22")),
        ("confirmPassword", Some("hunter23")),
    ];
    assert_eq!(message(check(&REGISTRATION_RULES, &values)), "Passwords do not match");
}

#[test]
fn blank_confirmation_asks_for_it() {
    let values = [
        ("name", Some("Alice")),
        ("email", Some("a@b.co")),
        ("password", Some("hunter22")),
        ("confirmPassword", Some("")),
    ];
    assert_eq!(message(check(&REGISTRATION_RULES, &values)), "Please confirm your password");
}

#[test]
fn absent_field_is_skipped() {
    // No confirmPassword in the submission at all: its rule does not run.
    let values =
        [("name", Some("Alice")), ("email", Some("a@b.co")), ("password", Some("hunter22"))];
    assert!(check(&REGISTRATION_RULES, &values).is_ok());
}

// =============================================================================
// login rules
// =============================================================================

#[test]
fn valid_login_passes() {
    let values = [("email", Some("alice@example.com")), ("password", Some("hunter22"))];
    assert!(check(&LOGIN_RULES, &values).is_ok());
}

#[test]
fn blank_login_email_is_required() {
    let values = [("email", Some("")), ("password", Some("hunter22"))];
    assert_eq!(message(check(&LOGIN_RULES, &values)), "Email is required");
}

// =============================================================================
// post rules
// =============================================================================

#[test]
fn valid_post_passes() {
    let values = [("title", Some("Hello")), ("content", Some("World"))];
    assert!(check(&POST_RULES, &values).is_ok());
}

#[test]
fn blank_title_is_required() {
    let values = [("title", Some("")), ("content", Some("World"))];
    assert_eq!(message(check(&POST_RULES, &values)), "Title is required");
}

#[test]
fn blank_content_is_required() {
    let values = [("title", Some("Hello")), ("content", Some(" "))];
    assert_eq!(message(check(&POST_RULES, &values)), "Content is required");
}

use super::*;

#[test]
fn hash_then_verify_accepts_the_password() {
    let digest = hash_password("correct horse").unwrap();
    assert!(verify_password("correct horse", &digest).unwrap());
}

#[test]
fn wrong_password_is_false_not_error() {
    let digest = hash_password("correct horse").unwrap();
    assert!(!verify_password("battery staple", &digest).unwrap());
}

#[test]
fn same_password_hashes_differently_per_salt() {
    let a = hash_password("secret").unwrap();
    let b = hash_password("secret").unwrap();
    assert_ne!(a, b);
}

#[test]
fn digest_is_phc_format() {
    let digest = hash_password("secret").unwrap();
    assert!(digest.starts_with("$argon2"));
}

#[test]
fn corrupt_digest_is_a_distinct_error() {
    let result = verify_password("secret", "not-a-digest");
    assert!(matches!(result, Err(CredentialError::CorruptDigest)));
}

#[test]
fn empty_digest_is_corrupt() {
    assert!(matches!(verify_password("secret", ""), Err(CredentialError::CorruptDigest)));
}

#[test]
fn empty_password_still_round_trips() {
    let digest = hash_password("").unwrap();
    assert!(verify_password("", &digest).unwrap());
    assert!(!verify_password("x", &digest).unwrap());
}

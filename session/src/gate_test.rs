use super::*;
use crate::UserRef;

fn user(id: i64) -> UserRef {
    UserRef { id, name: format!("user-{id}"), email: format!("user{id}@example.com") }
}

#[test]
fn author_can_mutate_own_post() {
    let session = Session::authenticated(user(1));
    assert!(can_mutate(&session, 1));
}

#[test]
fn author_cannot_mutate_someone_elses_post() {
    let session = Session::authenticated(user(1));
    assert!(!can_mutate(&session, 2));
}

#[test]
fn anonymous_cannot_mutate_anything() {
    assert!(!can_mutate(&Session::anonymous(), 1));
}

#[test]
fn flag_without_user_cannot_mutate() {
    let session = Session { user: None, is_authenticated: true };
    assert!(!can_mutate(&session, 1));
}

#[test]
fn stale_user_without_flag_cannot_mutate() {
    let session = Session { user: Some(user(1)), is_authenticated: false };
    assert!(!can_mutate(&session, 1));
}

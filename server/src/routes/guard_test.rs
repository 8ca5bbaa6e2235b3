use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header::COOKIE};
use axum::middleware;
use axum::routing::get;
use session::{Session, UserRef};
use tower::ServiceExt;

use super::*;
use crate::state::test_helpers::session_cookie;

fn alice() -> UserRef {
    UserRef { id: 1, name: "Alice".to_owned(), email: "alice@example.com".to_owned() }
}

fn parts_with_cookie(value: Option<&str>) -> Parts {
    let mut builder = Request::builder().uri("/posts");
    if let Some(value) = value {
        builder = builder.header(COOKIE, format!("{COOKIE_NAME}={value}"));
    }
    let (parts, ()) = builder.body(()).expect("request builds").into_parts();
    parts
}

/// Router exercising the middleware the way the real app mounts it.
fn guarded_router() -> Router {
    async fn ok() -> &'static str {
        "ok"
    }
    Router::new()
        .route("/posts", get(ok))
        .route("/posts/create", get(ok))
        .route("/login", get(ok))
        .layer(middleware::from_fn(access_guard))
}

fn request(path: &str, cookie: Option<&(axum::http::HeaderName, axum::http::HeaderValue)>) -> Request<Body> {
    let mut builder = Request::builder().uri(path);
    if let Some((name, value)) = cookie {
        builder = builder.header(name, value);
    }
    builder.body(Body::empty()).expect("request builds")
}

// =============================================================================
// extractors
// =============================================================================

#[tokio::test]
async fn missing_cookie_extracts_anonymous_session() {
    let mut parts = parts_with_cookie(None);
    let CurrentSession(session) = CurrentSession::from_request_parts(&mut parts, &())
        .await
        .expect("infallible");
    assert_eq!(session, Session::anonymous());
}

#[tokio::test]
async fn valid_cookie_extracts_signed_in_session() {
    let encoded = codec::encode(&Session::authenticated(alice()));
    let mut parts = parts_with_cookie(Some(&encoded));
    let CurrentSession(session) = CurrentSession::from_request_parts(&mut parts, &())
        .await
        .expect("infallible");
    assert!(session.is_signed_in());
    assert_eq!(session.user_id(), Some(1));
}

#[tokio::test]
async fn tampered_cookie_extracts_anonymous_session() {
    let mut parts = parts_with_cookie(Some("{not json"));
    let CurrentSession(session) = CurrentSession::from_request_parts(&mut parts, &())
        .await
        .expect("infallible");
    assert_eq!(session, Session::anonymous());
}

#[tokio::test]
async fn authenticated_user_extractor_rejects_anonymous() {
    let mut parts = parts_with_cookie(None);
    let err = AuthenticatedUser::from_request_parts(&mut parts, &())
        .await
        .expect_err("anonymous must be rejected");
    assert!(matches!(err, ApiError::Authentication));
}

#[tokio::test]
async fn authenticated_user_extractor_yields_the_user() {
    let encoded = codec::encode(&Session::authenticated(alice()));
    let mut parts = parts_with_cookie(Some(&encoded));
    let AuthenticatedUser(user) = AuthenticatedUser::from_request_parts(&mut parts, &())
        .await
        .expect("signed in");
    assert_eq!(user.id, 1);
}

// =============================================================================
// middleware
// =============================================================================

#[tokio::test]
async fn anonymous_protected_route_redirects_to_login() {
    let response = guarded_router()
        .oneshot(request("/posts/create", None))
        .await
        .expect("infallible");
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()["location"], "/login");
}

#[tokio::test]
async fn signed_in_protected_route_is_allowed() {
    let cookie = session_cookie(&alice());
    let response = guarded_router()
        .oneshot(request("/posts/create", Some(&cookie)))
        .await
        .expect("infallible");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn signed_in_login_page_redirects_home() {
    let cookie = session_cookie(&alice());
    let response = guarded_router()
        .oneshot(request("/login", Some(&cookie)))
        .await
        .expect("infallible");
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()["location"], "/");
}

#[tokio::test]
async fn public_route_passes_for_everyone() {
    let response = guarded_router()
        .oneshot(request("/posts", None))
        .await
        .expect("infallible");
    assert_eq!(response.status(), StatusCode::OK);
}

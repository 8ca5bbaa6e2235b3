//! Route-level access guard middleware and session extractors.
//!
//! ARCHITECTURE
//! ============
//! The guard layer wraps the whole router: every request has its
//! cookie decoded and `session::guard::decide` applied before any
//! handler logic runs. Handlers never re-implement route-level access;
//! they only apply the finer-grained ownership gate. Mutating handlers
//! additionally re-decode the cookie through these extractors — the
//! server's own trusted source — rather than trusting anything the
//! client rendered.

use axum::extract::{FromRequestParts, Request};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use session::codec::{self, COOKIE_NAME};
use session::guard::AccessDecision;
use session::{Session, UserRef, guard};

use crate::error::ApiError;

/// Decode the session carried by a set of request headers.
fn session_from_parts(parts: &Parts) -> Session {
    let jar = CookieJar::from_headers(&parts.headers);
    codec::decode(jar.get(COOKIE_NAME).map(Cookie::value))
}

/// Apply the access guard to a request before routing logic runs.
///
/// Allowed requests proceed with the decoded session stored in request
/// extensions; everything else is redirected before any handler sees
/// the request.
pub async fn access_guard(jar: CookieJar, mut request: Request, next: Next) -> Response {
    let session = codec::decode(jar.get(COOKIE_NAME).map(Cookie::value));

    match guard::decide(request.uri().path(), &session) {
        AccessDecision::Allow => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        AccessDecision::RedirectTo(target) => {
            tracing::debug!(path = %request.uri().path(), target, "access guard redirect");
            Redirect::temporary(target).into_response()
        }
    }
}

/// The request's decoded session. Always succeeds; anonymous when the
/// cookie is absent or invalid.
#[derive(Debug)]
pub struct CurrentSession(pub Session);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(session_from_parts(parts)))
    }
}

/// The signed-in user, required. Use as a handler parameter on
/// mutating routes; anonymous requests are rejected with 401.
#[derive(Debug)]
pub struct AuthenticatedUser(pub UserRef);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = session_from_parts(parts);
        match session.user {
            Some(user) if session.is_authenticated => Ok(Self(user)),
            _ => Err(ApiError::Authentication),
        }
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;

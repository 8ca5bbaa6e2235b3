//! Route-level access guard.
//!
//! DESIGN
//! ======
//! `decide` is the single authoritative gate for route-level access.
//! It runs on every request before any handler logic; handlers only
//! apply the finer-grained ownership gate on top. The decision is a
//! pure function of the request path and the decoded session, so it is
//! recomputed per request and never stored.
//!
//! The auth-entry patterns are exact matches on `/login` and
//! `/register`; the protected patterns live under `/posts/...`. The
//! two families cannot overlap, which keeps the guard's tie-break case
//! unreachable by construction (pinned by a test rather than handled
//! at runtime).

use crate::Session;

/// Routes users enter authentication through.
const AUTH_ENTRY_PATHS: [&str; 2] = ["/login", "/register"];

/// Prefix of the post-creation route.
const CREATE_POST_PREFIX: &str = "/posts/create";

/// Segment marking a per-user listing route.
const USER_POSTS_SEGMENT: &str = "/posts/user/";

/// What the guard knows about a path before seeing the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteClass {
    /// Login/register: only sensible for anonymous visitors.
    AuthEntry,
    /// Requires an authenticated session.
    Protected,
    /// No route-level restriction.
    Public,
}

/// Outcome of a guard decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessDecision {
    /// Let the request through to its handler.
    Allow,
    /// Redirect before any handler logic runs.
    RedirectTo(&'static str),
}

/// Classify a request path against the guard's route patterns.
#[must_use]
pub fn classify(path: &str) -> RouteClass {
    if AUTH_ENTRY_PATHS.contains(&path) {
        return RouteClass::AuthEntry;
    }
    if path.starts_with(CREATE_POST_PREFIX) || path.contains(USER_POSTS_SEGMENT) {
        return RouteClass::Protected;
    }
    RouteClass::Public
}

/// Decide route-level access for a request.
///
/// Authenticated users are bounced home from the auth-entry routes;
/// anonymous users are bounced to `/login` from protected routes;
/// everything else is allowed.
#[must_use]
pub fn decide(path: &str, session: &Session) -> AccessDecision {
    match classify(path) {
        RouteClass::AuthEntry if session.is_signed_in() => AccessDecision::RedirectTo("/"),
        RouteClass::Protected if !session.is_signed_in() => AccessDecision::RedirectTo("/login"),
        _ => AccessDecision::Allow,
    }
}

/// Scope check for `/posts/user/{id}` listings: a signed-in user may
/// only view their own listing. A mismatched id redirects to the
/// general listing rather than 404ing or leaking another user's posts.
///
/// Callers run this after [`decide`], so the anonymous case has
/// already been redirected to `/login`; it is still handled here
/// (fail closed) rather than assumed away.
#[must_use]
pub fn decide_user_scope(session: &Session, requested_user_id: i64) -> AccessDecision {
    match session.user_id() {
        Some(id) if id == requested_user_id => AccessDecision::Allow,
        Some(_) => AccessDecision::RedirectTo("/posts"),
        None => AccessDecision::RedirectTo("/login"),
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;

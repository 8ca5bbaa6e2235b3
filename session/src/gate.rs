//! Per-resource ownership gate.

use crate::Session;

/// Whether this session may mutate a resource owned by
/// `resource_owner_id`.
///
/// Drives three call sites: whether edit/delete controls render,
/// whether a single-post page lets the viewer enter edit mode, and the
/// server-side re-check on every mutating request. The first two are
/// hints; only the server-side check, computed from the server's own
/// decoding of the cookie, is trusted.
#[must_use]
pub fn can_mutate(session: &Session, resource_owner_id: i64) -> bool {
    session.user_id() == Some(resource_owner_id)
}

#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;

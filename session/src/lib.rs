//! Shared session model, cookie codec, and access decisions.
//!
//! This crate owns everything both sides of the app must agree on: the
//! shape of the client's "who is logged in" belief, the cookie encoding
//! it travels in, and the pure route/ownership decisions derived from
//! it. It performs no I/O; the `server` crate applies these decisions
//! to HTTP requests and the `client` crate persists the state.

pub mod codec;
pub mod gate;
pub mod guard;

use serde::{Deserialize, Serialize};

/// Client-visible identity of a logged-in user. Never carries the
/// password hash; the server strips it before anything crosses the
/// boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// The client's belief about who is logged in.
///
/// Invariant: any session handed out by [`codec::decode`] satisfies
/// `is_authenticated -> user.is_some()`. The converse does not hold: a
/// stale `user` with `is_authenticated == false` is tolerated and
/// grants nothing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: Option<UserRef>,
    pub is_authenticated: bool,
}

impl Session {
    /// The signed-out session. Also the fail-closed fallback for every
    /// ambiguous or invalid persisted value.
    #[must_use]
    pub fn anonymous() -> Self {
        Self { user: None, is_authenticated: false }
    }

    /// Session for a freshly logged-in user.
    #[must_use]
    pub fn authenticated(user: UserRef) -> Self {
        Self { user: Some(user), is_authenticated: true }
    }

    /// Whether this session actually grants access: the flag alone is
    /// not enough, the user must be present too.
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.is_authenticated && self.user.is_some()
    }

    /// Id of the signed-in user, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<i64> {
        if self.is_authenticated {
            self.user.as_ref().map(|u| u.id)
        } else {
            None
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::anonymous()
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;

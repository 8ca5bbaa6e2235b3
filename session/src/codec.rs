//! Session cookie codec.
//!
//! DESIGN
//! ======
//! The session persists as JSON inside the `user-storage` cookie,
//! wrapped in a `{"state": ...}` envelope (the persistence layer's
//! on-disk format, which the server reads as-is). Encoding is
//! deterministic; decoding is total and fails closed: absent,
//! malformed, or semantically invalid values all come back as the
//! anonymous session, never as an error to the caller.
//!
//! Cookie attributes applied by writers: `Path=/`, `Max-Age=2592000`
//! (30 days), `SameSite=Strict`. `HttpOnly` and `Secure` are left
//! unset — the client store reads this cookie from script, a known
//! gap inherited from the original deployment.
//!
//! This codec deals in the logical value only. HTTP transports
//! additionally percent-encode it on `Set-Cookie` and decode it on
//! read; callers must hand [`try_decode`] the transport-decoded
//! string, never the raw header bytes.

use serde::{Deserialize, Serialize};

use crate::Session;

/// Cookie the session travels in.
pub const COOKIE_NAME: &str = "user-storage";

/// Cookie lifetime: 30 days.
pub const COOKIE_MAX_AGE_SECONDS: i64 = 2_592_000;

/// Persistence envelope around the session state.
#[derive(Serialize, Deserialize)]
struct Persisted {
    state: Session,
}

/// Why a persisted value was rejected. Useful for server-side logging;
/// callers on the request path use [`decode`] and never see this.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The value is not valid JSON in the expected envelope.
    #[error("malformed session value: {0}")]
    Malformed(#[from] serde_json::Error),
    /// Well-formed JSON claiming authentication without a user.
    #[error("inconsistent session: authenticated with no user")]
    Inconsistent,
}

/// Encode a session into its cookie value.
///
/// Deterministic: the same session always yields the same string.
#[must_use]
pub fn encode(session: &Session) -> String {
    serde_json::json!({ "state": session }).to_string()
}

/// Decode a raw cookie value, reporting why it was rejected.
///
/// # Errors
///
/// Returns [`DecodeError::Malformed`] for anything that is not the
/// JSON envelope, and [`DecodeError::Inconsistent`] for an
/// authenticated session with no user.
pub fn try_decode(raw: &str) -> Result<Session, DecodeError> {
    let persisted: Persisted = serde_json::from_str(raw)?;
    let session = persisted.state;
    if session.is_authenticated && session.user.is_none() {
        return Err(DecodeError::Inconsistent);
    }
    Ok(session)
}

/// Decode the cookie value carried by a request, if any.
///
/// Total: every input maps to a session. Anything that is not a
/// well-formed, consistent value yields [`Session::anonymous`].
#[must_use]
pub fn decode(raw: Option<&str>) -> Session {
    match raw {
        Some(value) => try_decode(value).unwrap_or_else(|_| Session::anonymous()),
        None => Session::anonymous(),
    }
}

#[cfg(test)]
#[path = "codec_test.rs"]
mod tests;

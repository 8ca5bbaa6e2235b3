//! The persisted session store.
//!
//! DESIGN
//! ======
//! An explicit, injectable store rather than a module-level global:
//! callers construct it with whatever [`StorageBackend`] they have and
//! pass it down, which keeps tests free of global reset.
//!
//! Mutations before `rehydrate` completes are refused with
//! [`StoreError::NotReady`] instead of being silently dropped or
//! racing the pending load. Within one tab everything is
//! single-threaded, so no internal locking; across tabs the cookie is
//! last-write-wins by contract.

use session::codec::{self, COOKIE_NAME};
use session::{Session, UserRef};

use crate::hydration::{HydrationCoordinator, Phase};
use crate::storage::StorageBackend;

/// What session-dependent UI should render right now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewState {
    /// Persisted state not loaded yet: render the state-independent
    /// placeholder, even if the in-memory session claims otherwise.
    Placeholder,
    SignedIn(UserRef),
    SignedOut,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// `login`/`logout` called before `rehydrate` completed.
    #[error("session store not rehydrated yet")]
    NotReady,
}

/// Client-side authentication state with durable persistence.
#[derive(Debug)]
pub struct SessionStore<S: StorageBackend> {
    session: Session,
    storage: S,
    hydration: HydrationCoordinator,
    /// Whether the in-memory session matches what the backend holds.
    persisted: bool,
}

impl<S: StorageBackend> SessionStore<S> {
    /// Create an empty store. The session starts anonymous and the
    /// store is not usable for mutations until [`Self::rehydrate`]
    /// has run.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self {
            session: Session::anonymous(),
            storage,
            hydration: HydrationCoordinator::new(),
            persisted: false,
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.hydration.phase()
    }

    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// Direct view of the backend, for asserting on persisted bytes.
    #[cfg(test)]
    pub(crate) fn storage(&self) -> &S {
        &self.storage
    }

    /// Load persisted state into the store, exactly once.
    ///
    /// Decoding fails closed: a missing, malformed, or inconsistent
    /// persisted value hydrates as the anonymous session. Calling this
    /// again after the first success is a no-op.
    pub fn rehydrate(&mut self) {
        if self.hydration.is_ready() {
            return;
        }
        let raw = self.storage.get(COOKIE_NAME);
        self.session = codec::decode(raw.as_deref());
        self.persisted = true;
        self.hydration.mark_ready();
    }

    /// Record a successful login and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotReady`] before rehydration completes.
    pub fn login(&mut self, user: UserRef) -> Result<(), StoreError> {
        if !self.hydration.is_ready() {
            return Err(StoreError::NotReady);
        }
        self.session = Session::authenticated(user);
        self.storage.set(COOKIE_NAME, &codec::encode(&self.session));
        self.persisted = true;
        Ok(())
    }

    /// Clear the session and delete the persisted value.
    ///
    /// The backend entry is removed, not overwritten with an empty
    /// session, so a captured cookie value cannot be replayed as
    /// "logged in" state.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotReady`] before rehydration completes.
    pub fn logout(&mut self) -> Result<(), StoreError> {
        if !self.hydration.is_ready() {
            return Err(StoreError::NotReady);
        }
        self.session = Session::anonymous();
        self.storage.remove(COOKIE_NAME);
        self.persisted = true;
        Ok(())
    }

    /// The render decision for session-dependent UI.
    #[must_use]
    pub fn view_state(&self) -> ViewState {
        if !self.hydration.is_ready() {
            return ViewState::Placeholder;
        }
        match &self.session.user {
            Some(user) if self.session.is_authenticated => ViewState::SignedIn(user.clone()),
            _ => ViewState::SignedOut,
        }
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

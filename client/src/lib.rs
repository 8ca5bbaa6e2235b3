//! Client-resident session state.
//!
//! DESIGN
//! ======
//! This crate is the browser half of the session subsystem, written as
//! plain host-side structs so it stays testable without a DOM. The
//! [`store::SessionStore`] keeps the in-memory session and writes it
//! through a [`storage::StorageBackend`] on every mutation; the
//! [`hydration::HydrationCoordinator`] gates rendering until the
//! persisted state has been loaded, so the UI never flashes a
//! logged-in or logged-out branch it might have to take back.

pub mod hydration;
pub mod storage;
pub mod store;
